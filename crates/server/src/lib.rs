pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Review Simulator API",
        version = "0.1.0",
        description = "API for simulating product reviews with LLM-driven reviewer personas"
    ),
    paths(
        routes::health_check,
        routes::pipeline::clean_outputs,
        routes::pipeline::run_phase1,
        routes::pipeline::run_phase2,
        routes::pipeline::run_phase3,
        routes::pipeline::run_phase4,
        routes::pipeline::run_analyze_all,
        routes::results::all_results,
        routes::results::product_artifact,
        routes::results::reviewers_artifact,
        routes::results::reviews_artifact,
        routes::results::analysis_artifact,
    ),
    components(schemas(
        routes::HealthResponse,
        routes::pipeline::StatusResponse,
        routes::pipeline::Phase1Request,
        routes::pipeline::Phase2Request,
        routes::pipeline::Phase3Request,
        routes::pipeline::Phase4Request,
        routes::pipeline::AnalyzeAllRequest,
        reviewsim_core::Product,
        reviewsim_core::ProductFeature,
        reviewsim_core::ReviewerProfile,
        reviewsim_core::PersonalityTraits,
        reviewsim_core::Review,
        reviewsim_core::AnalysisResult,
        reviewsim_core::KeywordSentiment,
        reviewsim_core::Sentiment,
        reviewsim_core::SimulationReport,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "pipeline", description = "Phase execution endpoints"),
        (name = "results", description = "Artifact retrieval endpoints"),
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(routes::health_check))
        .route("/api/clean-outputs", post(routes::pipeline::clean_outputs))
        .route("/api/phase1", post(routes::pipeline::run_phase1))
        .route("/api/phase2", post(routes::pipeline::run_phase2))
        .route("/api/phase3", post(routes::pipeline::run_phase3))
        .route("/api/phase4", post(routes::pipeline::run_phase4))
        .route("/api/analyze-all", post(routes::pipeline::run_analyze_all))
        .route("/api/results", get(routes::results::all_results))
        .route("/api/product", get(routes::results::product_artifact))
        .route("/api/reviewers", get(routes::results::reviewers_artifact))
        .route("/api/reviews", get(routes::results::reviews_artifact))
        .route("/api/analysis", get(routes::results::analysis_artifact))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

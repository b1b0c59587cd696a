//! Phase execution endpoints. Each phase endpoint maps onto one pipeline
//! operation; prerequisite and input problems come back as 400, agent and
//! storage failures as 500.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use pipeline::DEFAULT_NUM_REVIEWERS;
use reviewsim_core::{AnalysisResult, Product, Review, ReviewerProfile, SimulationReport};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

#[derive(Deserialize, ToSchema)]
pub struct Phase1Request {
    pub product_url: Option<String>,
    pub model_name: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct Phase2Request {
    pub num_reviewers: Option<i64>,
    /// Free-form constraints forwarded to the profile generator.
    pub profile_parameters: Option<Value>,
    pub model_name: Option<String>,
}

#[derive(Deserialize, ToSchema, Default)]
pub struct Phase3Request {
    /// Override for the stored phase-1 artifact.
    pub product_info: Option<Product>,
    /// Override for the stored phase-2 artifact.
    pub user_profiles: Option<Vec<ReviewerProfile>>,
    pub model_name: Option<String>,
}

#[derive(Deserialize, ToSchema, Default)]
pub struct Phase4Request {
    pub model_name: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AnalyzeAllRequest {
    pub product_url: Option<String>,
    pub num_reviewers: Option<i64>,
    pub model_name: Option<String>,
}

fn require_url(url: Option<String>) -> Result<String, AppError> {
    match url {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(AppError::BadRequest("product_url is required".to_string())),
    }
}

fn validate_count(count: Option<i64>, default: u32) -> Result<u32, AppError> {
    match count {
        None => Ok(default),
        Some(n) if n < 0 => Err(AppError::BadRequest(
            "num_reviewers must not be negative".to_string(),
        )),
        Some(n) => u32::try_from(n)
            .map_err(|_| AppError::BadRequest("num_reviewers is too large".to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/api/clean-outputs",
    responses(
        (status = 200, description = "Output directory cleared", body = StatusResponse)
    ),
    tag = "pipeline"
)]
pub async fn clean_outputs(State(state): State<AppState>) -> Result<Json<StatusResponse>, AppError> {
    state.pipeline.clean_outputs().await?;
    Ok(Json(StatusResponse {
        status: "success".to_string(),
        message: "output directory cleared".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/phase1",
    request_body = Phase1Request,
    responses(
        (status = 200, description = "Extracted product information", body = Product),
        (status = 400, description = "Missing or empty product_url"),
        (status = 500, description = "Agent execution failed")
    ),
    tag = "pipeline"
)]
pub async fn run_phase1(
    State(state): State<AppState>,
    Json(request): Json<Phase1Request>,
) -> Result<Json<Product>, AppError> {
    let url = require_url(request.product_url)?;
    let outcome = state
        .pipeline
        .extract_product(&url, request.model_name.as_deref())
        .await?;
    match outcome.into_value() {
        Some(product) => Ok(Json(product)),
        None => Err(AppError::Internal(
            "product extraction produced no result".to_string(),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/phase2",
    request_body = Phase2Request,
    responses(
        (status = 200, description = "Generated reviewer profiles", body = [ReviewerProfile]),
        (status = 400, description = "Missing or negative num_reviewers"),
        (status = 500, description = "Agent execution failed")
    ),
    tag = "pipeline"
)]
pub async fn run_phase2(
    State(state): State<AppState>,
    Json(request): Json<Phase2Request>,
) -> Result<Json<Vec<ReviewerProfile>>, AppError> {
    let num_reviewers = match request.num_reviewers {
        Some(n) => validate_count(Some(n), 0)?,
        None => {
            return Err(AppError::BadRequest(
                "num_reviewers is required".to_string(),
            ))
        }
    };
    let profiles = state
        .pipeline
        .generate_reviewers(
            num_reviewers,
            request.profile_parameters.as_ref(),
            request.model_name.as_deref(),
        )
        .await?;
    Ok(Json(profiles))
}

#[utoipa::path(
    post,
    path = "/api/phase3",
    request_body = Phase3Request,
    responses(
        (status = 200, description = "Generated reviews", body = [Review]),
        (status = 400, description = "Product or profiles not available yet"),
        (status = 500, description = "Agent execution failed")
    ),
    tag = "pipeline"
)]
pub async fn run_phase3(
    State(state): State<AppState>,
    request: Option<Json<Phase3Request>>,
) -> Result<Json<Vec<Review>>, AppError> {
    let Json(request) = request.unwrap_or_default();
    let reviews = state
        .pipeline
        .generate_reviews(
            request.product_info,
            request.user_profiles,
            request.model_name.as_deref(),
        )
        .await?;
    Ok(Json(reviews))
}

#[utoipa::path(
    post,
    path = "/api/phase4",
    request_body = Phase4Request,
    responses(
        (status = 200, description = "Compiled analysis report", body = AnalysisResult),
        (status = 400, description = "No reviews available yet"),
        (status = 500, description = "Agent execution failed")
    ),
    tag = "pipeline"
)]
pub async fn run_phase4(
    State(state): State<AppState>,
    request: Option<Json<Phase4Request>>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = request.unwrap_or_default();
    let analysis = state
        .pipeline
        .compile_analysis(request.model_name.as_deref())
        .await?;
    Ok(Json(analysis))
}

#[utoipa::path(
    post,
    path = "/api/analyze-all",
    request_body = AnalyzeAllRequest,
    responses(
        (status = 200, description = "Full simulation report", body = SimulationReport),
        (status = 400, description = "Missing product_url or invalid num_reviewers"),
        (status = 500, description = "A phase failed")
    ),
    tag = "pipeline"
)]
pub async fn run_analyze_all(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeAllRequest>,
) -> Result<Json<SimulationReport>, AppError> {
    let url = require_url(request.product_url)?;
    let num_reviewers = validate_count(request.num_reviewers, DEFAULT_NUM_REVIEWERS)?;
    let report = state
        .pipeline
        .run_all(&url, num_reviewers, request.model_name.as_deref())
        .await?;
    Ok(Json(report))
}

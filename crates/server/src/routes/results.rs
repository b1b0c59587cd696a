//! Read-only artifact endpoints. These serve whatever is on disk; an
//! artifact that has not been produced yet comes back as its empty shape.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use pipeline::ArtifactKind;
use reviewsim_core::{Review, ReviewerProfile};

use crate::error::AppError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/results",
    responses(
        (status = 200, description = "All artifacts produced so far")
    ),
    tag = "results"
)]
pub async fn all_results(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let store = state.pipeline.store();
    let product = store.load_value(ArtifactKind::Product).await?;
    let reviewers = store.load_reviewers().await?;
    let reviews = store.load_reviews().await?;
    let analysis = store.load_value(ArtifactKind::Analysis).await?;

    Ok(Json(serde_json::json!({
        "product": product,
        "reviewers": reviewers,
        "reviews": reviews,
        "analysis": analysis,
    })))
}

#[utoipa::path(
    get,
    path = "/api/product",
    responses(
        (status = 200, description = "Product artifact, or {} before phase 1")
    ),
    tag = "results"
)]
pub async fn product_artifact(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let product = state.pipeline.store().load_value(ArtifactKind::Product).await?;
    Ok(Json(product))
}

#[utoipa::path(
    get,
    path = "/api/reviewers",
    responses(
        (status = 200, description = "Reviewer profiles, or [] before phase 2", body = [ReviewerProfile])
    ),
    tag = "results"
)]
pub async fn reviewers_artifact(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewerProfile>>, AppError> {
    let reviewers = state.pipeline.store().load_reviewers().await?;
    Ok(Json(reviewers))
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    responses(
        (status = 200, description = "Review collection, or [] before phase 3", body = [Review])
    ),
    tag = "results"
)]
pub async fn reviews_artifact(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = state.pipeline.store().load_reviews().await?;
    Ok(Json(reviews))
}

#[utoipa::path(
    get,
    path = "/api/analysis",
    responses(
        (status = 200, description = "Analysis report, or {} before phase 4")
    ),
    tag = "results"
)]
pub async fn analysis_artifact(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let analysis = state
        .pipeline
        .store()
        .load_value(ArtifactKind::Analysis)
        .await?;
    Ok(Json(analysis))
}

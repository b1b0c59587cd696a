use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use pipeline::PipelineError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
    Pipeline(PipelineError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
            AppError::Pipeline(err) => match err {
                PipelineError::MissingPrerequisite(msg) => {
                    (StatusCode::BAD_REQUEST, "missing_prerequisite", msg)
                }
                PipelineError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "bad_request", msg)
                }
                other => {
                    tracing::error!("Pipeline error: {:?}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "pipeline_error",
                        other.to_string(),
                    )
                }
            },
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::Pipeline(err)
    }
}

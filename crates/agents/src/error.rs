use thiserror::Error;

/// Errors from the agent-execution capability.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("LLM API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("LLM rate limited, retry after {retry_after:?}s")]
    RateLimited { retry_after: Option<u64> },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model returned an empty completion")]
    EmptyCompletion,

    #[error("no JSON value found in model output")]
    NoJson,

    #[error("model output did not match the expected shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("failed to fetch page {url}: {reason}")]
    Fetch { url: String, reason: String },
}

pub type AgentResult<T> = Result<T, AgentError>;

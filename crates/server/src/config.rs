use std::env;
use std::path::PathBuf;

use tracing::warn;

const DEFAULT_BIND: &str = "0.0.0.0:3001";
const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";
const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,
    pub output_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let api_key = env::var("OPENROUTER_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            warn!("OPENROUTER_API_KEY is not set; agent phases will fail until it is");
        }

        Self {
            bind_addr: env::var("REVIEWSIM_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            api_key,
            api_base_url: env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            model: env::var("REVIEWSIM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            output_dir: env::var("REVIEWSIM_OUTPUT_DIR")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string())
                .into(),
        }
    }
}

use std::sync::Arc;

use agents::{HttpPageFetcher, LlmExecutor, OpenRouterClient};
use pipeline::{Pipeline, RunContext};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }

    /// Wire the production pipeline from configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        let client = OpenRouterClient::new(config.api_key.clone(), config.api_base_url.clone());
        let executor = Arc::new(LlmExecutor::new(client, config.model.clone()));
        let fetcher = Arc::new(HttpPageFetcher::default());
        let pipeline = Pipeline::new(executor, fetcher, RunContext::new(&config.output_dir));
        Self::new(Arc::new(pipeline))
    }
}

//! Phase 1: turn a product URL into a structured product record.

use tracing::{debug, info, warn};

use agents::{extract, AgentExecutor, PageFetcher, TaskSpec};
use reviewsim_core::Product;

use crate::error::{PipelineError, Result};
use crate::outcome::Outcome;
use crate::prompts;
use crate::store::ArtifactStore;

pub async fn run(
    executor: &dyn AgentExecutor,
    fetcher: &dyn PageFetcher,
    store: &ArtifactStore,
    product_url: &str,
    model: Option<&str>,
) -> Result<Outcome<Product>> {
    let url = product_url.trim();
    if url.is_empty() {
        return Err(PipelineError::InvalidInput(
            "product_url must not be empty".to_string(),
        ));
    }

    info!(url, "phase 1: extracting product information");

    // A failed fetch is not fatal; the agent still gets the URL and the
    // extraction degrades instead of aborting the run.
    let page_text = match fetcher.fetch_text(url).await {
        Ok(text) => text,
        Err(e) => {
            warn!(url, error = %e, "page fetch failed, continuing without page content");
            String::new()
        }
    };

    let agent = prompts::product_investigator();
    let task = TaskSpec::new(
        prompts::product_extraction_task(url, &page_text),
        prompts::PRODUCT_EXPECTED,
    );
    let output = executor.execute(&agent, &task, model).await?;
    debug!(chars = output.len(), "phase 1 agent output received");

    let outcome = match extract::coerce::<Product>(&output) {
        Ok(product) => Outcome::Parsed(product),
        Err(e) => {
            warn!(error = %e, "product extraction output unusable, persisting placeholder");
            Outcome::Fallback(Product::placeholder())
        }
    };

    if let Some(product) = outcome.value() {
        store.save_product(product).await?;
    }
    Ok(outcome)
}

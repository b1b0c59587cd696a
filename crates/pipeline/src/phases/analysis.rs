//! Phase 4: compile the review collection into the aggregate report.

use tracing::info;

use agents::{extract, AgentExecutor, TaskSpec};
use reviewsim_core::AnalysisResult;

use crate::error::{PipelineError, Result};
use crate::prompts;
use crate::store::ArtifactStore;

pub async fn run(
    executor: &dyn AgentExecutor,
    store: &ArtifactStore,
    model: Option<&str>,
) -> Result<AnalysisResult> {
    // Prefer the per-review files; fall back to the collection so an
    // externally provided reviews.json still works.
    let mut reviews = store.collect_reviews().await?;
    if reviews.is_empty() {
        reviews = store.load_reviews().await?;
    }
    if reviews.is_empty() {
        return Err(PipelineError::MissingPrerequisite(
            "no reviews available; run phase 3 first".to_string(),
        ));
    }

    info!(reviews = reviews.len(), "phase 4: compiling analysis");

    let reviews_json = serde_json::to_string_pretty(&reviews)?;
    let agent = prompts::review_analyst();
    let task = TaskSpec::new(prompts::analysis_task(&reviews_json), prompts::ANALYSIS_EXPECTED);
    let output = executor.execute(&agent, &task, model).await?;

    let analysis: AnalysisResult = extract::coerce(&output)?;
    if !analysis.distribution_in_shape() {
        return Err(PipelineError::Generation(format!(
            "rating_distribution must have 5 buckets, got {}",
            analysis.rating_distribution.len()
        )));
    }

    store.save_analysis(&analysis).await?;
    Ok(analysis)
}

//! Four-phase product review simulation.
//!
//! Phase 1 extracts product information from a URL, phase 2 generates a
//! panel of synthetic reviewer profiles, phase 3 fans one review task out
//! per profile, and phase 4 compiles the reviews into an aggregate report.
//! Every phase persists its artifact through [`ArtifactStore`] before
//! returning, so phases can run in separate requests and survive restarts.
//!
//! A [`Pipeline`] assumes one run at a time per output directory; callers
//! that overlap runs against the same directory get interleaved artifacts.

pub mod error;
pub mod outcome;
pub mod phases;
pub mod prompts;
pub mod store;

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use agents::{AgentExecutor, PageFetcher};
use reviewsim_core::{AnalysisResult, Product, Review, ReviewerProfile, SimulationReport};

pub use error::{PipelineError, Result};
pub use outcome::Outcome;
pub use store::{ArtifactKind, ArtifactStore};

pub const DEFAULT_NUM_REVIEWERS: u32 = 3;

/// Everything one simulation run reads and writes: the artifact store rooted
/// at the run's output directory.
#[derive(Debug, Clone)]
pub struct RunContext {
    store: ArtifactStore,
}

impl RunContext {
    pub fn new(output_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            store: ArtifactStore::new(output_dir),
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }
}

/// How far a run has progressed, derived from which artifacts exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PhaseState {
    NotStarted,
    ProductReady,
    ReviewersReady,
    ReviewsReady,
    AnalysisReady,
}

/// Orchestrates the four phases over one [`RunContext`].
pub struct Pipeline {
    executor: Arc<dyn AgentExecutor>,
    fetcher: Arc<dyn PageFetcher>,
    ctx: RunContext,
}

impl Pipeline {
    pub fn new(
        executor: Arc<dyn AgentExecutor>,
        fetcher: Arc<dyn PageFetcher>,
        ctx: RunContext,
    ) -> Self {
        Self {
            executor,
            fetcher,
            ctx,
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        self.ctx.store()
    }

    /// Derive run progress from the artifacts on disk.
    pub async fn state(&self) -> Result<PhaseState> {
        let store = self.ctx.store();
        if store.load_analysis().await?.is_some() {
            return Ok(PhaseState::AnalysisReady);
        }
        if !store.load_reviews().await?.is_empty() {
            return Ok(PhaseState::ReviewsReady);
        }
        if !store.load_reviewers().await?.is_empty() {
            return Ok(PhaseState::ReviewersReady);
        }
        if store.load_product().await?.is_some() {
            return Ok(PhaseState::ProductReady);
        }
        Ok(PhaseState::NotStarted)
    }

    /// Clear all artifacts from the output directory.
    pub async fn clean_outputs(&self) -> Result<()> {
        self.ctx.store().reset().await
    }

    /// Phase 1. Starts a fresh run: earlier artifacts are cleared first.
    pub async fn extract_product(
        &self,
        product_url: &str,
        model: Option<&str>,
    ) -> Result<Outcome<Product>> {
        self.ctx.store().reset().await?;
        phases::product::run(
            self.executor.as_ref(),
            self.fetcher.as_ref(),
            self.ctx.store(),
            product_url,
            model,
        )
        .await
    }

    /// Phase 2.
    pub async fn generate_reviewers(
        &self,
        num_reviewers: u32,
        parameters: Option<&Value>,
        model: Option<&str>,
    ) -> Result<Vec<ReviewerProfile>> {
        phases::personas::run(
            self.executor.as_ref(),
            self.ctx.store(),
            num_reviewers,
            parameters,
            model,
        )
        .await
    }

    /// Phase 3. Inputs may be passed explicitly (as run-all does) or loaded
    /// from the artifacts of earlier phases.
    pub async fn generate_reviews(
        &self,
        product: Option<Product>,
        profiles: Option<Vec<ReviewerProfile>>,
        model: Option<&str>,
    ) -> Result<Vec<Review>> {
        let store = self.ctx.store();
        let product = match product {
            Some(product) => product,
            None => store.load_product().await?.ok_or_else(|| {
                PipelineError::MissingPrerequisite(
                    "product information not available; run phase 1 first".to_string(),
                )
            })?,
        };
        let profiles = match profiles {
            Some(profiles) => profiles,
            None => {
                let loaded = store.load_reviewers().await?;
                if loaded.is_empty() {
                    return Err(PipelineError::MissingPrerequisite(
                        "reviewer profiles not available; run phase 2 first".to_string(),
                    ));
                }
                loaded
            }
        };

        phases::reviews::run(self.executor.as_ref(), store, &product, &profiles, model).await
    }

    /// Phase 4.
    pub async fn compile_analysis(&self, model: Option<&str>) -> Result<AnalysisResult> {
        phases::analysis::run(self.executor.as_ref(), self.ctx.store(), model).await
    }

    /// Run all four phases in order and compose the final report. Any phase
    /// failure aborts the run; artifacts of completed phases stay on disk.
    pub async fn run_all(
        &self,
        product_url: &str,
        num_reviewers: u32,
        model: Option<&str>,
    ) -> Result<SimulationReport> {
        info!(product_url, num_reviewers, "starting full simulation run");

        let product = match self.extract_product(product_url, model).await? {
            Outcome::Parsed(product) | Outcome::Fallback(product) => product,
            Outcome::Dropped { reason } => return Err(PipelineError::Generation(reason)),
        };
        let reviewers = self.generate_reviewers(num_reviewers, None, model).await?;
        let reviews = self
            .generate_reviews(Some(product.clone()), Some(reviewers.clone()), model)
            .await?;
        let analysis = self.compile_analysis(model).await?;

        info!(
            reviews = reviews.len(),
            average_rating = analysis.average_rating,
            "simulation run complete"
        );

        Ok(SimulationReport {
            product,
            reviewers,
            reviews,
            analysis,
        })
    }
}

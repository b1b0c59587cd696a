//! Phase 3: fan one review task out per reviewer profile.
//!
//! Each review is persisted individually as soon as it parses; the collection
//! file is rebuilt from those files at the end, so a failure mid-panel keeps
//! the reviews that already succeeded.

use tracing::{info, warn};

use agents::{extract, AgentExecutor, TaskSpec};
use reviewsim_core::{Product, Review, ReviewerProfile};

use crate::error::Result;
use crate::outcome::Outcome;
use crate::prompts;
use crate::store::ArtifactStore;

pub async fn run(
    executor: &dyn AgentExecutor,
    store: &ArtifactStore,
    product: &Product,
    profiles: &[ReviewerProfile],
    model: Option<&str>,
) -> Result<Vec<Review>> {
    info!(
        product = %product.name,
        reviewers = profiles.len(),
        "phase 3: generating reviews"
    );

    store.clear_reviews().await?;

    if profiles.is_empty() {
        store.save_reviews_collection(&[]).await?;
        return Ok(Vec::new());
    }

    let product_json = serde_json::to_string(product)?;

    for (index, profile) in profiles.iter().enumerate() {
        match generate_one(executor, &product_json, profile, index, model).await {
            Outcome::Parsed(review) | Outcome::Fallback(review) => {
                store.save_review(index, &review).await?;
            }
            Outcome::Dropped { reason } => {
                warn!(reviewer = profile.id, reason, "dropping review");
            }
        }
    }

    let reviews = store.collect_reviews().await?;
    store.save_reviews_collection(&reviews).await?;
    Ok(reviews)
}

/// Run one review task. A failed execution or unparseable output drops this
/// review only; correlation fields and the rating are repaired in place.
async fn generate_one(
    executor: &dyn AgentExecutor,
    product_json: &str,
    profile: &ReviewerProfile,
    index: usize,
    model: Option<&str>,
) -> Outcome<Review> {
    let agent = prompts::reviewer(profile);
    let task = TaskSpec::new(
        prompts::review_task(product_json, profile, index),
        prompts::REVIEW_EXPECTED,
    );

    let output = match executor.execute(&agent, &task, model).await {
        Ok(output) => output,
        Err(e) => {
            return Outcome::Dropped {
                reason: e.to_string(),
            }
        }
    };

    match extract::coerce::<Review>(&output) {
        Ok(mut review) => {
            review.id = index as u32;
            if review.bot_id != profile.id {
                warn!(
                    reviewer = profile.id,
                    claimed = review.bot_id,
                    "review carried wrong bot_id, correcting"
                );
                review.bot_id = profile.id;
            }
            if !review.rating_in_range() {
                warn!(reviewer = profile.id, rating = review.rating, "clamping rating");
                review.clamp_rating();
            }
            Outcome::Parsed(review)
        }
        Err(e) => Outcome::Dropped {
            reason: e.to_string(),
        },
    }
}

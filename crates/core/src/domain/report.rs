use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::analysis::AnalysisResult;
use super::product::Product;
use super::review::Review;
use super::reviewer::ReviewerProfile;

/// Composed output of a full pipeline run: the four phase artifacts in
/// dependency order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimulationReport {
    pub product: Product,
    pub reviewers: Vec<ReviewerProfile>,
    pub reviews: Vec<Review>,
    pub analysis: AnalysisResult,
}

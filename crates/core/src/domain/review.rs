use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_product_id() -> u32 {
    1
}

/// One product review authored from a single reviewer persona's perspective.
/// `bot_id` references the [`super::reviewer::ReviewerProfile`] that wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: u32,
    pub bot_id: u32,
    #[serde(default = "default_product_id")]
    pub product_id: u32,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub title: String,
    pub content: String,
}

impl Review {
    pub fn rating_in_range(&self) -> bool {
        (1..=5).contains(&self.rating)
    }

    /// Clamp the rating into the valid 1..=5 band.
    pub fn clamp_rating(&mut self) {
        self.rating = self.rating.clamp(1, 5);
    }
}

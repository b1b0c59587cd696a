use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sentiment attached to a keyword in the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// A keyword extracted from the review corpus with its frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct KeywordSentiment {
    pub word: String,
    pub count: u32,
    pub sentiment: Sentiment,
}

/// Aggregate report over the full review collection, produced by phase 4.
/// Derived data only; never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub average_rating: f64,
    /// Review counts per star, indexed by rating 1..=5. Always 5 entries.
    pub rating_distribution: Vec<u32>,
    pub positive_points: Vec<String>,
    pub negative_points: Vec<String>,
    pub keyword_analysis: Vec<KeywordSentiment>,
    pub demographic_insights: Vec<String>,
}

impl AnalysisResult {
    pub fn distribution_in_shape(&self) -> bool {
        self.rating_distribution.len() == 5
    }

    /// Total number of reviews counted by the distribution.
    pub fn distribution_total(&self) -> u32 {
        self.rating_distribution.iter().sum()
    }
}

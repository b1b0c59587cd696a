//! Core domain types for the review simulation pipeline.
//!
//! Every type here is a value record produced by one pipeline phase and
//! consumed by later phases or the REST layer. "Mutation" of an artifact
//! always means a full overwrite of the stored record, never an in-place
//! edit.

pub mod domain;

pub use domain::analysis::{AnalysisResult, KeywordSentiment, Sentiment};
pub use domain::product::{Product, ProductFeature};
pub use domain::report::SimulationReport;
pub use domain::review::Review;
pub use domain::reviewer::{PersonalityTraits, ReviewerProfile};

//! Agent-execution capability for the review simulation pipeline.
//!
//! Wraps one opaque ability: "run a named task with a role, goal, and
//! backstory against an LLM, producing text or a JSON-validated object".
//! The pipeline never talks to the model API directly; it goes through
//! [`AgentExecutor`], and all JSON coercion of model output happens at the
//! single seam in [`extract`].

pub mod error;
pub mod executor;
pub mod extract;
pub mod openrouter;
pub mod scrape;

pub use error::{AgentError, AgentResult};
pub use executor::{AgentExecutor, AgentSpec, LlmExecutor, TaskSpec};
pub use openrouter::client::{OpenRouterClient, RetryPolicy};
pub use openrouter::types::{ChatMessage, Role};
pub use scrape::{HttpPageFetcher, PageFetcher};

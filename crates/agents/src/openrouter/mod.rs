//! OpenRouter-compatible chat completion client.

pub mod client;
pub mod types;

//! The four phase executors. Each one drives the agent layer, coerces the
//! output into typed artifacts, persists them, and returns the typed value.

pub mod analysis;
pub mod personas;
pub mod product;
pub mod reviews;

use thiserror::Error;

use crate::store::ArtifactKind;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// A phase was asked to run before the artifacts it depends on exist.
    #[error("missing prerequisite: {0}")]
    MissingPrerequisite(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("agent execution failed: {0}")]
    Agent(#[from] agents::AgentError),

    /// An artifact file on disk held unparseable JSON. The store resets the
    /// file to its empty shape before surfacing this, so the error fires at
    /// most once per corruption.
    #[error("corrupt {kind} artifact: {reason}")]
    CorruptArtifact { kind: ArtifactKind, reason: String },

    /// The model produced parseable JSON that still violates an artifact
    /// invariant the pipeline cannot repair.
    #[error("generation failed: {0}")]
    Generation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

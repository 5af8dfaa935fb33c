//! Error types for topology model building.

use thiserror::Error;

/// Errors raised while building the topology model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The document is valid JSON but does not have the expected shape.
    #[error("malformed topology document: {0}")]
    MalformedInput(String),

    /// The document is not valid JSON at all.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

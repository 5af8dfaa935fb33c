//! Error types for Lamina view building.

use thiserror::Error;

use lamina_model::ModelError;

/// The main error type for view building.
#[derive(Debug, Error)]
pub enum LaminaError {
    /// The topology document could not be turned into a model.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A link endpoint path resolved to no graph node.
    ///
    /// Unlike a dangling supporting reference (which is tolerated), a link
    /// without a resolvable endpoint has no valid numeric identity and the
    /// defect is surfaced to the caller.
    #[error("link {link}: endpoint {endpoint} does not resolve to any node")]
    UnresolvedEndpoint { link: String, endpoint: String },

    /// A view output or attribute payload failed to serialize.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

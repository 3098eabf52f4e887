#![forbid(unsafe_code)]

//! Errors raised by the binding engine.

use mog_core::{MarkerParseError, NodeId};

/// What an event handler returns. An `Err` is logged and does not stop
/// the remaining handlers.
pub type HandlerResult = Result<(), Box<dyn std::error::Error>>;

/// The engine was asked to do something its configuration does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A marker attribute names a role nobody registered.
    #[error("no role '{role}' is registered (attribute '{attribute}' on {node})")]
    UnknownRole {
        role: String,
        attribute: String,
        node: NodeId,
    },
    /// A role with this name already exists on the model.
    #[error("role '{role}' is already registered")]
    DuplicateRole { role: String },
    /// A sync policy document could not be used.
    #[error("invalid sync policy: {0}")]
    InvalidPolicy(String),
}

/// Failure of [`Model::sync`](crate::Model::sync). A failed scan binds nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// A marker under this model's namespace is malformed.
    #[error("attribute '{attribute}' on {node}: {source}")]
    Marker {
        node: NodeId,
        attribute: String,
        #[source]
        source: MarkerParseError,
    },
    /// The scan hit a configuration problem.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

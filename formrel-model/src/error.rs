//! Error types shared by the formrel crates.

use thiserror::Error;

/// Result type alias using [`RelationError`].
pub type Result<T> = std::result::Result<T, RelationError>;

#[derive(Debug, Error)]
pub enum RelationError {
    /// A dependency names a field the container cannot resolve.
    #[error("lost field '{field}' required by relation {relation}")]
    MissingField { relation: String, field: String },

    #[error("relation {relation} re-entered while it was still being evaluated")]
    Cycle { relation: String },

    #[error("invalid relation {relation}: {reason}")]
    InvalidRelation { relation: String, reason: String },

    #[error("engine is already active on a container")]
    AlreadyActive,

    #[error("engine is not active on any container")]
    NotActive,

    #[error("inline {slot} in relation {relation} cannot be serialized")]
    InlineNotSerializable {
        relation: String,
        slot: &'static str,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised by a container or a custom action.
    #[error("collaborator error: {0}")]
    Collaborator(String),
}

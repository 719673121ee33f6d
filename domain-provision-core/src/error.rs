//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use domain_provision_client::ClientError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No record exists for the given domain
    #[error("Domain record not found: {0}")]
    RecordNotFound(String),

    /// A precondition on the record's persisted state does not hold
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// External-service client error (converted from library)
    #[error("{0}")]
    Client(#[from] ClientError),
}

impl CoreError {
    /// Whether this is expected behavior (missing record, stale precondition)
    /// rather than an infrastructure fault, used for log-level selection.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`. **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::RecordNotFound(_) | Self::ValidationError(_) => true,
            Self::Client(e) => e.is_expected(),
            Self::StorageError(_) | Self::SerializationError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

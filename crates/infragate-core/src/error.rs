//! Error kinds surfaced to callers of the adapter.

use thiserror::Error;

use crate::id::ResourceIdError;

#[derive(Debug, Error)]
pub enum InfraError {
    /// Malformed input: bad ids, conflicting relations, bad enums,
    /// malformed metadata, counters that do not fit their target width.
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {kind} with id {id}")]
    NotFound { kind: String, id: String },

    /// Unknown resource kind or an operation the kind does not support.
    #[error("Unimplemented: {0}")]
    Unimplemented(String),

    /// Any other backend failure, passed through without reinterpretation.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl InfraError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ResourceIdError> for InfraError {
    fn from(err: ResourceIdError) -> Self {
        Self::validation(err.to_string())
    }
}

pub type InfraResult<T> = Result<T, InfraError>;

//! Database-specific error types and conversions.

use infragate_core::error::InfraError;
use infragate_core::id::ResourceIdError;
use infragate_core::query::QueryError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {kind} with id {id}")]
    NotFound { kind: String, id: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Stored record could not be decoded: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Decode(err.to_string())
    }
}

impl From<QueryError> for DbError {
    fn from(err: QueryError) -> Self {
        DbError::InvalidArgument(err.to_string())
    }
}

impl From<ResourceIdError> for DbError {
    fn from(err: ResourceIdError) -> Self {
        DbError::InvalidArgument(err.to_string())
    }
}

impl From<DbError> for InfraError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { kind, id } => InfraError::NotFound { kind, id },
            DbError::InvalidArgument(message) => InfraError::Validation { message },
            other => InfraError::Backend(other.to_string()),
        }
    }
}

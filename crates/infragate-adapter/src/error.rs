//! Conversion and validation error types.

use infragate_core::error::InfraError;
use infragate_core::id::ResourceIdError;
use thiserror::Error;

/// A wire payload or backend record that cannot be converted.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid {field}: {source}")]
    InvalidId {
        field: &'static str,
        #[source]
        source: ResourceIdError,
    },

    #[error("only one of {} may be specified", .fields.join(", "))]
    ConflictingRelations { fields: Vec<&'static str> },

    #[error("one of {} is required", .fields.join(", "))]
    MissingRelation { fields: Vec<&'static str> },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid value {value:?} for {field}")]
    InvalidEnum { field: &'static str, value: String },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("malformed metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("{field} value {value} is out of range")]
    Overflow { field: &'static str, value: i128 },

    #[error("unknown field {field:?} in {context}")]
    UnknownField { field: String, context: &'static str },

    /// The backend returned a resource the requested wire kind cannot
    /// represent, e.g. a metrics group fetched as a logs group.
    #[error("{id} is not a {expected}")]
    UnexpectedResource { expected: &'static str, id: String },
}

impl From<ConvertError> for InfraError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::UnexpectedResource { expected, id } => InfraError::NotFound {
                kind: expected.to_owned(),
                id,
            },
            other => InfraError::validation(other.to_string()),
        }
    }
}

use thiserror::Error;

/// Validation and contract errors exposed by `cepr-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("postal code cannot be empty")]
    EmptyPostalCode,
    #[error("postal code must be 8 digits, got {len}: '{value}'")]
    PostalCodeWrongLength { value: String, len: usize },
    #[error("postal code contains non-digit character '{ch}' at index {index}")]
    PostalCodeInvalidChar { ch: char, index: usize },

    #[error("invalid source '{value}', expected one of brasilapi, viacep")]
    InvalidSource { value: String },

    #[error("race requires at least one source")]
    EmptySourceList,
    #[error("race budget must be greater than zero")]
    ZeroBudget,

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("source_chain must contain at least one source")]
    EmptySourceChain,

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

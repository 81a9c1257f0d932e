use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level violation reported by the schema layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaViolation {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl SchemaViolation {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|part| part.to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    pub fn missing(location: &str, field: &str) -> Self {
        Self::new(&[location, field], "field required", "value_error.missing")
    }
}

/// Service-level errors that can occur in business logic
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    InvalidRequestFormat { message: String },

    #[error("{message}")]
    MissingField { message: String },

    #[error("{message}")]
    InvalidFieldValue { message: String },

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("Schema validation failed: {} violation(s)", violations.len())]
    SchemaValidation { violations: Vec<SchemaViolation> },

    #[error("Email already registered")]
    EmailConflict { email: String },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },
}

/// Repository-level errors for data access operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Cannot allocate an id from an empty {resource} store")]
    EmptyStore { resource: &'static str },

    #[error("Id space exhausted for {resource} store")]
    IdSpaceExhausted { resource: &'static str },
}

/// Validation errors for input data
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{message}")]
    InvalidRequestFormat { message: String },

    #[error("{message}")]
    MissingField { message: String },

    #[error("{message}")]
    InvalidFieldValue { message: String },

    #[error("Schema validation failed: {} violation(s)", violations.len())]
    Schema { violations: Vec<SchemaViolation> },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidRequestFormat { message } => {
                ServiceError::InvalidRequestFormat { message }
            }
            ValidationError::MissingField { message } => ServiceError::MissingField { message },
            ValidationError::InvalidFieldValue { message } => {
                ServiceError::InvalidFieldValue { message }
            }
            ValidationError::Schema { violations } => {
                ServiceError::SchemaValidation { violations }
            }
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

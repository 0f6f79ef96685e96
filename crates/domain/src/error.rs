//! Domain error types

use thiserror::Error;

/// Domain-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A response body could not be interpreted as JSON.
    #[error("response body is not JSON: {0}")]
    NotJson(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

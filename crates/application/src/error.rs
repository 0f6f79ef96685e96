//! Application error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::ports::{ExportStoreError, RequestError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Required settings are missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An HTTP request failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The API answered with a body of an unexpected shape.
    #[error("unexpected response from {url}: {message}")]
    UnexpectedResponse {
        /// Request URL.
        url: String,
        /// What was wrong with the body.
        message: String,
    },

    /// An exported document could not be stored.
    #[error("storage error: {0}")]
    Storage(#[from] ExportStoreError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

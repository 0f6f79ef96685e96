//! Porter Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The Postman API client built on the request sender port
//! - Use case orchestration
//! - Application-level error handling

pub mod config;
pub mod error;
pub mod ports;
pub mod postman_api;
pub mod use_cases;

pub use config::{ConfigError, PostmanConfig};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    ExportRepository, ExportStoreError, FileSystem, FileSystemError, RequestError, RequestResult,
    RequestSender, TransportFailure,
};
pub use postman_api::{API_KEY_HEADER, PostmanApi};
pub use use_cases::{ExportOptions, ExportReport, ExportWorkspaces};

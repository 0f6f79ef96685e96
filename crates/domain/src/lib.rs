//! Porter Domain - Core types
//!
//! This crate defines the domain model for the Porter exporter.
//! All types here are pure Rust with no I/O dependencies.

pub mod archive;
pub mod error;
pub mod export;
pub mod postman;
pub mod request;
pub mod response;

pub use archive::{ArchiveContent, ArchiveContents, ArchiveEntry};
pub use error::{DomainError, DomainResult};
pub use export::{ExportedFile, collection_file_name, environment_file_name, globals_file_name};
pub use postman::{
    CollectionSummary, EnvironmentSummary, WorkspaceDetail, WorkspaceEnvelope, WorkspaceSummary,
    WorkspacesEnvelope,
};
pub use request::{ApiRequest, FormFields, Headers, HttpMethod, RequestPayload};
pub use response::{ApiResponse, ResponseBody, StatusCode};

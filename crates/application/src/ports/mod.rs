//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod export_repository;
mod file_system;
mod request_sender;

pub use export_repository::{ExportRepository, ExportStoreError};
pub use file_system::{FileSystem, FileSystemError};
pub use request_sender::{RequestError, RequestResult, RequestSender, TransportFailure};

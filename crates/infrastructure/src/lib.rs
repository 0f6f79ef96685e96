//! Porter Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus the standalone archive
//! extractor.

pub mod adapters;
pub mod archive;
pub mod config;
pub mod persistence;
pub mod serialization;

pub use adapters::ReqwestRequestSender;
pub use archive::{ArchiveError, ZipArchiveExtractor};
pub use config::load_postman_config;
pub use persistence::{FileSystemExportRepository, TokioFileSystem};
pub use serialization::{SerializationError, to_json_stable_bytes};

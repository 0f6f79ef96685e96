//! File persistence for exported documents.

mod export_repository;
mod file_system;

pub use export_repository::FileSystemExportRepository;
pub use file_system::TokioFileSystem;

//! Export repository port.

use std::path::PathBuf;

use porter_domain::ExportedFile;

/// Error type for export storage operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportStoreError {
    /// The document could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File system error.
    #[error("File system error: {0}")]
    FileSystem(String),
}

/// Destination for exported documents.
///
/// File names are plain names (no directories); the repository decides
/// where they live.
pub trait ExportRepository: Send + Sync {
    /// Returns the path a file name resolves to.
    fn path_for(&self, file_name: &str) -> PathBuf;

    /// Returns true if a file with this name was already exported.
    fn exists(&self, file_name: &str) -> impl std::future::Future<Output = bool> + Send;

    /// Serializes a JSON document and writes it, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    fn save_document(
        &self,
        file_name: &str,
        document: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<ExportedFile, ExportStoreError>> + Send;
}

//! File system based export repository implementation.

use std::path::PathBuf;

use porter_application::ports::{ExportRepository, ExportStoreError, FileSystem};
use porter_domain::ExportedFile;
use tracing::debug;

use crate::serialization::to_json_stable_bytes;

/// Writes exported documents as pretty JSON files into one directory.
pub struct FileSystemExportRepository<F: FileSystem> {
    fs: F,
    output_dir: PathBuf,
}

impl<F: FileSystem> FileSystemExportRepository<F> {
    /// Creates a repository writing into `output_dir`.
    #[must_use]
    pub fn new(fs: F, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            output_dir: output_dir.into(),
        }
    }
}

impl<F: FileSystem> ExportRepository for FileSystemExportRepository<F> {
    fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    async fn exists(&self, file_name: &str) -> bool {
        self.fs.exists(&self.path_for(file_name)).await
    }

    async fn save_document(
        &self,
        file_name: &str,
        document: &serde_json::Value,
    ) -> Result<ExportedFile, ExportStoreError> {
        let content = to_json_stable_bytes(document)
            .map_err(|e| ExportStoreError::Serialization(e.to_string()))?;
        let file = ExportedFile::new(self.path_for(file_name), content);

        self.fs
            .write_file(&file.path, &file.content)
            .await
            .map_err(|e| ExportStoreError::FileSystem(e.to_string()))?;

        debug!(path = %file.path.display(), bytes = file.content.len(), "wrote export");
        Ok(file)
    }
}

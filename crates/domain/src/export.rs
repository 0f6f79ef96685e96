//! Export artifact types.
//!
//! File names are derived only from workspace and item names, so a second
//! run targets the same paths and overwrites the previous output.

use std::path::PathBuf;

/// A file produced by the exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Destination path.
    pub path: PathBuf,
    /// File contents.
    pub content: Vec<u8>,
}

impl ExportedFile {
    /// Creates a new exported file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}

/// Replaces path separators so a name cannot escape the output directory.
fn file_safe(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

/// File name for an exported collection: `{workspace}-{collection}.json`.
#[must_use]
pub fn collection_file_name(workspace: &str, collection: &str) -> String {
    format!("{}-{}.json", file_safe(workspace), file_safe(collection))
}

/// File name for an exported environment:
/// `{workspace}-{environment}.postman_environment.json`.
#[must_use]
pub fn environment_file_name(workspace: &str, environment: &str) -> String {
    format!(
        "{}-{}.postman_environment.json",
        file_safe(workspace),
        file_safe(environment)
    )
}

/// File name for a workspace's global variables: `{workspace}.postman_globals.json`.
#[must_use]
pub fn globals_file_name(workspace: &str) -> String {
    format!("{}.postman_globals.json", file_safe(workspace))
}

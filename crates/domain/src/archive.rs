//! Archive entry types.

use std::collections::BTreeMap;

/// Content of one archive member.
///
/// Members whose bytes are valid UTF-8 are exposed as text; everything else
/// stays raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveContent {
    /// UTF-8 decoded content
    Text(String),
    /// Raw content
    Binary(Vec<u8>),
}

impl ArchiveContent {
    /// Classifies raw member bytes.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(e) => Self::Binary(e.into_bytes()),
        }
    }

    /// Returns the content as bytes regardless of classification.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }
}

/// One file stored in an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Archive-relative path, separators preserved
    pub name: String,
    /// Decompressed content
    pub content: ArchiveContent,
}

/// Archive members keyed by path.
pub type ArchiveContents = BTreeMap<String, ArchiveContent>;

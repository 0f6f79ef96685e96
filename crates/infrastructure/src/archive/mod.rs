//! Archive infrastructure.
//!
//! In-memory extraction of ZIP archives, for bundles such as Postman data
//! dumps that arrive as raw bytes.

mod zip_extractor;

pub use zip_extractor::{ArchiveError, ZipArchiveExtractor};

//! ZIP archive extraction.

use std::io::{Cursor, Read};

use porter_domain::{ArchiveContent, ArchiveContents, ArchiveEntry};
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

/// Archive decode error.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The buffer is not a readable ZIP archive.
    #[error("not a valid ZIP archive: {0}")]
    InvalidArchive(#[source] ZipError),

    /// A member could not be opened or decompressed.
    #[error("failed to read archive member {name}: {message}")]
    Member {
        /// Member path, or its index when the name is unknown.
        name: String,
        /// Underlying error message.
        message: String,
    },
}

/// Extracts ZIP archives held in memory.
///
/// Members are returned keyed by their archive-relative path with
/// separators preserved. Members that are valid UTF-8 come back as
/// `ArchiveContent::Text`, the rest as `ArchiveContent::Binary`. Directory
/// entries carry no content and are left out. Nothing is written to disk,
/// and on any error no partial result is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveExtractor;

impl ZipArchiveExtractor {
    /// Extracts every file member, in archive order.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError` if the buffer is not an archive or a member
    /// cannot be read.
    pub fn entries(bytes: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(ArchiveError::InvalidArchive)?;
        let mut entries = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut member = archive.by_index(index).map_err(|e| ArchiveError::Member {
                name: format!("#{index}"),
                message: e.to_string(),
            })?;
            if member.is_dir() {
                continue;
            }

            // Declared sizes come from the archive itself and are not trusted.
            let name = member.name().to_string();
            let mut content = Vec::new();
            member
                .read_to_end(&mut content)
                .map_err(|e| ArchiveError::Member {
                    name: name.clone(),
                    message: e.to_string(),
                })?;

            entries.push(ArchiveEntry {
                name,
                content: ArchiveContent::from_bytes(content),
            });
        }

        Ok(entries)
    }

    /// Extracts the archive into a path-to-content mapping.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError` if the buffer is not an archive or a member
    /// cannot be read.
    pub fn extract(bytes: &[u8]) -> Result<ArchiveContents, ArchiveError> {
        let contents = Self::entries(bytes)?
            .into_iter()
            .map(|entry| (entry.name, entry.content))
            .collect();
        Ok(contents)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn build_zip(files: &[(&str, &[u8])], dirs: &[&str]) -> Vec<u8> {
        build_zip_with(files, dirs, SimpleFileOptions::default())
    }

    fn build_zip_with(files: &[(&str, &[u8])], dirs: &[&str], options: SimpleFileOptions) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for dir in dirs {
            writer.add_directory(*dir, options).unwrap();
        }
        for (name, content) in files {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    /// One stored member `a.txt` holding `hi`, whose central directory entry
    /// declares `declared_size` uncompressed bytes through a zip64 extra field.
    fn zip_with_declared_size(declared_size: u64) -> Vec<u8> {
        const CRC_OF_HI: u32 = 0xd893_2aac;
        let name = b"a.txt";
        let data = b"hi";

        let mut local = Vec::new();
        local.extend_from_slice(&0x0403_4b50_u32.to_le_bytes());
        for field in [45_u16, 0, 0, 0, 0] {
            local.extend_from_slice(&field.to_le_bytes());
        }
        local.extend_from_slice(&CRC_OF_HI.to_le_bytes());
        local.extend_from_slice(&2_u32.to_le_bytes());
        local.extend_from_slice(&2_u32.to_le_bytes());
        local.extend_from_slice(&5_u16.to_le_bytes());
        local.extend_from_slice(&0_u16.to_le_bytes());
        local.extend_from_slice(name);
        local.extend_from_slice(data);

        let mut extra = Vec::new();
        extra.extend_from_slice(&1_u16.to_le_bytes());
        extra.extend_from_slice(&8_u16.to_le_bytes());
        extra.extend_from_slice(&declared_size.to_le_bytes());

        let mut central = Vec::new();
        central.extend_from_slice(&0x0201_4b50_u32.to_le_bytes());
        for field in [45_u16, 45, 0, 0, 0, 0] {
            central.extend_from_slice(&field.to_le_bytes());
        }
        central.extend_from_slice(&CRC_OF_HI.to_le_bytes());
        central.extend_from_slice(&2_u32.to_le_bytes());
        central.extend_from_slice(&u32::MAX.to_le_bytes());
        central.extend_from_slice(&5_u16.to_le_bytes());
        central.extend_from_slice(&12_u16.to_le_bytes());
        for field in [0_u16, 0, 0] {
            central.extend_from_slice(&field.to_le_bytes());
        }
        central.extend_from_slice(&0_u32.to_le_bytes());
        central.extend_from_slice(&0_u32.to_le_bytes());
        central.extend_from_slice(name);
        central.extend_from_slice(&extra);

        let mut bytes = local.clone();
        bytes.extend_from_slice(&central);
        bytes.extend_from_slice(&0x0605_4b50_u32.to_le_bytes());
        for field in [0_u16, 0, 1, 1] {
            bytes.extend_from_slice(&field.to_le_bytes());
        }
        bytes.extend_from_slice(&u32::try_from(central.len()).unwrap().to_le_bytes());
        bytes.extend_from_slice(&u32::try_from(local.len()).unwrap().to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes
    }

    #[test]
    fn test_extract_returns_one_key_per_file() {
        let bytes = build_zip(
            &[
                (
                    "Development-API Tests.json",
                    br#"{"info":{"name":"API Tests"}}"#.as_slice(),
                ),
                ("collections/qa/Integration Tests.json", b"{}".as_slice()),
                ("README.md", b"# Export".as_slice()),
            ],
            &[],
        );

        let contents = ZipArchiveExtractor::extract(&bytes).unwrap();

        assert_eq!(contents.len(), 3);
        assert_eq!(
            contents["Development-API Tests.json"],
            ArchiveContent::Text(r#"{"info":{"name":"API Tests"}}"#.to_string())
        );
        assert_eq!(
            contents["collections/qa/Integration Tests.json"],
            ArchiveContent::Text("{}".to_string())
        );
        assert_eq!(contents["README.md"].as_bytes(), b"# Export");
    }

    #[test]
    fn test_binary_members_stay_raw() {
        let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0xff];
        let bytes = build_zip(&[("assets/logo.png", png.as_slice())], &[]);

        let contents = ZipArchiveExtractor::extract(&bytes).unwrap();

        assert_eq!(contents["assets/logo.png"], ArchiveContent::Binary(png.to_vec()));
    }

    #[test]
    fn test_directory_entries_are_omitted() {
        let bytes = build_zip(&[("collections/a.json", b"{}".as_slice())], &["collections/"]);

        let entries = ZipArchiveExtractor::entries(&bytes).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "collections/a.json");
    }

    #[test]
    fn test_empty_archive_yields_empty_mapping() {
        let bytes = build_zip(&[], &[]);
        assert!(ZipArchiveExtractor::extract(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = ZipArchiveExtractor::extract(b"definitely not a zip file");
        assert!(matches!(result, Err(ArchiveError::InvalidArchive(_))));
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        assert!(ZipArchiveExtractor::extract(&[]).is_err());
    }

    #[test]
    fn test_truncated_archive_is_rejected() {
        let bytes = build_zip(
            &[
                ("a.json", b"{\"a\":1}".as_slice()),
                ("b.json", b"{\"b\":2}".as_slice()),
            ],
            &[],
        );
        let truncated = &bytes[..bytes.len() / 2];
        assert!(ZipArchiveExtractor::extract(truncated).is_err());
    }

    #[test]
    fn test_declared_size_is_not_trusted() {
        let truthful = ZipArchiveExtractor::extract(&zip_with_declared_size(2)).unwrap();
        assert_eq!(truthful["a.txt"], ArchiveContent::Text("hi".to_string()));

        match ZipArchiveExtractor::extract(&zip_with_declared_size(0xffff_ffff_ffff_ff00)) {
            Ok(contents) => assert_eq!(contents["a.txt"], ArchiveContent::Text("hi".to_string())),
            Err(e) => assert!(
                matches!(e, ArchiveError::Member { .. } | ArchiveError::InvalidArchive(_)),
                "unexpected error: {e:?}"
            ),
        }
    }

    #[test]
    fn test_corrupted_member_is_rejected_without_partial_result() {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let mut bytes = build_zip_with(
            &[
                ("a.json", b"{\"a\":1}".as_slice()),
                ("b.json", b"{\"b\":2}".as_slice()),
            ],
            &[],
            options,
        );
        let at = bytes
            .windows(7)
            .position(|window| window == b"{\"b\":2}")
            .unwrap();
        bytes[at + 5] = b'3';

        let result = ZipArchiveExtractor::extract(&bytes);

        match result {
            Err(ArchiveError::Member { name, .. }) => assert_eq!(name, "b.json"),
            other => panic!("expected member error, got {other:?}"),
        }
    }
}

//! Single-entry gzip "archives" (`game.nes.gz`).
//!
//! A gzip stream holds one file. Its entry name is the original file name
//! stored in the gzip header, or the archive name with `.gz` removed.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::archive::ArchiveReader;
use crate::core::source::SourceError;
use crate::core::types::has_extension;
use crate::utils::validation::MAX_ROM_SIZE;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// A decompressed gzip file
#[derive(Debug)]
pub struct GzipArchive {
    entry_name: String,
    data: Vec<u8>,
}

impl GzipArchive {
    /// Open and decompress the gzip file at `path`
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Io` if the file cannot be read,
    /// `SourceError::NotAnArchive` if it lacks the gzip magic, or
    /// `SourceError::Archive` if decompression fails.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let compressed = std::fs::read(path)?;
        let fallback = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_bytes(&compressed, &fallback)
    }

    /// Decompress an in-memory gzip stream. `archive_name` names the entry
    /// when the header carries no file name.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotAnArchive` without the gzip magic, or
    /// `SourceError::Archive` if decompression fails.
    pub fn from_bytes(compressed: &[u8], archive_name: &str) -> Result<Self, SourceError> {
        if !compressed.starts_with(&GZIP_MAGIC) {
            return Err(SourceError::NotAnArchive(archive_name.to_string()));
        }

        let mut decoder = GzDecoder::new(compressed).take(MAX_ROM_SIZE + 1);
        let mut data = Vec::new();
        decoder
            .read_to_end(&mut data)
            .map_err(|e| SourceError::Archive(format!("{archive_name}: {e}")))?;
        if data.len() as u64 > MAX_ROM_SIZE {
            return Err(SourceError::Archive(format!(
                "{archive_name}: decompressed size exceeds {MAX_ROM_SIZE} bytes"
            )));
        }

        let stored_name = decoder
            .get_ref()
            .header()
            .and_then(|h| h.filename())
            .map(|n| String::from_utf8_lossy(n).into_owned())
            .filter(|n| !n.is_empty());

        let entry_name = stored_name.unwrap_or_else(|| strip_gz_suffix(archive_name));

        Ok(Self { entry_name, data })
    }

    #[must_use]
    pub fn entry_name(&self) -> &str {
        &self.entry_name
    }
}

impl ArchiveReader for GzipArchive {
    fn list_entries(&self, extensions: &[&str]) -> Vec<String> {
        if extensions.is_empty() || has_extension(&self.entry_name, extensions) {
            vec![self.entry_name.clone()]
        } else {
            Vec::new()
        }
    }

    fn read_entry(&self, name: &str) -> Result<Vec<u8>, SourceError> {
        if name == self.entry_name {
            Ok(self.data.clone())
        } else {
            Err(SourceError::EntryNotFound(name.to_string()))
        }
    }
}

fn strip_gz_suffix(name: &str) -> String {
    let lower = name.to_lowercase();
    if lower.ends_with(".gz") {
        name[..name.len() - 3].to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::{Compression, GzBuilder};
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_entry_name_from_archive_name() {
        let archive = GzipArchive::from_bytes(&gzip(b"payload"), "Game (E).nes.gz").unwrap();
        assert_eq!(archive.entry_name(), "Game (E).nes");
        assert_eq!(archive.list_entries(&[".nes"]), vec!["Game (E).nes".to_string()]);
        assert!(archive.list_entries(&[".fds"]).is_empty());
        assert_eq!(archive.read_entry("Game (E).nes").unwrap(), b"payload");
    }

    #[test]
    fn test_entry_name_from_gzip_header() {
        let mut encoder = GzBuilder::new()
            .filename("Stored.fds")
            .write(Vec::new(), Compression::default());
        encoder.write_all(b"disk").unwrap();
        let bytes = encoder.finish().unwrap();

        let archive = GzipArchive::from_bytes(&bytes, "renamed.gz").unwrap();
        assert_eq!(archive.entry_name(), "Stored.fds");
    }

    #[test]
    fn test_missing_entry() {
        let archive = GzipArchive::from_bytes(&gzip(b"x"), "a.nes.gz").unwrap();
        assert!(matches!(
            archive.read_entry("b.nes"),
            Err(SourceError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_oversized_entry_rejected() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        let block = vec![0u8; 1024 * 1024];
        for _ in 0..=(MAX_ROM_SIZE / block.len() as u64) {
            encoder.write_all(&block).unwrap();
        }
        let bomb = encoder.finish().unwrap();

        assert!(matches!(
            GzipArchive::from_bytes(&bomb, "bomb.nes.gz"),
            Err(SourceError::Archive(_))
        ));
    }

    #[test]
    fn test_rejects_non_gzip() {
        assert!(matches!(
            GzipArchive::from_bytes(b"NES\x1a", "a.gz"),
            Err(SourceError::NotAnArchive(_))
        ));
    }
}

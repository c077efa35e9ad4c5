//! Archive access and the default local-disk source provider.
//!
//! Only the [`ArchiveReader`] contract matters to the loader and matcher.
//! [`LocalProvider`] reads plain files and single-entry gzip files; callers
//! with other archive formats implement [`SourceProvider`] themselves.

pub mod gzip;

use std::path::Path;

use tracing::debug;

use crate::core::source::{ByteSource, SourceError, SourceProvider};
use crate::core::types::{has_extension, ARCHIVE_EXTENSIONS};

pub use gzip::GzipArchive;

/// Read access to the entries of an opened archive
pub trait ArchiveReader {
    /// Entry names whose extension is in `extensions`, in archive order.
    /// An empty filter lists every entry.
    fn list_entries(&self, extensions: &[&str]) -> Vec<String>;

    /// Read the full contents of the entry `name`
    ///
    /// # Errors
    ///
    /// Returns `SourceError::EntryNotFound` if there is no such entry, or
    /// another `SourceError` if it cannot be extracted.
    fn read_entry(&self, name: &str) -> Result<Vec<u8>, SourceError>;
}

/// Reads sources from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvider;

impl LocalProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceProvider for LocalProvider {
    fn read(&self, source: &ByteSource) -> Result<Vec<u8>, SourceError> {
        match &source.inner_entry {
            None => Ok(std::fs::read(&source.container_path)?),
            Some(entry) => {
                let archive = self.open_archive(&source.container_path).ok_or_else(|| {
                    SourceError::NotAnArchive(source.container_path.display().to_string())
                })?;
                archive.read_entry(entry)
            }
        }
    }

    fn open_archive(&self, path: &Path) -> Option<Box<dyn ArchiveReader + '_>> {
        if !has_extension(&path.to_string_lossy(), ARCHIVE_EXTENSIONS) {
            return None;
        }

        match GzipArchive::open(path) {
            Ok(archive) => Some(Box::new(archive)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Not readable as an archive");
                None
            }
        }
    }
}

//! Byte sources: a file on disk, or an entry inside an archive.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::archive::ArchiveReader;

/// Separator between an archive path and an entry name in rendered sources
pub const ENTRY_SEPARATOR: &str = "!/";

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not an archive: {0}")]
    NotAnArchive(String),

    #[error("Entry not found in archive: {0}")]
    EntryNotFound(String),

    #[error("Archive error: {0}")]
    Archive(String),
}

/// Descriptor for a file, possibly nested inside an archive.
///
/// It holds no file handle; each read resolves the path again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ByteSource {
    pub container_path: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_entry: Option<String>,
}

impl ByteSource {
    /// A plain file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            container_path: path.into(),
            inner_entry: None,
        }
    }

    /// An entry inside the archive at `path`
    pub fn entry(path: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        Self {
            container_path: path.into(),
            inner_entry: Some(entry.into()),
        }
    }

    #[must_use]
    pub fn is_archive_entry(&self) -> bool {
        self.inner_entry.is_some()
    }

    /// Name of the file the bytes come from (the entry name for archive entries)
    #[must_use]
    pub fn file_name(&self) -> String {
        match &self.inner_entry {
            Some(entry) => entry.clone(),
            None => self
                .container_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// File name stripped of directory and extension
    #[must_use]
    pub fn rom_name(&self) -> String {
        file_stem(&self.file_name())
    }
}

impl fmt::Display for ByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner_entry {
            Some(entry) => write!(
                f,
                "{}{ENTRY_SEPARATOR}{entry}",
                self.container_path.display()
            ),
            None => write!(f, "{}", self.container_path.display()),
        }
    }
}

impl FromStr for ByteSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.split_once(ENTRY_SEPARATOR) {
            Some((container, entry)) if !entry.is_empty() => Self::entry(container, entry),
            _ => Self::file(s),
        })
    }
}

/// Strip directory and extension from a path-like string.
///
/// Both `/` and `\` count as directory separators, so archive entry names
/// written on another platform are handled too.
#[must_use]
pub fn file_stem(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
    match base.rfind('.') {
        Some(0) | None => base.to_string(),
        Some(idx) => base[..idx].to_string(),
    }
}

/// Reads byte sources and opens archives.
///
/// This is the seam between the identification pipeline and storage; the
/// default [`LocalProvider`](crate::archive::LocalProvider) reads the local
/// file system.
pub trait SourceProvider {
    /// Read the full contents of `source`
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` if the file, archive or entry cannot be read.
    fn read(&self, source: &ByteSource) -> Result<Vec<u8>, SourceError>;

    /// Open `path` as an archive, or `None` if it is not one
    fn open_archive(&self, path: &Path) -> Option<Box<dyn ArchiveReader + '_>>;
}

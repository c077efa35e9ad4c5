//! Folder scanning for search candidates.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::core::types::{has_extension, ARCHIVE_EXTENSIONS, ROM_EXTENSIONS};

/// Whether `path` looks like a ROM image or a supported archive
#[must_use]
pub fn is_candidate(path: &Path) -> bool {
    let name = path.to_string_lossy();
    has_extension(&name, ROM_EXTENSIONS) || has_extension(&name, ARCHIVE_EXTENSIONS)
}

/// Collect ROM and archive files under `folders`.
///
/// Files of a folder come first, sorted by name, followed by its
/// subfolders (when `recursive`) in name order. A path in `folders` that is
/// itself a candidate file is kept as is. Symlinked folders are not entered.
/// Unreadable entries are skipped.
#[must_use]
pub fn collect_rom_files(folders: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();
    for folder in folders {
        let walker = WalkDir::new(folder).max_depth(max_depth).sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(path = %folder.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if entry.path().is_file() && is_candidate(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    files
}

//! Shared fixtures: an in-memory source provider and ROM builders.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use romident::archive::ArchiveReader;
use romident::core::source::{ByteSource, SourceError, SourceProvider};
use romident::core::types::has_extension;

/// Source provider backed by maps, counting every read
#[derive(Default)]
pub struct MemoryProvider {
    files: HashMap<PathBuf, Vec<u8>>,
    archives: HashMap<PathBuf, Vec<(String, Vec<u8>)>>,
    reads: Cell<usize>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, data: Vec<u8>) -> Self {
        self.files.insert(PathBuf::from(path), data);
        self
    }

    pub fn with_archive(mut self, path: &str, entries: Vec<(&str, Vec<u8>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(name, data)| (name.to_string(), data))
            .collect();
        self.archives.insert(PathBuf::from(path), entries);
        self
    }

    /// Number of file and archive entry reads so far
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl SourceProvider for MemoryProvider {
    fn read(&self, source: &ByteSource) -> Result<Vec<u8>, SourceError> {
        self.reads.set(self.reads.get() + 1);
        match &source.inner_entry {
            None => self.files.get(&source.container_path).cloned().ok_or_else(|| {
                SourceError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    source.to_string(),
                ))
            }),
            Some(entry) => self
                .archives
                .get(&source.container_path)
                .and_then(|entries| entries.iter().find(|(name, _)| name == entry))
                .map(|(_, data)| data.clone())
                .ok_or_else(|| SourceError::EntryNotFound(entry.clone())),
        }
    }

    fn open_archive(&self, path: &Path) -> Option<Box<dyn ArchiveReader + '_>> {
        self.archives.get(path).map(|entries| {
            Box::new(MemoryArchive {
                entries,
                reads: &self.reads,
            }) as Box<dyn ArchiveReader + '_>
        })
    }
}

struct MemoryArchive<'a> {
    entries: &'a [(String, Vec<u8>)],
    reads: &'a Cell<usize>,
}

impl ArchiveReader for MemoryArchive<'_> {
    fn list_entries(&self, extensions: &[&str]) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, _)| name.clone())
            .filter(|name| extensions.is_empty() || has_extension(name, extensions))
            .collect()
    }

    fn read_entry(&self, name: &str) -> Result<Vec<u8>, SourceError> {
        self.reads.set(self.reads.get() + 1);
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| SourceError::EntryNotFound(name.to_string()))
    }
}

/// iNES image with one 16 KiB PRG bank filled with `fill`
pub fn ines_rom(fill: u8) -> Vec<u8> {
    let mut data = b"NES\x1a\x01\x00\x00\x00".to_vec();
    data.resize(16, 0);
    data.resize(16 + 16 * 1024, fill);
    data
}

/// NSF file with a valid header and a little code
pub fn nsf_rom() -> Vec<u8> {
    let mut data = vec![0u8; 0x80];
    data[..5].copy_from_slice(b"NESM\x1a");
    data[5] = 1;
    data[6] = 3;
    data[7] = 1;
    data[8..10].copy_from_slice(&0x8000u16.to_le_bytes());
    data[0x0E..0x13].copy_from_slice(b"Tunes");
    data.extend_from_slice(&[0x60; 64]);
    data
}

fn id_chunk(id: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&u32::try_from(data.len()).unwrap().to_le_bytes());
    out.extend_from_slice(data);
    out
}

/// StudyBox image with `pages` pages and a small audio chunk
pub fn studybox_image(pages: usize) -> Vec<u8> {
    let mut data = id_chunk(b"STBX", &0x100u32.to_le_bytes());
    for page in 0..pages {
        data.extend(id_chunk(b"PAGE", &[u8::try_from(page).unwrap(); 16]));
    }
    data.extend(id_chunk(b"AUDI", &[0; 20]));
    data
}

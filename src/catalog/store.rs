use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::header::{NesHeader, CHR_BANK_SIZE, PRG_BANK_SIZE};
use crate::core::types::{GameSystem, Mirroring};
use crate::utils::validation::parse_crc32;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read header database: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse header database: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid entry '{name}': {reason}")]
    InvalidEntry { name: String, reason: String },
}

/// Database version for compatibility checking
pub const HEADER_DB_VERSION: &str = "1.0.0";

/// Source of reconstructed headers for images that carry none
pub trait HeaderLookup {
    /// Header for the image whose full-buffer CRC-32 is `crc32`
    fn lookup_header(&self, crc32: u32) -> Option<NesHeader>;
}

/// TV system as written in the database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySystem {
    #[default]
    Ntsc,
    Pal,
    Vs,
}

impl From<EntrySystem> for GameSystem {
    fn from(system: EntrySystem) -> Self {
        match system {
            EntrySystem::Ntsc => GameSystem::NesNtsc,
            EntrySystem::Pal => GameSystem::NesPal,
            EntrySystem::Vs => GameSystem::VsSystem,
        }
    }
}

fn default_mirroring() -> Mirroring {
    Mirroring::Horizontal
}

/// One known headerless image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    /// CRC-32 as 8 hex digits
    pub crc32: String,
    pub name: String,
    pub mapper: u16,
    #[serde(default)]
    pub submapper: u8,
    pub prg_rom_kb: usize,
    #[serde(default)]
    pub chr_rom_kb: usize,
    #[serde(default = "default_mirroring")]
    pub mirroring: Mirroring,
    #[serde(default)]
    pub battery: bool,
    #[serde(default)]
    pub system: EntrySystem,
}

/// Largest bank count a NES 2.0 header can express
const MAX_BANKS: usize = 0xFFF;
const MAX_MAPPER: u16 = 0xFFF;
const MAX_SUBMAPPER: u8 = 0x0F;

impl HeaderEntry {
    /// Rebuild the NES 2.0 header this entry describes. Returns `None` if a
    /// size does not fit in memory.
    #[must_use]
    pub fn to_header(&self) -> Option<NesHeader> {
        let prg_rom_size = self.prg_rom_kb.checked_mul(1024)?;
        let chr_rom_size = self.chr_rom_kb.checked_mul(1024)?;
        Some(
            NesHeader::builder()
                .mapper(self.mapper, self.submapper)
                .prg_rom_size(prg_rom_size)
                .chr_rom_size(chr_rom_size)
                .mirroring(self.mirroring)
                .battery(self.battery)
                .system(self.system.into())
                .build(),
        )
    }

    /// Check that a NES 2.0 header can represent this entry exactly
    fn validate(&self) -> Result<(), String> {
        if self.prg_rom_kb == 0 {
            return Err("prg_rom_kb must be greater than zero".to_string());
        }
        check_banks("prg_rom_kb", self.prg_rom_kb, PRG_BANK_SIZE / 1024)?;
        check_banks("chr_rom_kb", self.chr_rom_kb, CHR_BANK_SIZE / 1024)?;
        if self.mapper > MAX_MAPPER {
            return Err(format!("mapper {} exceeds {MAX_MAPPER}", self.mapper));
        }
        if self.submapper > MAX_SUBMAPPER {
            return Err(format!("submapper {} exceeds {MAX_SUBMAPPER}", self.submapper));
        }
        Ok(())
    }
}

fn check_banks(field: &str, kb: usize, bank_kb: usize) -> Result<(), String> {
    if kb % bank_kb != 0 {
        return Err(format!("{field} must be a multiple of {bank_kb}"));
    }
    if kb / bank_kb > MAX_BANKS {
        return Err(format!("{field} exceeds {} KiB", MAX_BANKS * bank_kb));
    }
    Ok(())
}

/// Serializable database format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderDatabaseData {
    pub version: String,
    pub entries: Vec<HeaderEntry>,
}

/// In-memory header database indexed by CRC-32
#[derive(Debug, Default)]
pub struct HeaderDatabase {
    entries: HashMap<u32, HeaderEntry>,
}

impl HeaderDatabase {
    /// Create an empty database
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Load a database from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a database from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` for malformed JSON and
    /// `CatalogError::InvalidEntry` for an entry with a bad CRC-32 or no PRG ROM.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: HeaderDatabaseData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != HEADER_DB_VERSION {
            warn!(
                expected = HEADER_DB_VERSION,
                found = %data.version,
                "Header database version mismatch"
            );
        }

        let mut database = Self::new();
        for entry in data.entries {
            database.add_entry(entry)?;
        }
        debug!(entries = database.len(), "Loaded header database");

        Ok(database)
    }

    /// Add an entry. A CRC-32 already present keeps its first entry.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidEntry` if the CRC-32 is not valid hex, the
    /// entry declares no PRG ROM, or a size or mapper number does not fit a
    /// NES 2.0 header.
    pub fn add_entry(&mut self, entry: HeaderEntry) -> Result<(), CatalogError> {
        let crc32 = parse_crc32(&entry.crc32).map_err(|e| CatalogError::InvalidEntry {
            name: entry.name.clone(),
            reason: e.to_string(),
        })?;
        if let Err(reason) = entry.validate() {
            return Err(CatalogError::InvalidEntry {
                name: entry.name,
                reason,
            });
        }

        if let Some(existing) = self.entries.get(&crc32) {
            warn!(
                crc32 = %format!("{crc32:08X}"),
                kept = %existing.name,
                ignored = %entry.name,
                "Duplicate CRC-32 in header database"
            );
            return Ok(());
        }

        self.entries.insert(crc32, entry);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, crc32: u32) -> Option<&HeaderEntry> {
        self.entries.get(&crc32)
    }

    /// Number of entries in the database
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the database is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HeaderLookup for HeaderDatabase {
    fn lookup_header(&self, crc32: u32) -> Option<NesHeader> {
        self.get(crc32).and_then(HeaderEntry::to_header)
    }
}

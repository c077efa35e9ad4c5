use serde::Serialize;

use crate::core::hash::Sha1Hash;
use crate::core::types::{GameSystem, Mirroring, RomFormat};

/// Why a load did not produce a usable record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "message")]
pub enum FailureReason {
    /// The byte source could not be read
    UnreadableSource(String),
    /// The buffer is below the minimum size; nothing was computed
    TooShort,
    /// No signature matched and the header database had no entry
    UnrecognizedFormat,
    /// A signature matched but the format parser rejected the data
    ParserRejected(String),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnreadableSource(msg) => write!(f, "unreadable source: {msg}"),
            Self::TooShort => write!(f, "file too small to be a ROM"),
            Self::UnrecognizedFormat => write!(f, "unrecognized format"),
            Self::ParserRejected(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

/// Outcome of a single load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// A format parser accepted the data
    Loaded,
    /// No signature matched, but the header database supplied one
    RecoveredHeaderless,
    Failed(FailureReason),
}

/// Format-specific facts reported by the parsers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RomDetails {
    Ines {
        mapper: u16,
        submapper: u8,
        prg_rom_size: usize,
        chr_rom_size: usize,
        mirroring: Mirroring,
        has_battery: bool,
        has_trainer: bool,
        is_nes2: bool,
    },
    Fds {
        side_count: usize,
        has_header: bool,
    },
    Sound {
        title: String,
        artist: String,
        copyright: String,
        song_count: u8,
        starting_song: u8,
        /// Expansion audio bitfield (VRC6, VRC7, FDS, MMC5, N163, 5B)
        expansion_audio: u8,
    },
    Unif {
        board: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        prg_rom_size: usize,
        chr_rom_size: usize,
    },
    StudyBox {
        page_count: usize,
        audio_size: usize,
    },
}

/// Metadata block of a loaded ROM
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RomInfo {
    /// CRC-32 of the full buffer, present for every buffer past the size check
    #[serde(serialize_with = "serialize_crc32")]
    pub crc32: Option<u32>,

    /// SHA-1 of the full buffer, absent when the parser opts out
    pub sha1: Option<Sha1Hash>,

    pub system: GameSystem,

    pub format: Option<RomFormat>,

    /// File name without directory or extension
    pub rom_name: String,

    /// Full path of the source, including any archive entry
    pub source_path: String,

    /// Loaded without a native header, using the header database
    pub is_headerless: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<RomDetails>,
}

#[allow(clippy::ref_option)] // Signature required by serde
fn serialize_crc32<S: serde::Serializer>(crc: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
    match crc {
        Some(value) => serializer.collect_str(&format_args!("{value:08X}")),
        None => serializer.serialize_none(),
    }
}

/// Everything produced by one load call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RomRecord {
    /// The untouched source buffer
    #[serde(skip)]
    pub raw_data: Vec<u8>,

    pub info: RomInfo,

    pub status: LoadStatus,
}

impl RomRecord {
    #[must_use]
    pub fn failed(reason: FailureReason) -> Self {
        Self {
            raw_data: Vec::new(),
            info: RomInfo::default(),
            status: LoadStatus::Failed(reason),
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.status, LoadStatus::Failed(_))
    }

    #[must_use]
    pub fn failure(&self) -> Option<&FailureReason> {
        match &self.status {
            LoadStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// CRC-32 as 8 uppercase hex digits, if computed
    #[must_use]
    pub fn crc32_hex(&self) -> Option<String> {
        self.info.crc32.map(|crc| format!("{crc:08X}"))
    }
}

//! Per-format parsers for NES-family ROM containers.
//!
//! Each parser reads header-level facts from a buffer whose signature already
//! matched. Parsers never decode program banks or emulate boards.
//!
//! | Format | Module | Region source |
//! |--------|--------|---------------|
//! | iNES / NES 2.0 | [`ines`] | flags 7, byte 9 or NES 2.0 timing byte |
//! | Famicom Disk System | [`fds`] | always NTSC |
//! | NSF | [`nsf`] | region byte 0x7A |
//! | NSFe | [`nsfe`] | `INFO` chunk |
//! | UNIF | [`unif`] | `TVCI` chunk |
//! | StudyBox | [`studybox`] | always NTSC |

use std::collections::HashMap;

use thiserror::Error;

use crate::core::header::NesHeader;
use crate::core::record::RomDetails;
use crate::core::types::{GameSystem, RomFormat};

pub mod chunks;
pub mod fds;
pub mod ines;
pub mod nsf;
pub mod nsfe;
pub mod studybox;
pub mod unif;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Truncated data: needed {needed} bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Missing required chunk: {0}")]
    MissingChunk(&'static str),
}

/// What a parser learned from the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRom {
    /// Console variant, `Unknown` if the format does not say
    pub system: GameSystem,
    pub details: RomDetails,
}

/// A parser for one container format
pub trait FormatParser {
    /// The format this parser handles
    fn format(&self) -> RomFormat;

    /// Parse `data`. `header_override` replaces the native header for
    /// headerless images; only the iNES parser uses it.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the data is not valid for this format.
    fn parse(&self, data: &[u8], header_override: Option<&NesHeader>)
        -> Result<ParsedRom, ParseError>;

    /// Whether the generic SHA-1 should be skipped for this format
    fn skips_digest(&self) -> bool {
        false
    }
}

/// One parser per format
pub struct ParserSet {
    parsers: HashMap<RomFormat, Box<dyn FormatParser>>,
}

impl ParserSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// The built-in parser for every format
    #[must_use]
    pub fn standard() -> Self {
        let mut set = Self::new();
        set.register(Box::new(ines::InesParser));
        set.register(Box::new(fds::FdsParser));
        set.register(Box::new(nsf::NsfParser));
        set.register(Box::new(nsfe::NsfeParser));
        set.register(Box::new(unif::UnifParser));
        set.register(Box::new(studybox::StudyBoxParser));
        set
    }

    /// Register a parser, replacing any parser for the same format
    pub fn register(&mut self, parser: Box<dyn FormatParser>) {
        self.parsers.insert(parser.format(), parser);
    }

    #[must_use]
    pub fn get(&self, format: RomFormat) -> Option<&dyn FormatParser> {
        self.parsers.get(&format).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl Default for ParserSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Read a NUL-terminated (or NUL-padded) string field
pub(crate) fn read_c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim().to_string()
}

/// Region byte shared by NSF and NSFe: bit 1 = dual, bit 0 = PAL
pub(crate) fn sound_region(flags: u8) -> GameSystem {
    if flags & 0x02 != 0 {
        GameSystem::Unknown
    } else if flags & 0x01 != 0 {
        GameSystem::NesPal
    } else {
        GameSystem::NesNtsc
    }
}

//! The format dispatcher: bytes in, [`RomRecord`] out.

use std::fmt;

use tracing::{debug, info};

use crate::catalog::store::HeaderLookup;
use crate::core::hash::{crc32, sha1};
use crate::core::record::{FailureReason, LoadStatus, RomInfo, RomRecord};
use crate::core::source::{ByteSource, SourceProvider};
use crate::core::types::{GameSystem, RomFormat};
use crate::loading::region::infer_system;
use crate::loading::signatures::SignatureTable;
use crate::parsing::{FormatParser, ParserSet};

/// Buffers shorter than this are rejected before hashing
pub const MIN_ROM_SIZE: usize = 15;

/// How loudly a load reports progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// A user-requested load, logged at `info`
    #[default]
    Full,
    /// A candidate check during a search, logged at `debug`
    VerifyOnly,
}

/// Identifies ROM images and computes their checksums.
///
/// A load never fails with an error: every outcome, including unreadable
/// sources, ends up in [`RomRecord::status`].
pub struct RomLoader<'a> {
    provider: &'a dyn SourceProvider,
    database: &'a dyn HeaderLookup,
    signatures: SignatureTable,
    parsers: ParserSet,
    mode: LoadMode,
}

impl<'a> RomLoader<'a> {
    /// Loader with the standard signature table and parsers
    #[must_use]
    pub fn new(provider: &'a dyn SourceProvider, database: &'a dyn HeaderLookup) -> Self {
        Self {
            provider,
            database,
            signatures: SignatureTable::standard(),
            parsers: ParserSet::standard(),
            mode: LoadMode::Full,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_signatures(mut self, signatures: SignatureTable) -> Self {
        self.signatures = signatures;
        self
    }

    /// Replace the parser registered for `parser.format()`
    #[must_use]
    pub fn with_parser(mut self, parser: Box<dyn FormatParser>) -> Self {
        self.parsers.register(parser);
        self
    }

    #[must_use]
    pub fn provider(&self) -> &'a dyn SourceProvider {
        self.provider
    }

    /// Read `source` through the provider and identify it
    #[must_use]
    pub fn load(&self, source: &ByteSource) -> RomRecord {
        match self.provider.read(source) {
            Ok(data) => self.load_bytes(data, source),
            Err(e) => {
                debug!(source = %source, error = %e, "Failed to read rom source");
                RomRecord::failed(FailureReason::UnreadableSource(e.to_string()))
            }
        }
    }

    /// Identify an in-memory buffer; `source` supplies the name and path
    #[must_use]
    pub fn load_bytes(&self, data: Vec<u8>, source: &ByteSource) -> RomRecord {
        if data.len() < MIN_ROM_SIZE {
            debug!(source = %source, size = data.len(), "Rom file too small");
            return RomRecord::failed(FailureReason::TooShort);
        }

        let checksum = crc32(&data);
        let rom_name = source.rom_name();
        self.progress(format_args!("Loading rom: {rom_name}"));

        let mut info = RomInfo {
            crc32: Some(checksum),
            rom_name,
            source_path: source.to_string(),
            ..RomInfo::default()
        };

        let (format, header_override) = match self.signatures.detect(&data) {
            Some(format) => (format, None),
            None => match self.database.lookup_header(checksum) {
                Some(header) => {
                    self.progress(format_args!(
                        "[DB] Headerless ROM file found - using game database data."
                    ));
                    info.is_headerless = true;
                    (RomFormat::Ines, Some(header))
                }
                None => {
                    self.progress(format_args!("Invalid rom file."));
                    return Self::finish(data, info, LoadStatus::Failed(FailureReason::UnrecognizedFormat));
                }
            },
        };
        info.format = Some(format);

        let (parsed, skips_digest) = match self.parsers.get(format) {
            Some(parser) => (
                parser.parse(&data, header_override.as_ref()).map_err(|e| {
                    debug!(crc32 = %format!("{checksum:08X}"), format = %format, error = %e, "Parser rejected rom");
                    e.to_string()
                }),
                parser.skips_digest(),
            ),
            None => (Err(format!("No parser registered for {format}")), false),
        };

        if !skips_digest {
            info.sha1 = Some(sha1(&data));
        }

        let status = match parsed {
            Ok(parsed) => {
                info.details = Some(parsed.details);
                info.system = match parsed.system {
                    GameSystem::Unknown => infer_system(&info.source_path),
                    system => system,
                };
                if info.is_headerless {
                    LoadStatus::RecoveredHeaderless
                } else {
                    LoadStatus::Loaded
                }
            }
            Err(reason) => {
                info.system = infer_system(&info.source_path);
                LoadStatus::Failed(FailureReason::ParserRejected(reason))
            }
        };
        Self::finish(data, info, status)
    }

    fn finish(raw_data: Vec<u8>, info: RomInfo, status: LoadStatus) -> RomRecord {
        RomRecord {
            raw_data,
            info,
            status,
        }
    }

    fn progress(&self, message: fmt::Arguments<'_>) {
        match self.mode {
            LoadMode::Full => info!("{message}"),
            LoadMode::VerifyOnly => debug!("{message}"),
        }
    }
}

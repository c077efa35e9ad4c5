//! Parser for iNES and NES 2.0 cartridge images (`.nes`).
//!
//! With a header override (headerless images recovered from the header
//! database) the whole buffer is treated as payload.

use tracing::warn;

use crate::core::header::{NesHeader, HEADER_SIZE, TRAINER_SIZE};
use crate::core::record::RomDetails;
use crate::core::types::RomFormat;
use crate::parsing::{FormatParser, ParseError, ParsedRom};

#[derive(Debug, Clone, Copy, Default)]
pub struct InesParser;

impl FormatParser for InesParser {
    fn format(&self) -> RomFormat {
        RomFormat::Ines
    }

    fn parse(
        &self,
        data: &[u8],
        header_override: Option<&NesHeader>,
    ) -> Result<ParsedRom, ParseError> {
        let (header, payload_start) = match header_override {
            Some(header) => (*header, 0),
            None => {
                let header = NesHeader::from_bytes(data).ok_or(ParseError::Truncated {
                    offset: 0,
                    needed: HEADER_SIZE,
                })?;
                (header, HEADER_SIZE)
            }
        };

        if !header.has_magic() {
            return Err(ParseError::InvalidHeader("missing NES magic".to_string()));
        }

        let prg_rom_size = header.prg_rom_size();
        if prg_rom_size == 0 {
            return Err(ParseError::InvalidHeader("PRG ROM size is zero".to_string()));
        }

        // Overrides describe raw dumps, which never carry a trainer
        let trainer = if header.has_trainer() && header_override.is_none() {
            TRAINER_SIZE
        } else {
            0
        };
        let expected = payload_start + trainer + prg_rom_size + header.chr_rom_size();
        if data.len() < expected {
            warn!(
                expected,
                actual = data.len(),
                "ROM is smaller than its header declares"
            );
        }

        Ok(ParsedRom {
            system: header.game_system(),
            details: RomDetails::Ines {
                mapper: header.mapper(),
                submapper: header.submapper(),
                prg_rom_size,
                chr_rom_size: header.chr_rom_size(),
                mirroring: header.mirroring(),
                has_battery: header.has_battery(),
                has_trainer: header.has_trainer(),
                is_nes2: header.is_nes2(),
            },
        })
    }
}

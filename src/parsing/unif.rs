//! Parser for Universal NES Image Format files (`.unf`, `.unif`).
//!
//! A 32-byte header (`UNIF`, revision, padding) is followed by `id, length`
//! chunks. The board name lives in `MAPR`, program and character data in
//! `PRG0`-`PRGF` / `CHR0`-`CHRF`, and the TV system in `TVCI`.

use crate::core::header::NesHeader;
use crate::core::record::RomDetails;
use crate::core::types::{GameSystem, RomFormat};
use crate::parsing::chunks::{ChunkIter, ChunkLayout};
use crate::parsing::{read_c_string, FormatParser, ParseError, ParsedRom};

pub const UNIF_MAGIC: [u8; 4] = *b"UNIF";
pub const UNIF_HEADER_SIZE: usize = 32;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnifParser;

impl FormatParser for UnifParser {
    fn format(&self) -> RomFormat {
        RomFormat::Unif
    }

    fn parse(&self, data: &[u8], _header_override: Option<&NesHeader>) -> Result<ParsedRom, ParseError> {
        if data.len() < UNIF_HEADER_SIZE {
            return Err(ParseError::Truncated {
                offset: 0,
                needed: UNIF_HEADER_SIZE,
            });
        }

        let mut board: Option<String> = None;
        let mut name: Option<String> = None;
        let mut system = GameSystem::Unknown;
        let mut prg_rom_size = 0usize;
        let mut chr_rom_size = 0usize;

        for chunk in ChunkIter::new(data, UNIF_HEADER_SIZE, ChunkLayout::IdThenLength) {
            let chunk = chunk?;
            match &chunk.id {
                b"MAPR" => board = Some(read_c_string(chunk.data)),
                b"NAME" => name = Some(read_c_string(chunk.data)).filter(|n| !n.is_empty()),
                b"TVCI" => {
                    system = match chunk.data.first() {
                        Some(0) => GameSystem::NesNtsc,
                        Some(1) => GameSystem::NesPal,
                        _ => GameSystem::Unknown,
                    };
                }
                [b'P', b'R', b'G', bank] if bank.is_ascii_hexdigit() => {
                    prg_rom_size += chunk.data.len();
                }
                [b'C', b'H', b'R', bank] if bank.is_ascii_hexdigit() => {
                    chr_rom_size += chunk.data.len();
                }
                _ => {}
            }
        }

        let board = board
            .filter(|b| !b.is_empty())
            .ok_or(ParseError::MissingChunk("MAPR"))?;
        if prg_rom_size == 0 {
            return Err(ParseError::MissingChunk("PRG0"));
        }

        Ok(ParsedRom {
            system,
            details: RomDetails::Unif {
                board,
                name,
                prg_rom_size,
                chr_rom_size,
            },
        })
    }
}

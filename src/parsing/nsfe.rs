//! Parser for extended NES Sound Format files (`.nsfe`).
//!
//! After the `NSFE` magic come chunks laid out as `length, id, data`. `INFO`
//! and `DATA` are required, `NEND` terminates the file and `auth` carries up
//! to four NUL-separated strings (title, artist, copyright, ripper).

use crate::core::header::NesHeader;
use crate::core::record::RomDetails;
use crate::core::types::RomFormat;
use crate::parsing::chunks::{ChunkIter, ChunkLayout};
use crate::parsing::{sound_region, FormatParser, ParseError, ParsedRom};

pub const NSFE_MAGIC: [u8; 4] = *b"NSFE";

/// Minimum `INFO` size: load, init and play addresses, region, expansion, song count
const MIN_INFO_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, Default)]
pub struct NsfeParser;

impl FormatParser for NsfeParser {
    fn format(&self) -> RomFormat {
        RomFormat::Nsfe
    }

    fn parse(&self, data: &[u8], _header_override: Option<&NesHeader>) -> Result<ParsedRom, ParseError> {
        let mut info: Option<&[u8]> = None;
        let mut has_data = false;
        let mut strings: Vec<String> = Vec::new();

        for chunk in ChunkIter::new(data, NSFE_MAGIC.len(), ChunkLayout::LengthThenId) {
            let chunk = chunk?;
            match &chunk.id {
                b"INFO" => info = Some(chunk.data),
                b"DATA" => has_data = !chunk.data.is_empty(),
                b"auth" => {
                    strings = chunk
                        .data
                        .split(|&b| b == 0)
                        .map(|s| String::from_utf8_lossy(s).trim().to_string())
                        .collect();
                }
                b"NEND" => break,
                _ => {}
            }
        }

        let info = info.ok_or(ParseError::MissingChunk("INFO"))?;
        if !has_data {
            return Err(ParseError::MissingChunk("DATA"));
        }
        if info.len() < MIN_INFO_SIZE {
            return Err(ParseError::InvalidHeader(format!(
                "INFO chunk is {} bytes, expected at least {MIN_INFO_SIZE}",
                info.len()
            )));
        }

        let song_count = info[8];
        let starting_song = info.get(9).map_or(1, |&s| s.saturating_add(1));
        let string_at = |idx: usize| strings.get(idx).cloned().unwrap_or_default();

        Ok(ParsedRom {
            system: sound_region(info[6]),
            details: RomDetails::Sound {
                title: string_at(0),
                artist: string_at(1),
                copyright: string_at(2),
                song_count,
                starting_song,
                expansion_audio: info[7],
            },
        })
    }
}

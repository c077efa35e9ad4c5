//! Parser for NES Sound Format files (`.nsf`).

use crate::core::header::NesHeader;
use crate::core::record::RomDetails;
use crate::core::types::RomFormat;
use crate::parsing::chunks::read_u16_le;
use crate::parsing::{read_c_string, sound_region, FormatParser, ParseError, ParsedRom};

pub const NSF_MAGIC: [u8; 5] = *b"NESM\x1a";
pub const NSF_HEADER_SIZE: usize = 0x80;

const TITLE_OFFSET: usize = 0x0E;
const ARTIST_OFFSET: usize = 0x2E;
const COPYRIGHT_OFFSET: usize = 0x4E;
const STRING_LEN: usize = 32;
const LOAD_ADDRESS_OFFSET: usize = 0x08;
const REGION_OFFSET: usize = 0x7A;
const EXPANSION_OFFSET: usize = 0x7B;

#[derive(Debug, Clone, Copy, Default)]
pub struct NsfParser;

impl FormatParser for NsfParser {
    fn format(&self) -> RomFormat {
        RomFormat::Nsf
    }

    fn parse(&self, data: &[u8], _header_override: Option<&NesHeader>) -> Result<ParsedRom, ParseError> {
        if data.len() < NSF_HEADER_SIZE {
            return Err(ParseError::Truncated {
                offset: 0,
                needed: NSF_HEADER_SIZE,
            });
        }

        let song_count = data[6];
        if song_count == 0 {
            return Err(ParseError::InvalidHeader("song count is zero".to_string()));
        }

        let load_address = read_u16_le(data, LOAD_ADDRESS_OFFSET).unwrap_or(0);
        if load_address < 0x6000 {
            return Err(ParseError::InvalidHeader(format!(
                "load address ${load_address:04X} is below $6000"
            )));
        }

        let string_at = |offset: usize| read_c_string(&data[offset..offset + STRING_LEN]);

        Ok(ParsedRom {
            system: sound_region(data[REGION_OFFSET]),
            details: RomDetails::Sound {
                title: string_at(TITLE_OFFSET),
                artist: string_at(ARTIST_OFFSET),
                copyright: string_at(COPYRIGHT_OFFSET),
                song_count,
                starting_song: data[7],
                expansion_audio: data[EXPANSION_OFFSET],
            },
        })
    }
}

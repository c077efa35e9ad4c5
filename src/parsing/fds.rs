//! Parser for Famicom Disk System images (`.fds`).
//!
//! Images come with a 16-byte `FDS\x1A` header or bare, starting directly
//! with the disk info block (`0x01 *NINTENDO-HVC*`). Each side is 65500 bytes.

use crate::core::record::RomDetails;
use crate::core::header::NesHeader;
use crate::core::types::{GameSystem, RomFormat};
use crate::parsing::{FormatParser, ParseError, ParsedRom};

pub const FDS_MAGIC: [u8; 4] = *b"FDS\x1a";
pub const DISK_INFO_MAGIC: &[u8; 15] = b"\x01*NINTENDO-HVC*";
pub const FDS_HEADER_SIZE: usize = 16;
pub const SIDE_SIZE: usize = 65_500;

#[derive(Debug, Clone, Copy, Default)]
pub struct FdsParser;

impl FormatParser for FdsParser {
    fn format(&self) -> RomFormat {
        RomFormat::Fds
    }

    fn parse(&self, data: &[u8], _header_override: Option<&NesHeader>) -> Result<ParsedRom, ParseError> {
        let has_header = data.starts_with(&FDS_MAGIC);
        let disk = if has_header {
            data.get(FDS_HEADER_SIZE..).ok_or(ParseError::Truncated {
                offset: 0,
                needed: FDS_HEADER_SIZE,
            })?
        } else {
            data
        };

        if !disk.starts_with(DISK_INFO_MAGIC) {
            return Err(ParseError::InvalidHeader(
                "disk does not start with a disk info block".to_string(),
            ));
        }

        let measured_sides = disk.len().div_ceil(SIDE_SIZE);
        let side_count = if has_header && data[4] > 0 {
            usize::from(data[4])
        } else {
            measured_sides
        };

        Ok(ParsedRom {
            system: GameSystem::NesNtsc,
            details: RomDetails::Fds {
                side_count,
                has_header,
            },
        })
    }
}

//! Parser for StudyBox cassette images (`.studybox`).
//!
//! The file is a sequence of `id, length` chunks: an `STBX` header, one
//! `PAGE` chunk per data page and a final `AUDI` chunk with the tape audio.
//! These images are addressed by their own page data, so the loader skips the
//! generic SHA-1 for them.

use crate::core::header::NesHeader;
use crate::core::record::RomDetails;
use crate::core::types::{GameSystem, RomFormat};
use crate::parsing::chunks::{ChunkIter, ChunkLayout};
use crate::parsing::{FormatParser, ParseError, ParsedRom};

pub const STUDYBOX_MAGIC: [u8; 4] = *b"STBX";

/// `PAGE` chunks start with lead-in and data offsets
const PAGE_PREFIX_SIZE: usize = 8;
/// `AUDI` chunks start with the audio container type
const AUDIO_PREFIX_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct StudyBoxParser;

impl FormatParser for StudyBoxParser {
    fn format(&self) -> RomFormat {
        RomFormat::StudyBox
    }

    fn parse(&self, data: &[u8], _header_override: Option<&NesHeader>) -> Result<ParsedRom, ParseError> {
        let mut chunks = ChunkIter::new(data, 0, ChunkLayout::IdThenLength);

        match chunks.next() {
            Some(Ok(chunk)) if chunk.is(&STUDYBOX_MAGIC) => {}
            Some(Err(e)) => return Err(e),
            _ => return Err(ParseError::MissingChunk("STBX")),
        }

        let mut page_count = 0usize;
        let mut audio_size: Option<usize> = None;

        for chunk in chunks {
            let chunk = chunk?;
            match &chunk.id {
                b"PAGE" => {
                    if chunk.data.len() < PAGE_PREFIX_SIZE {
                        return Err(ParseError::InvalidHeader(format!(
                            "PAGE chunk at offset {} is too small",
                            chunk.offset
                        )));
                    }
                    page_count += 1;
                }
                b"AUDI" => {
                    audio_size = Some(chunk.data.len().saturating_sub(AUDIO_PREFIX_SIZE));
                }
                _ => {}
            }
        }

        if page_count == 0 {
            return Err(ParseError::MissingChunk("PAGE"));
        }
        let audio_size = audio_size.ok_or(ParseError::MissingChunk("AUDI"))?;

        Ok(ParsedRom {
            system: GameSystem::NesNtsc,
            details: RomDetails::StudyBox {
                page_count,
                audio_size,
            },
        })
    }

    fn skips_digest(&self) -> bool {
        true
    }
}

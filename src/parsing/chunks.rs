//! Bounds-checked walker for the chunked layouts used by NSFe, UNIF and StudyBox.
//!
//! All three use a 4-byte ASCII id and a little-endian `u32` length, but NSFe
//! puts the length first.

use crate::parsing::ParseError;

/// Size of a chunk header (id + length)
pub const CHUNK_HEADER_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkLayout {
    /// `id[4] length[4] data` (UNIF, StudyBox)
    IdThenLength,
    /// `length[4] id[4] data` (NSFe)
    LengthThenId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub id: [u8; 4],
    /// Offset of the chunk header in the buffer
    pub offset: usize,
    pub data: &'a [u8],
}

impl Chunk<'_> {
    #[must_use]
    pub fn is(&self, id: &[u8; 4]) -> bool {
        &self.id == id
    }
}

/// Iterator over chunks starting at a given offset.
///
/// Fewer than [`CHUNK_HEADER_SIZE`] trailing bytes end the walk; a chunk
/// whose length runs past the buffer yields `ParseError::Truncated` and
/// stops the iteration.
pub struct ChunkIter<'a> {
    data: &'a [u8],
    pos: usize,
    layout: ChunkLayout,
    done: bool,
}

impl<'a> ChunkIter<'a> {
    #[must_use]
    pub fn new(data: &'a [u8], start: usize, layout: ChunkLayout) -> Self {
        Self {
            data,
            pos: start,
            layout,
            done: false,
        }
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<Chunk<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.data.len().saturating_sub(self.pos) < CHUNK_HEADER_SIZE {
            return None;
        }

        let header = &self.data[self.pos..self.pos + CHUNK_HEADER_SIZE];
        let (id_bytes, len_bytes) = match self.layout {
            ChunkLayout::IdThenLength => (&header[..4], &header[4..]),
            ChunkLayout::LengthThenId => (&header[4..], &header[..4]),
        };

        let mut id = [0u8; 4];
        id.copy_from_slice(id_bytes);
        let length = read_u32_le(len_bytes, 0).unwrap_or(0) as usize;

        let start = self.pos + CHUNK_HEADER_SIZE;
        let Some(end) = start.checked_add(length).filter(|&end| end <= self.data.len()) else {
            self.done = true;
            return Some(Err(ParseError::Truncated {
                offset: start,
                needed: length,
            }));
        };

        let chunk = Chunk {
            id,
            offset: self.pos,
            data: &self.data[start..end],
        };
        self.pos = end;
        Some(Ok(chunk))
    }
}

/// Read a little-endian `u16` at `offset`
#[must_use]
pub fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read a little-endian `u32` at `offset`
#[must_use]
pub fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_first(id: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut out = id.to_vec();
        out.extend_from_slice(&u32::try_from(data.len()).unwrap().to_le_bytes());
        out.extend_from_slice(data);
        out
    }

    #[test]
    fn test_walks_id_then_length() {
        let mut buf = b"HEAD".to_vec();
        buf.extend(id_first(b"MAPR", b"NROM\0"));
        buf.extend(id_first(b"PRG0", &[0xEA; 16]));

        let chunks: Vec<_> = ChunkIter::new(&buf, 4, ChunkLayout::IdThenLength)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].is(b"MAPR"));
        assert_eq!(chunks[0].offset, 4);
        assert_eq!(chunks[1].data.len(), 16);
    }

    #[test]
    fn test_walks_length_then_id() {
        let mut buf = 3u32.to_le_bytes().to_vec();
        buf.extend_from_slice(b"DATA");
        buf.extend_from_slice(&[1, 2, 3]);

        let chunk = ChunkIter::new(&buf, 0, ChunkLayout::LengthThenId)
            .next()
            .unwrap()
            .unwrap();
        assert!(chunk.is(b"DATA"));
        assert_eq!(chunk.data, &[1, 2, 3]);
    }

    #[test]
    fn test_overlong_chunk_is_truncated() {
        let mut buf = b"PRG0".to_vec();
        buf.extend_from_slice(&1000u32.to_le_bytes());
        buf.extend_from_slice(&[0; 10]);

        let mut iter = ChunkIter::new(&buf, 0, ChunkLayout::IdThenLength);
        assert_eq!(
            iter.next(),
            Some(Err(ParseError::Truncated {
                offset: 8,
                needed: 1000
            }))
        );
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_trailing_padding_ends_walk() {
        let mut buf = id_first(b"NAME", b"x");
        buf.extend_from_slice(&[0, 0, 0]);
        assert_eq!(ChunkIter::new(&buf, 0, ChunkLayout::IdThenLength).count(), 1);
    }

    #[test]
    fn test_read_le_helpers() {
        let data = [0x34, 0x12, 0x78, 0x56];
        assert_eq!(read_u16_le(&data, 0), Some(0x1234));
        assert_eq!(read_u32_le(&data, 0), Some(0x5678_1234));
        assert_eq!(read_u16_le(&data, 3), None);
    }
}

//! Magic-byte signature table used to pick a format parser.

use thiserror::Error;

use crate::core::types::RomFormat;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SignatureTableError {
    #[error("Empty signature pattern for {0}")]
    EmptyPattern(RomFormat),

    #[error("Signature patterns for {first} and {second} overlap")]
    Overlap { first: RomFormat, second: RomFormat },
}

/// One `(pattern, format)` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub pattern: &'static [u8],
    pub format: RomFormat,
}

impl Signature {
    #[must_use]
    pub const fn new(pattern: &'static [u8], format: RomFormat) -> Self {
        Self { pattern, format }
    }
}

/// Built-in signatures, checked in this order
pub const STANDARD_SIGNATURES: &[Signature] = &[
    Signature::new(b"NES\x1a", RomFormat::Ines),
    Signature::new(b"FDS\x1a", RomFormat::Fds),
    Signature::new(b"\x01*NINTENDO-HVC*", RomFormat::Fds),
    Signature::new(b"NESM\x1a", RomFormat::Nsf),
    Signature::new(b"NSFE", RomFormat::Nsfe),
    Signature::new(b"UNIF", RomFormat::Unif),
    Signature::new(b"STBX", RomFormat::StudyBox),
];

/// Ordered signature table; the first matching row wins.
///
/// Patterns of different formats may not be prefixes of one another, so the
/// result of [`detect`](Self::detect) does not depend on row order.
#[derive(Debug, Clone)]
pub struct SignatureTable {
    entries: Vec<Signature>,
}

impl SignatureTable {
    /// Build a table, rejecting empty patterns and overlapping formats
    ///
    /// # Errors
    ///
    /// Returns `SignatureTableError` if a pattern is empty or two patterns of
    /// different formats overlap.
    pub fn new(entries: Vec<Signature>) -> Result<Self, SignatureTableError> {
        for (i, a) in entries.iter().enumerate() {
            if a.pattern.is_empty() {
                return Err(SignatureTableError::EmptyPattern(a.format));
            }
            for b in &entries[i + 1..] {
                if a.format != b.format
                    && (a.pattern.starts_with(b.pattern) || b.pattern.starts_with(a.pattern))
                {
                    return Err(SignatureTableError::Overlap {
                        first: a.format,
                        second: b.format,
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// The built-in table covering all six formats
    #[must_use]
    pub fn standard() -> Self {
        // Checked by test_standard_table_is_exclusive
        Self {
            entries: STANDARD_SIGNATURES.to_vec(),
        }
    }

    /// Format whose signature prefixes `data`, if any
    #[must_use]
    pub fn detect(&self, data: &[u8]) -> Option<RomFormat> {
        self.entries
            .iter()
            .find(|sig| data.starts_with(sig.pattern))
            .map(|sig| sig.format)
    }

    #[must_use]
    pub fn entries(&self) -> &[Signature] {
        &self.entries
    }
}

impl Default for SignatureTable {
    fn default() -> Self {
        Self::standard()
    }
}

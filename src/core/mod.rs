//! Core data types for ROM identification.
//!
//! - [`ByteSource`](source::ByteSource): a file or an archive entry to read bytes from
//! - [`RomRecord`](record::RomRecord): everything produced by one load
//! - [`NesHeader`](header::NesHeader): the 16-byte iNES / NES 2.0 header
//! - [`TargetIdentity`](hash::TargetIdentity): CRC-32 / SHA-1 pair to search for
//! - [`GameSystem`](types::GameSystem), [`RomFormat`](types::RomFormat): classification enums
//!
//! ## Identity
//!
//! Every buffer that passes the size check gets a CRC-32. The SHA-1 is computed
//! for every format except StudyBox images, which carry their own content
//! addressing.

pub mod hash;
pub mod header;
pub mod record;
pub mod source;
pub mod types;

//! Header database for images stored without their native header.
//!
//! Some dumps are raw PRG/CHR data with the 16-byte iNES header stripped.
//! They can only be loaded if their CRC-32 is known, so the loader asks a
//! [`HeaderLookup`](store::HeaderLookup) for a reconstructed header when no
//! signature matches.
//!
//! ## Database Format
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "entries": [
//!     { "crc32": "1A2B3C4D", "name": "Game", "mapper": 1,
//!       "prg_rom_kb": 128, "chr_rom_kb": 0, "mirroring": "vertical",
//!       "battery": true, "system": "ntsc" }
//!   ]
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use romident::catalog::store::{HeaderDatabase, HeaderLookup};
//! use std::path::Path;
//!
//! let db = HeaderDatabase::load_from_file(Path::new("headers.json")).unwrap();
//! if let Some(header) = db.lookup_header(0x1A2B_3C4D) {
//!     println!("mapper {}", header.mapper());
//! }
//! ```

pub mod store;

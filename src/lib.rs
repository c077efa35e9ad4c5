//! # romident
//!
//! A library for identifying NES-family ROM images and finding them again by
//! checksum.
//!
//! ROM collections are full of renamed files, re-compressed copies and dumps
//! with missing or altered headers. `romident` recognizes an image by its
//! magic bytes, computes a CRC-32 and SHA-1 over the raw data, and can search
//! many candidate files (including gzip files) for the one matching a known
//! checksum.
//!
//! ## Features
//!
//! - **Signature dispatch**: iNES/NES 2.0, FDS, NSF, NSFe, UNIF and StudyBox
//! - **Headerless recovery**: rebuilds iNES headers from a JSON header database
//! - **Region inference**: falls back to dump naming tags like `(E)` or `(VS)`
//! - **Bounded search**: checks at most a fixed number of files per search
//!
//! ## Example
//!
//! ```rust,no_run
//! use romident::{ByteSource, HeaderDatabase, LocalProvider, RomLoader};
//!
//! let provider = LocalProvider::new();
//! let database = HeaderDatabase::new();
//! let loader = RomLoader::new(&provider, &database);
//!
//! let record = loader.load(&ByteSource::file("roms/Game (E).nes"));
//! println!("{}: {:?} {}", record.info.rom_name, record.crc32_hex(), record.info.system);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Records, hashes, headers and byte sources
//! - [`parsing`]: Per-format header parsers
//! - [`loading`]: Signature dispatch and the loader
//! - [`matching`]: Bounded search for matching files
//! - [`catalog`]: Header database for headerless images
//! - [`archive`]: Local file and gzip access
//! - [`video`]: Frame hand-off to a rendering device
//! - [`cli`]: Command-line interface implementation

pub mod archive;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod loading;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod video;

// Re-export commonly used types for convenience
pub use archive::LocalProvider;
pub use catalog::store::{HeaderDatabase, HeaderLookup};
pub use core::hash::{Sha1Hash, TargetIdentity};
pub use core::record::{FailureReason, LoadStatus, RomInfo, RomRecord};
pub use core::source::{ByteSource, SourceProvider};
pub use core::types::*;
pub use loading::{LoadMode, RomLoader};
pub use matching::{RomMatcher, SearchOutcome, SearchReport};

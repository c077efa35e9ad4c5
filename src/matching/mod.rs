//! Bounded search for a file whose contents match a known identity.
//!
//! - [`RomMatcher`]: loads candidates in verify-only mode and compares checksums
//! - [`SearchBudget`]: caps the number of load attempts across one search
//! - [`collect_rom_files`]: gathers candidates from folders
//!
//! ## Search Algorithm
//!
//! 1. **Fast mode** skips candidates whose name does not match the target name
//! 2. Each remaining candidate is loaded; archives are opened and each ROM
//!    entry is loaded in turn
//! 3. Every load costs one unit of budget; a match is a successful load whose
//!    CRC-32 or SHA-1 equals the target's
//!
//! ## Example
//!
//! ```rust,no_run
//! use romident::archive::LocalProvider;
//! use romident::catalog::store::HeaderDatabase;
//! use romident::core::hash::TargetIdentity;
//! use romident::matching::{collect_rom_files, RomMatcher};
//! use std::path::PathBuf;
//!
//! let provider = LocalProvider::new();
//! let database = HeaderDatabase::new();
//! let matcher = RomMatcher::new(&provider, &database);
//!
//! let candidates = collect_rom_files(&[PathBuf::from("roms")], true);
//! let target = TargetIdentity::from_crc32(0x1A2B_3C4D);
//! if let Some(source) = matcher.find_match(&candidates, "Game (E).nes", &target, false) {
//!     println!("found {source}");
//! }
//! ```

pub mod budget;
pub mod candidates;
pub mod engine;

pub use budget::{BudgetExhausted, SearchBudget, MAX_FILES_TO_CHECK};
pub use candidates::collect_rom_files;
pub use engine::{RomMatcher, SearchConfig, SearchOutcome, SearchReport};

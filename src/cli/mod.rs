//! Command-line interface for romident.
//!
//! Available commands:
//!
//! - **identify**: Identify a ROM image and print its checksums
//! - **find**: Search folders for the file matching a CRC-32 or SHA-1
//!
//! ## Usage
//!
//! ```text
//! # Identify a ROM
//! romident identify "roms/Game (E).nes"
//!
//! # Identify an entry inside a gzip file
//! romident identify roms/game.nes.gz --entry game.nes
//!
//! # JSON output for scripting
//! romident identify game.nes --format json
//!
//! # Find a renamed copy by checksum
//! romident find --dir roms --dir more-roms --name "Game (E).nes" --crc32 1A2B3C4D
//! ```

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::catalog::store::HeaderDatabase;

pub mod find;
pub mod identify;

#[derive(Parser)]
#[command(name = "romident")]
#[command(version)]
#[command(about = "Identify NES-family ROM images and find them by checksum")]
#[command(
    long_about = "romident recognizes iNES, FDS, NSF, NSFe, UNIF and StudyBox images by their signature, computes their CRC-32 and SHA-1, and can search folders and gzip files for the image matching a known checksum.\n\nHeaderless iNES dumps are recognized through an optional JSON header database."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify a ROM image
    Identify(identify::IdentifyArgs),

    /// Find the file matching a CRC-32 or SHA-1
    Find(find::FindArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load the header database from `path`, or start with an empty one
pub(crate) fn load_database(path: Option<&Path>, verbose: bool) -> anyhow::Result<HeaderDatabase> {
    let Some(path) = path else {
        return Ok(HeaderDatabase::new());
    };

    let database = HeaderDatabase::load_from_file(path)
        .with_context(|| format!("Failed to load header database {}", path.display()))?;
    if verbose {
        eprintln!("Loaded header database with {} entries", database.len());
    }
    Ok(database)
}

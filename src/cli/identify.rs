use std::path::PathBuf;

use clap::Args;

use crate::archive::LocalProvider;
use crate::cli::{load_database, OutputFormat};
use crate::core::hash::Sha1Hash;
use crate::core::record::{RomDetails, RomRecord};
use crate::core::source::{ByteSource, SourceProvider};
use crate::core::types::ROM_EXTENSIONS;
use crate::loading::RomLoader;

#[derive(Args)]
pub struct IdentifyArgs {
    /// ROM image, or a gzip file containing one
    #[arg(required = true)]
    pub input: PathBuf,

    /// Entry to read from inside an archive (defaults to the first ROM entry)
    #[arg(long)]
    pub entry: Option<String>,

    /// Path to a JSON header database for headerless images
    #[arg(long)]
    pub database: Option<PathBuf>,
}

/// Execute identify subcommand
///
/// # Errors
///
/// Returns an error if the header database cannot be loaded or the ROM
/// cannot be identified.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IdentifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let database = load_database(args.database.as_deref(), verbose)?;
    let provider = LocalProvider::new();
    let loader = RomLoader::new(&provider, &database);

    let source = resolve_source(&provider, &args);
    if verbose {
        eprintln!("Reading {source}");
    }

    let record = loader.load(&source);
    if let Some(reason) = record.failure() {
        anyhow::bail!("Failed to identify {source}: {reason}");
    }

    match format {
        OutputFormat::Text => print_text(&record),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Tsv => print_tsv(&record),
    }

    Ok(())
}

/// Use the requested entry, or the first ROM entry of an archive input
fn resolve_source(provider: &LocalProvider, args: &IdentifyArgs) -> ByteSource {
    if let Some(entry) = &args.entry {
        return ByteSource::entry(&args.input, entry.as_str());
    }

    provider
        .open_archive(&args.input)
        .and_then(|archive| archive.list_entries(ROM_EXTENSIONS).into_iter().next())
        .map_or_else(
            || ByteSource::file(&args.input),
            |entry| ByteSource::entry(&args.input, entry),
        )
}

fn print_text(record: &RomRecord) {
    let info = &record.info;
    println!("Name:       {}", info.rom_name);
    println!("Path:       {}", info.source_path);
    if let Some(format) = info.format {
        println!("Format:     {format}");
    }
    println!("System:     {}", info.system);
    println!("CRC-32:     {}", record.crc32_hex().unwrap_or_default());
    match &info.sha1 {
        Some(sha1) => println!("SHA-1:      {sha1}"),
        None => println!("SHA-1:      (not computed)"),
    }
    println!("Headerless: {}", if info.is_headerless { "yes" } else { "no" });

    let Some(details) = &info.details else {
        return;
    };
    println!();
    match details {
        RomDetails::Ines {
            mapper,
            submapper,
            prg_rom_size,
            chr_rom_size,
            mirroring,
            has_battery,
            has_trainer,
            is_nes2,
        } => {
            println!("   Mapper: {mapper} (submapper {submapper})");
            println!("   PRG ROM: {} KiB", prg_rom_size / 1024);
            println!("   CHR ROM: {} KiB", chr_rom_size / 1024);
            println!("   Mirroring: {mirroring}");
            println!("   Battery: {has_battery}");
            println!("   Trainer: {has_trainer}");
            println!("   NES 2.0: {is_nes2}");
        }
        RomDetails::Fds {
            side_count,
            has_header,
        } => {
            println!("   Disk sides: {side_count}");
            println!("   FDS header: {has_header}");
        }
        RomDetails::Sound {
            title,
            artist,
            copyright,
            song_count,
            starting_song,
            expansion_audio,
        } => {
            println!("   Title: {title}");
            println!("   Artist: {artist}");
            println!("   Copyright: {copyright}");
            println!("   Songs: {song_count} (starting at {starting_song})");
            println!("   Expansion audio: {expansion_audio:#04x}");
        }
        RomDetails::Unif {
            board,
            name,
            prg_rom_size,
            chr_rom_size,
        } => {
            println!("   Board: {board}");
            if let Some(name) = name {
                println!("   Title: {name}");
            }
            println!("   PRG ROM: {} KiB", prg_rom_size / 1024);
            println!("   CHR ROM: {} KiB", chr_rom_size / 1024);
        }
        RomDetails::StudyBox {
            page_count,
            audio_size,
        } => {
            println!("   Pages: {page_count}");
            println!("   Audio: {audio_size} bytes");
        }
    }
}

fn print_tsv(record: &RomRecord) {
    let info = &record.info;
    println!("name\tpath\tformat\tsystem\tcrc32\tsha1\theaderless");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        info.rom_name,
        info.source_path,
        info.format.map(|f| f.to_string()).unwrap_or_default(),
        info.system,
        record.crc32_hex().unwrap_or_default(),
        info.sha1.as_ref().map(Sha1Hash::to_hex).unwrap_or_default(),
        info.is_headerless,
    );
}

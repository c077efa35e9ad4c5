use std::path::PathBuf;

use clap::Args;

use crate::archive::LocalProvider;
use crate::cli::{load_database, OutputFormat};
use crate::core::hash::TargetIdentity;
use crate::matching::{collect_rom_files, RomMatcher, SearchConfig, SearchOutcome, SearchReport};
use crate::utils::validation::validate_attempt_limit;

/// Which candidates a search looks at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchMode {
    /// Fast pass on the name first, then every candidate
    #[default]
    Auto,
    /// Only candidates named like --name
    Fast,
    /// Every candidate
    Slow,
}

#[derive(Args)]
pub struct FindArgs {
    /// Folder (or file) to search; may be repeated
    #[arg(short, long = "dir", required = true)]
    pub dirs: Vec<PathBuf>,

    /// File name of the ROM being searched for, e.g. "Game (E).nes"
    #[arg(short, long)]
    pub name: Option<String>,

    /// Target CRC-32 (hex)
    #[arg(long)]
    pub crc32: Option<String>,

    /// Target SHA-1 (40 hex digits)
    #[arg(long)]
    pub sha1: Option<String>,

    /// Search mode
    #[arg(long, value_enum, default_value = "auto")]
    pub mode: SearchMode,

    /// Maximum number of files checked per search pass
    #[arg(long, default_value = "100")]
    pub max_attempts: usize,

    /// Do not descend into subfolders
    #[arg(long)]
    pub no_recursive: bool,

    /// Path to a JSON header database for headerless images
    #[arg(long)]
    pub database: Option<PathBuf>,
}

/// Execute find subcommand
///
/// # Errors
///
/// Returns an error if the arguments are invalid, the header database cannot
/// be loaded, or no matching file is found.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FindArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let target = TargetIdentity::from_hex(args.crc32.as_deref(), args.sha1.as_deref())?;
    if target.is_empty() {
        anyhow::bail!("At least one of --crc32 or --sha1 is required");
    }
    let name = args.name.as_deref().unwrap_or_default();
    if args.mode == SearchMode::Fast && name.is_empty() {
        anyhow::bail!("--mode fast requires --name");
    }

    let config = SearchConfig {
        max_attempts: validate_attempt_limit(args.max_attempts)?,
    };

    let database = load_database(args.database.as_deref(), verbose)?;
    let provider = LocalProvider::new();
    let matcher = RomMatcher::new(&provider, &database).with_config(config);

    let candidates = collect_rom_files(&args.dirs, !args.no_recursive);
    if verbose {
        eprintln!("Found {} candidate files", candidates.len());
    }

    let report = match args.mode {
        SearchMode::Auto => matcher.locate(&candidates, name, &target),
        SearchMode::Fast => matcher.search(&candidates, name, &target, true),
        SearchMode::Slow => matcher.search(&candidates, name, &target, false),
    };

    match format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Tsv => print_tsv(&report),
    }

    match report.outcome {
        SearchOutcome::Found(_) => Ok(()),
        SearchOutcome::NotFound => anyhow::bail!("No matching file found"),
        SearchOutcome::BudgetExhausted => anyhow::bail!(
            "No matching file found within {} attempts",
            config.max_attempts
        ),
    }
}

fn outcome_label(outcome: &SearchOutcome) -> &'static str {
    match outcome {
        SearchOutcome::Found(_) => "found",
        SearchOutcome::NotFound => "not_found",
        SearchOutcome::BudgetExhausted => "budget_exhausted",
    }
}

fn print_text(report: &SearchReport) {
    match &report.outcome {
        SearchOutcome::Found(source) => println!("Found: {source}"),
        SearchOutcome::NotFound => println!("No match"),
        SearchOutcome::BudgetExhausted => println!("No match (search budget exhausted)"),
    }
    println!("Attempts: {}", report.attempts);
}

fn print_json(report: &SearchReport) -> anyhow::Result<()> {
    let source = match &report.outcome {
        SearchOutcome::Found(source) => Some(source.to_string()),
        SearchOutcome::NotFound | SearchOutcome::BudgetExhausted => None,
    };
    let json = serde_json::json!({
        "outcome": outcome_label(&report.outcome),
        "source": source,
        "attempts": report.attempts,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_tsv(report: &SearchReport) {
    let source = match &report.outcome {
        SearchOutcome::Found(source) => source.to_string(),
        SearchOutcome::NotFound | SearchOutcome::BudgetExhausted => String::new(),
    };
    println!("outcome\tsource\tattempts");
    println!(
        "{}\t{source}\t{}",
        outcome_label(&report.outcome),
        report.attempts
    );
}

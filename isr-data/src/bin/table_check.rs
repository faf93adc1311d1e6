use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use isr_data::BracketTableLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validate ISR bracket tables stored in a CSV file.
///
/// The CSV file should have the following columns:
/// - period: `monthly` or `annual`
/// - lower_bound: The inclusive floor of the bracket
/// - upper_bound: The inclusive ceiling (empty for unlimited)
/// - base_amount: The fixed tax for this bracket
/// - rate_percent: The marginal rate in percent (e.g., 10.88)
#[derive(Parser, Debug)]
#[command(name = "isr-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing bracket data
    #[arg(short, long)]
    file: PathBuf,

    /// Print every bracket, not just the per-table summary
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();

    let args = Args::parse();

    info!("Checking bracket tables in: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = BracketTableLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    info!("Parsed {} records from CSV", records.len());

    let tables = BracketTableLoader::build(&records)
        .with_context(|| format!("Invalid bracket table in: {}", args.file.display()))?;

    if tables.is_empty() {
        anyhow::bail!("no brackets found in {}", args.file.display());
    }

    for (period, table) in &tables {
        info!("{} table: {} brackets, contiguous", period, table.len());
        if args.verbose {
            for bracket in table.brackets() {
                let upper = if bracket.is_unbounded() {
                    "and above".to_string()
                } else {
                    bracket.upper_bound.to_string()
                };
                info!(
                    "  {:>14} {:>14} base {:>12} rate {:>6}%",
                    bracket.lower_bound, upper, bracket.base_amount, bracket.marginal_rate_percent
                );
            }
        }
    }

    Ok(())
}

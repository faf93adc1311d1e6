use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use isr_cli::app::{InputForm, Session};
use isr_cli::config::{AppConfig, ConfigOverrides};
use isr_cli::entitlement::Tier;
use isr_cli::utils::{format_money, format_percent};
use isr_cli::{csv_loader, logging};
use isr_core::PayPeriod;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// ISR withholding and IMSS contribution estimator for Mexican payroll.
///
/// Uses the built-in 2025 withholding tables unless a bracket table CSV is
/// given. Settings come from an optional TOML file; flags override it.
#[derive(Debug, Parser)]
#[command(name = "isr-calc", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pay period of the gross amount and bracket table.
    #[arg(long, global = true, value_parser = parse_period)]
    period: Option<PayPeriod>,

    /// Bracket table CSV to use instead of the built-in tables.
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `isr_core=trace`. RUST_LOG wins when set.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Hide log output on the terminal.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate ISR, IMSS and net pay for one gross amount.
    Calc(CalcArgs),
    /// Calculate every row of an inputs CSV and print the history.
    Batch(BatchArgs),
    /// Print the active bracket table.
    Table,
}

#[derive(Debug, Args)]
struct CalcArgs {
    /// Gross pay; thousands separators are allowed ("10,000.50").
    #[arg(long)]
    gross: String,

    /// Manual deductions subtracted before tax.
    #[arg(long, default_value = "0")]
    deductions: String,

    /// Withhold the worker's IMSS contribution.
    #[arg(long)]
    imss: bool,

    /// Days worked in the month; `--gross` is then the monthly salary.
    #[arg(long)]
    days: Option<u32>,

    /// Apply the employment subsidy credit.
    #[arg(long)]
    subsidy: bool,

    /// Subscription tier deciding which outputs are produced.
    #[arg(long, value_enum)]
    tier: Option<Tier>,

    /// Directory for text reports.
    #[arg(long)]
    report_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// CSV with columns gross_pay, manual_deductions, apply_contribution.
    #[arg(long)]
    file: PathBuf,

    /// Apply the employment subsidy credit.
    #[arg(long)]
    subsidy: bool,
}

fn parse_period(s: &str) -> Result<PayPeriod, String> {
    PayPeriod::parse(s).ok_or_else(|| format!("unknown period '{s}', expected monthly or annual"))
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_calc(
    mut session: Session,
    args: CalcArgs,
) -> anyhow::Result<()> {
    let form = InputForm {
        gross_pay: args.gross,
        manual_deductions: args.deductions,
        apply_contribution: args.imss,
        days_worked: args.days,
    };
    let inputs = match form.validate(session.config().period) {
        Ok(inputs) => inputs,
        Err(errors) => bail!("invalid input:\n  {}", errors.join("\n  ")),
    };

    let outcome = session.calculate(&inputs, Local::now())?;

    println!("{}", outcome.summary);
    if let Some(chart) = &outcome.chart {
        println!();
        println!("{}", chart.render(40));
    }
    if let Some(path) = &outcome.report_path {
        println!();
        println!("Report saved to {}", path.display());
    }
    if let Some(notice) = outcome.notice {
        println!();
        println!("{notice}");
    }
    Ok(())
}

fn run_batch(
    mut session: Session,
    args: BatchArgs,
) -> anyhow::Result<()> {
    let rows = csv_loader::load_from_file(&args.file)
        .with_context(|| format!("failed to load inputs from '{}'", args.file.display()))?;
    if rows.is_empty() {
        warn!(file = %args.file.display(), "no input rows");
        return Ok(());
    }

    let summary = session.run_batch(&rows, Local::now())?;

    println!("{}", session.history().render());
    for (row, error) in &summary.rejected {
        println!("row {row} skipped: {error}");
    }
    Ok(())
}

fn run_table(session: &Session) {
    let table = session.table();
    println!("ISR {} table ({} brackets)", table.period(), table.len());
    println!(
        "{:>16} {:>16} {:>14} {:>8}",
        "Lower", "Upper", "Base", "Rate"
    );
    for bracket in table.brackets() {
        let upper = if bracket.is_unbounded() {
            "and above".to_string()
        } else {
            format_money(bracket.upper_bound)
        };
        println!(
            "{:>16} {:>16} {:>14} {:>8}",
            format_money(bracket.lower_bound),
            upper,
            format_money(bracket.base_amount),
            format_percent(bracket.marginal_rate_percent)
        );
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (apply_subsidy, tier, report_dir) = match &cli.command {
        Command::Calc(args) => (args.subsidy, args.tier, args.report_dir.clone()),
        Command::Batch(args) => (args.subsidy, None, None),
        Command::Table => (false, None, None),
    };

    let config = AppConfig::load(cli.config.as_deref())?.apply_overrides(ConfigOverrides {
        period: cli.period,
        apply_subsidy,
        tier,
        report_dir,
        table_file: cli.table.clone(),
        log_level: cli.log_level.clone(),
    });

    logging::init(&config.log_level, config.log_file.as_deref(), !cli.quiet)?;
    debug!(?config, "effective configuration");

    let session = Session::new(config)?;
    info!(
        period = %session.config().period,
        tier = %session.config().tier,
        "isr-calc ready"
    );

    match cli.command {
        Command::Calc(args) => run_calc(session, args),
        Command::Batch(args) => run_batch(session, args),
        Command::Table => {
            run_table(&session);
            Ok(())
        }
    }
}

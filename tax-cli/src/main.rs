use std::io;
use std::str::FromStr;

use clap::Parser;
use rust_decimal::Decimal;
use tax_core::FilingStatus;
use tracing::debug;

use tax_cli::utils::parse_income;
use tax_cli::{Prompter, RunOptions, app, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// US federal income tax calculator for the 2009 tax year.
///
/// Prompts for a filing status and taxable income, then prints the tax owed
/// under the 2009 rate schedules. Answers given as flags are not prompted for.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version, about)]
struct Cli {
    /// Filing status: S, MFJ, MFS, HOH, or a menu number 1-4.
    #[arg(long, value_parser = FilingStatus::from_str)]
    status: Option<FilingStatus>,

    /// Taxable income in USD (commas allowed, must not be negative).
    #[arg(long, value_parser = parse_income, allow_hyphen_values = true)]
    income: Option<Decimal>,

    /// Also print the per-bracket breakdown with marginal and effective rates.
    #[arg(long)]
    breakdown: bool,

    /// Log filter (e.g. `debug` or `tax_cli=trace`). Overrides `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref())?;
    debug!(?cli, "parsed command line");

    let options = RunOptions {
        status: cli.status,
        income: cli.income,
        breakdown: cli.breakdown,
    };

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    app::run(&options, &mut prompter)?;

    Ok(())
}

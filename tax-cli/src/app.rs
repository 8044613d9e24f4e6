use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tax_core::schedules;
use tax_core::{FilingStatus, compute_breakdown, try_compute_tax};
use tracing::{debug, info};

use crate::prompt::Prompter;
use crate::report::TaxReport;

/// Answers supplied up front; anything left as `None` is prompted for.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub status: Option<FilingStatus>,
    pub income: Option<Decimal>,
    pub breakdown: bool,
}

/// Runs one calculation session: gather inputs, compute, print the report.
pub fn run<R: BufRead, W: Write>(
    options: &RunOptions,
    prompter: &mut Prompter<R, W>,
) -> Result<TaxReport> {
    prompter.banner()?;

    let status = match options.status {
        Some(status) => status,
        None => prompter.filing_status()?,
    };
    let income = match options.income {
        Some(income) => income,
        None => prompter.taxable_income()?,
    };

    let table = schedules::lookup(status);
    debug!(
        status = status.as_str(),
        year = table.tax_year(),
        segments = table.segments().len(),
        "selected bracket table"
    );

    let tax = try_compute_tax(income, table)
        .with_context(|| format!("failed to compute tax on {income}"))?;
    info!(status = status.as_str(), %income, %tax, "calculated tax");

    let mut report = TaxReport::new(status, income, tax);
    if options.breakdown {
        let breakdown = compute_breakdown(income, table)
            .with_context(|| format!("failed to break down tax on {income}"))?;
        report = report.with_breakdown(breakdown);
    }

    prompter.show(&report)?;
    Ok(report)
}

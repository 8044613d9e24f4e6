//! Progressive bracket tax.
//!
//! Each segment of a [`BracketTable`] taxes only the slice of income that
//! falls inside it:
//!
//! ```text
//! tax = Σ max(0, min(income, upper_bound) - lower_bound) × rate / 100
//! ```
//!
//! The top segment has no upper bound, so everything above the last boundary
//! is taxed at the top rate. A boundary amount is taxed entirely at the lower
//! segment's rate, and the total is continuous and non-decreasing in income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::schedules::lookup;
//! use tax_core::{FilingStatus, compute_tax};
//!
//! let table = lookup(FilingStatus::Single);
//!
//! // 835.00 at 10% + 3,840.00 at 15% + 4,012.50 at 25%
//! assert_eq!(compute_tax(dec!(50000), table), dec!(8687.50));
//! assert_eq!(compute_tax(dec!(8351), table), dec!(835.15));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::trace;

use crate::TaxError;
use crate::calculations::common::percentage_of;
use crate::models::{BracketSegment, BracketTable, FilingStatus};

/// Computes the exact tax owed on `income` under `table`.
///
/// Segments whose lower bound is at or above `income` contribute nothing, so
/// the walk stops at the first of them. Negative income yields zero; use
/// [`try_compute_tax`] to reject it instead.
///
/// # Panics
///
/// Panics when the tax overflows `Decimal`, which needs an income near
/// `Decimal::MAX / 100`. [`try_compute_tax`] reports that case as an error.
pub fn compute_tax(
    income: Decimal,
    table: &BracketTable,
) -> Decimal {
    table
        .segments()
        .iter()
        .take_while(|segment| income > segment.lower_bound)
        .map(|segment| segment.tax_on(income))
        .sum()
}

/// Like [`compute_tax`], but rejects negative income and never panics.
///
/// # Errors
///
/// Returns [`TaxError::NegativeIncome`] when `income` is below zero and
/// [`TaxError::AmountOutOfRange`] when the tax does not fit in a `Decimal`.
pub fn try_compute_tax(
    income: Decimal,
    table: &BracketTable,
) -> Result<Decimal, TaxError> {
    if income < Decimal::ZERO {
        return Err(TaxError::NegativeIncome(income));
    }
    table
        .segments()
        .iter()
        .take_while(|segment| income > segment.lower_bound)
        .try_fold(Decimal::ZERO, |total, segment| {
            segment
                .checked_tax_on(income)
                .and_then(|tax| total.checked_add(tax))
        })
        .ok_or(TaxError::AmountOutOfRange(income))
}

/// The part of an income taxed by a single segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSlice {
    pub rate: Decimal,
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,

    /// Income inside this segment.
    pub taxed_amount: Decimal,

    /// `taxed_amount` at `rate`.
    pub tax: Decimal,
}

/// Per-segment view of a progressive tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxBreakdown {
    pub filing_status: FilingStatus,
    pub income: Decimal,

    /// Only segments that tax a non-zero amount, lowest first.
    pub slices: Vec<BracketSlice>,

    /// Equal to [`compute_tax`] for the same inputs.
    pub total_tax: Decimal,

    /// Rate applied to the top slice of income.
    pub marginal_rate: Decimal,

    /// `total_tax` as a percentage of `income`; zero for zero income.
    pub effective_rate: Decimal,
}

/// Computes tax along with the slice each segment contributed.
///
/// # Errors
///
/// Fails the same way as [`try_compute_tax`].
pub fn compute_breakdown(
    income: Decimal,
    table: &BracketTable,
) -> Result<TaxBreakdown, TaxError> {
    let total_tax = try_compute_tax(income, table)?;

    let slices: Vec<BracketSlice> = table
        .segments()
        .iter()
        .take_while(|segment| income > segment.lower_bound)
        .map(|segment| slice_of(segment, income))
        .collect();

    let marginal_rate = table
        .marginal_segment(income)
        .map_or(Decimal::ZERO, |segment| segment.rate);

    trace!(
        status = table.filing_status().as_str(),
        %income,
        %total_tax,
        slices = slices.len(),
        "computed bracket breakdown"
    );

    Ok(TaxBreakdown {
        filing_status: table.filing_status(),
        income,
        slices,
        total_tax,
        marginal_rate,
        effective_rate: percentage_of(total_tax, income),
    })
}

fn slice_of(
    segment: &BracketSegment,
    income: Decimal,
) -> BracketSlice {
    BracketSlice {
        rate: segment.rate,
        lower_bound: segment.lower_bound,
        upper_bound: segment.upper_bound,
        taxed_amount: segment.taxable_portion(income),
        tax: segment.tax_on(income),
    }
}

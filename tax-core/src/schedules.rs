//! Published 2009 tax rate schedules.
//!
//! | Rate | Single            | Married Filing Jointly | Married Filing Separately | Head of Household |
//! |------|-------------------|------------------------|---------------------------|-------------------|
//! | 10%  | 0 – 8,350         | 0 – 16,700             | 0 – 8,350                 | 0 – 11,950        |
//! | 15%  | 8,350 – 33,950    | 16,700 – 67,900        | 8,350 – 33,950            | 11,950 – 45,500   |
//! | 25%  | 33,950 – 82,250   | 67,900 – 137,050       | 33,950 – 68,525           | 45,500 – 117,450  |
//! | 28%  | 82,250 – 171,550  | 137,050 – 208,850      | 68,525 – 104,425          | 117,450 – 190,200 |
//! | 33%  | 171,550 – 372,950 | 208,850 – 372,950      | 104,425 – 186,475         | 190,200 – 372,950 |
//! | 35%  | over 372,950      | over 372,950           | over 186,475              | over 372,950      |
//!
//! Married Filing Jointly also covers Qualifying Widow(er).

use std::sync::LazyLock;

use rust_decimal::Decimal;

use crate::error::TaxError;
use crate::models::{BracketSegment, BracketTable, FilingStatus};

pub const TAX_YEAR: i32 = 2009;

/// A schedule line as printed: whole-dollar bounds and a whole-percent rate.
#[derive(Clone, Copy)]
struct ScheduleRow {
    rate: u32,
    lower: u32,
    upper: Option<u32>,
}

const fn row(
    rate: u32,
    lower: u32,
    upper: Option<u32>,
) -> ScheduleRow {
    ScheduleRow { rate, lower, upper }
}

const SINGLE: [ScheduleRow; 6] = [
    row(10, 0, Some(8_350)),
    row(15, 8_350, Some(33_950)),
    row(25, 33_950, Some(82_250)),
    row(28, 82_250, Some(171_550)),
    row(33, 171_550, Some(372_950)),
    row(35, 372_950, None),
];

const MARRIED_FILING_JOINTLY: [ScheduleRow; 6] = [
    row(10, 0, Some(16_700)),
    row(15, 16_700, Some(67_900)),
    row(25, 67_900, Some(137_050)),
    row(28, 137_050, Some(208_850)),
    row(33, 208_850, Some(372_950)),
    row(35, 372_950, None),
];

const MARRIED_FILING_SEPARATELY: [ScheduleRow; 6] = [
    row(10, 0, Some(8_350)),
    row(15, 8_350, Some(33_950)),
    row(25, 33_950, Some(68_525)),
    row(28, 68_525, Some(104_425)),
    row(33, 104_425, Some(186_475)),
    row(35, 186_475, None),
];

const HEAD_OF_HOUSEHOLD: [ScheduleRow; 6] = [
    row(10, 0, Some(11_950)),
    row(15, 11_950, Some(45_500)),
    row(25, 45_500, Some(117_450)),
    row(28, 117_450, Some(190_200)),
    row(33, 190_200, Some(372_950)),
    row(35, 372_950, None),
];

fn build(
    filing_status: FilingStatus,
    rows: &[ScheduleRow],
) -> BracketTable {
    let segments = rows
        .iter()
        .map(|line| {
            BracketSegment::new(
                Decimal::from(line.rate),
                Decimal::from(line.lower),
                line.upper.map(Decimal::from),
            )
        })
        .collect();
    BracketTable::from_schedule(TAX_YEAR, filing_status, segments)
}

static SINGLE_TABLE: LazyLock<BracketTable> =
    LazyLock::new(|| build(FilingStatus::Single, &SINGLE));
static MARRIED_FILING_JOINTLY_TABLE: LazyLock<BracketTable> =
    LazyLock::new(|| build(FilingStatus::MarriedFilingJointly, &MARRIED_FILING_JOINTLY));
static MARRIED_FILING_SEPARATELY_TABLE: LazyLock<BracketTable> =
    LazyLock::new(|| build(FilingStatus::MarriedFilingSeparately, &MARRIED_FILING_SEPARATELY));
static HEAD_OF_HOUSEHOLD_TABLE: LazyLock<BracketTable> =
    LazyLock::new(|| build(FilingStatus::HeadOfHousehold, &HEAD_OF_HOUSEHOLD));

/// Returns the 2009 bracket table for `status`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::FilingStatus;
/// use tax_core::schedules::lookup;
///
/// let table = lookup(FilingStatus::HeadOfHousehold);
///
/// assert_eq!(table.segments()[0].upper_bound, Some(dec!(11950)));
/// assert_eq!(table.top_rate(), Some(dec!(35)));
/// ```
pub fn lookup(status: FilingStatus) -> &'static BracketTable {
    match status {
        FilingStatus::Single => LazyLock::force(&SINGLE_TABLE),
        FilingStatus::MarriedFilingJointly => LazyLock::force(&MARRIED_FILING_JOINTLY_TABLE),
        FilingStatus::MarriedFilingSeparately => LazyLock::force(&MARRIED_FILING_SEPARATELY_TABLE),
        FilingStatus::HeadOfHousehold => LazyLock::force(&HEAD_OF_HOUSEHOLD_TABLE),
    }
}

/// Looks up a table by status code (`S`, `MFJ`, `MFS`, `HOH`).
///
/// # Errors
///
/// Returns [`TaxError::InvalidStatus`] when `code` is not one of the fixed codes.
pub fn lookup_code(code: &str) -> Result<&'static BracketTable, TaxError> {
    FilingStatus::parse(code)
        .map(lookup)
        .ok_or_else(|| TaxError::InvalidStatus(code.to_string()))
}

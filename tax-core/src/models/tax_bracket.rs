use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::calculations::common::{apply_rate, checked_apply_rate};
use crate::models::FilingStatus;

/// Violations of the bracket table shape, reported for the first offending segment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table has no segments")]
    EmptyTable,

    #[error("segment {index} has rate {rate}, expected a percentage between 0 and 100")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("first segment starts at {0}, expected 0")]
    NonZeroFirstLowerBound(Decimal),

    #[error("segment {index} upper bound does not exceed its lower bound")]
    InvertedSegment { index: usize },

    #[error("segment {index} does not start where the previous segment ends")]
    NonContiguous { index: usize },

    #[error("segment {index} has a lower rate than the segment before it")]
    DecreasingRate { index: usize },

    #[error("segment {index} is unbounded but is not the last segment")]
    UnboundedBeforeEnd { index: usize },

    #[error("last segment must be unbounded")]
    MissingUnboundedTop,
}

/// One marginal-rate slice of a tax schedule.
///
/// `rate` is a percentage (`10` means 10%). An `upper_bound` of `None` marks
/// the unbounded top segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketSegment {
    pub rate: Decimal,
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
}

impl BracketSegment {
    pub fn new(
        rate: Decimal,
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
    ) -> Self {
        Self {
            rate,
            lower_bound,
            upper_bound,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper_bound.is_none()
    }

    /// Portion of `income` that falls inside this segment:
    /// `max(0, min(income, upper_bound) - lower_bound)`.
    pub fn taxable_portion(
        &self,
        income: Decimal,
    ) -> Decimal {
        let ceiling = match self.upper_bound {
            Some(upper) => income.min(upper),
            None => income,
        };
        (ceiling - self.lower_bound).max(Decimal::ZERO)
    }

    /// Tax owed on the portion of `income` inside this segment.
    pub fn tax_on(
        &self,
        income: Decimal,
    ) -> Decimal {
        apply_rate(self.taxable_portion(income), self.rate)
    }

    /// [`tax_on`](Self::tax_on) that returns `None` when the tax overflows.
    pub fn checked_tax_on(
        &self,
        income: Decimal,
    ) -> Option<Decimal> {
        checked_apply_rate(self.taxable_portion(income), self.rate)
    }

    /// Whether the top slice of `income` lands in this segment.
    ///
    /// A boundary value belongs to the lower segment, so the range is
    /// `(lower_bound, upper_bound]`.
    pub fn holds_top_slice_of(
        &self,
        income: Decimal,
    ) -> bool {
        income > self.lower_bound && self.upper_bound.is_none_or(|upper| income <= upper)
    }
}

/// Ordered, contiguous marginal-rate schedule for one filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    tax_year: i32,
    filing_status: FilingStatus,
    segments: Vec<BracketSegment>,
}

impl BracketTable {
    /// Builds a table, rejecting segment lists that break the schedule shape.
    ///
    /// # Errors
    ///
    /// Returns the first [`BracketTableError`] found while walking the
    /// segments from lowest to highest.
    pub fn new(
        tax_year: i32,
        filing_status: FilingStatus,
        segments: Vec<BracketSegment>,
    ) -> Result<Self, BracketTableError> {
        validate_segments(&segments)?;
        Ok(Self::from_schedule(tax_year, filing_status, segments))
    }

    /// Builds a table from published schedule data without re-validating it.
    pub(crate) fn from_schedule(
        tax_year: i32,
        filing_status: FilingStatus,
        segments: Vec<BracketSegment>,
    ) -> Self {
        Self {
            tax_year,
            filing_status,
            segments,
        }
    }

    pub fn validate(&self) -> Result<(), BracketTableError> {
        validate_segments(&self.segments)
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    pub fn filing_status(&self) -> FilingStatus {
        self.filing_status
    }

    pub fn segments(&self) -> &[BracketSegment] {
        &self.segments
    }

    /// Rate of the unbounded top segment.
    pub fn top_rate(&self) -> Option<Decimal> {
        self.segments.last().map(|s| s.rate)
    }

    /// Segment that taxes the top slice of `income`. Zero or negative income
    /// maps to the first segment.
    pub fn marginal_segment(
        &self,
        income: Decimal,
    ) -> Option<&BracketSegment> {
        self.segments
            .iter()
            .find(|s| s.holds_top_slice_of(income))
            .or_else(|| self.segments.first())
    }
}

fn validate_segments(segments: &[BracketSegment]) -> Result<(), BracketTableError> {
    let first = segments.first().ok_or(BracketTableError::EmptyTable)?;
    if first.lower_bound != Decimal::ZERO {
        return Err(BracketTableError::NonZeroFirstLowerBound(first.lower_bound));
    }

    let last_index = segments.len() - 1;
    for (index, segment) in segments.iter().enumerate() {
        if segment.rate < Decimal::ZERO || segment.rate > Decimal::ONE_HUNDRED {
            return Err(BracketTableError::RateOutOfRange {
                index,
                rate: segment.rate,
            });
        }

        match segment.upper_bound {
            Some(upper) if upper <= segment.lower_bound => {
                return Err(BracketTableError::InvertedSegment { index });
            }
            None if index != last_index => {
                return Err(BracketTableError::UnboundedBeforeEnd { index });
            }
            _ => {}
        }

        if index > 0 {
            let previous = &segments[index - 1];
            if previous.upper_bound != Some(segment.lower_bound) {
                return Err(BracketTableError::NonContiguous { index });
            }
            if segment.rate < previous.rate {
                return Err(BracketTableError::DecreasingRate { index });
            }
        }
    }

    if !segments[last_index].is_unbounded() {
        return Err(BracketTableError::MissingUnboundedTop);
    }

    Ok(())
}

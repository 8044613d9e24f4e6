//! Tax calculation over the bracket schedules.

pub mod common;
pub mod progressive;

pub use progressive::{
    BracketSlice, TaxBreakdown, compute_breakdown, compute_tax, try_compute_tax,
};

//! Progressive federal income tax for the 2009 tax year.
//!
//! [`schedules`] holds the published bracket tables for each
//! [`FilingStatus`], and [`calculations`] applies them to a taxable income.

pub mod calculations;
pub mod error;
pub mod models;
pub mod schedules;

pub use calculations::{TaxBreakdown, compute_breakdown, compute_tax, try_compute_tax};
pub use error::TaxError;
pub use models::*;

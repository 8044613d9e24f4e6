use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced by the tax core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    /// A filing status tag outside the fixed set reached a lookup.
    #[error("unknown filing status '{0}'")]
    InvalidStatus(String),

    /// Income below zero was passed to a guarded calculation.
    #[error("taxable income cannot be negative: {0}")]
    NegativeIncome(Decimal),

    /// The tax on this income does not fit in a `Decimal`.
    #[error("tax on income {0} is outside the representable range")]
    AmountOutOfRange(Decimal),
}

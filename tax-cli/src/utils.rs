use rust_decimal::Decimal;
use tax_core::FilingStatus;
use tax_core::calculations::common::round_half_up;
use thiserror::Error;

/// Reasons a line typed at a prompt is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("choice {0} is not between 1 and 4")]
    InvalidChoice(i64),

    #[error("'{0}' is not a valid number")]
    InvalidNumericInput(String),

    #[error("income cannot be negative ({0})")]
    NegativeIncome(Decimal),

    #[error("income {0} is too large to compute tax on")]
    IncomeTooLarge(Decimal),
}

/// Normalizes input for decimal parsing: trims whitespace, a leading dollar
/// sign, and commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim_start()
        .replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and scientific
/// notation (e.g. `"5e4"`). Empty input is rejected.
pub fn parse_decimal(s: &str) -> Result<Decimal, InputError> {
    let normalized = normalize_decimal_input(s);
    normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|e| {
            tracing::debug!(input = %s.trim(), "invalid decimal: {}", e);
            InputError::InvalidNumericInput(s.trim().to_string())
        })
}

/// Parses a taxable income, rejecting negative amounts and amounts whose tax
/// at a 100% rate would not fit in a [`Decimal`].
pub fn parse_income(s: &str) -> Result<Decimal, InputError> {
    let income = parse_decimal(s)?;
    if income < Decimal::ZERO {
        return Err(InputError::NegativeIncome(income));
    }
    if income.checked_mul(Decimal::ONE_HUNDRED).is_none() {
        return Err(InputError::IncomeTooLarge(income));
    }
    Ok(income)
}

/// Parses a filing status menu number (1-4).
pub fn parse_choice(s: &str) -> Result<FilingStatus, InputError> {
    let trimmed = s.trim();
    let choice: i64 = trimmed
        .parse()
        .map_err(|_| InputError::InvalidNumericInput(trimmed.to_string()))?;

    u8::try_from(choice)
        .ok()
        .and_then(FilingStatus::from_choice)
        .ok_or(InputError::InvalidChoice(choice))
}

/// Formats an amount with thousands separators and exactly two decimals,
/// rounding half-up: `1234567.891` becomes `"1,234,567.89"`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

/// Formats a percentage rate without trailing zeros: `17.375` becomes `"17.38%"`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", round_half_up(rate).normalize())
}

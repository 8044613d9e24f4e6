use std::fmt;

use rust_decimal::Decimal;
use tax_core::{FilingStatus, TaxBreakdown};

use crate::prompt::RULE;
use crate::utils::{format_currency, format_rate};

/// Result printed at the end of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxReport {
    pub filing_status: FilingStatus,
    pub income: Decimal,
    pub tax: Decimal,
    pub breakdown: Option<TaxBreakdown>,
}

impl TaxReport {
    pub fn new(
        filing_status: FilingStatus,
        income: Decimal,
        tax: Decimal,
    ) -> Self {
        Self {
            filing_status,
            income,
            tax,
            breakdown: None,
        }
    }

    pub fn with_breakdown(
        mut self,
        breakdown: TaxBreakdown,
    ) -> Self {
        self.breakdown = Some(breakdown);
        self
    }
}

impl fmt::Display for TaxReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "\n{RULE}")?;
        writeln!(f, "Filing Status: {}", self.filing_status)?;
        writeln!(f, "Taxable Income: ${}", format_currency(self.income))?;
        writeln!(f, "Calculated Tax: ${}", format_currency(self.tax))?;

        if let Some(breakdown) = &self.breakdown {
            writeln!(f, "\nBracket Breakdown:")?;
            for slice in &breakdown.slices {
                writeln!(
                    f,
                    "  {:>4} on ${} = ${}",
                    format_rate(slice.rate),
                    format_currency(slice.taxed_amount),
                    format_currency(slice.tax)
                )?;
            }
            writeln!(f, "Marginal Rate: {}", format_rate(breakdown.marginal_rate))?;
            writeln!(f, "Effective Rate: {}", format_rate(breakdown.effective_rate))?;
        }

        writeln!(f, "{RULE}")
    }
}

//! Interactive console prompts.
//!
//! Each prompt re-asks until the typed line parses. Rejected lines are
//! reported back to the user and never reach the calculator.

use std::io::{self, BufRead, Write};

use rust_decimal::Decimal;
use tax_core::FilingStatus;
use thiserror::Error;
use tracing::debug;

use crate::report::TaxReport;
use crate::utils::{InputError, parse_choice, parse_income};

/// Horizontal rule framing the banner and the report.
pub const RULE: &str = "==================================================";

const STATUS_PROMPT: &str = "\nEnter your filing status (1-4): ";
const INCOME_PROMPT: &str = "\nEnter your taxable income (in USD): $";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("input ended before a valid {0} was entered")]
    EndOfInput(&'static str),
}

/// Reads answers from `input` and writes prompts and messages to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(
        input: R,
        output: W,
    ) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn banner(&mut self) -> Result<(), PromptError> {
        writeln!(self.output, "US Federal Income Tax Calculator (2009 Tax Year)")?;
        writeln!(self.output, "{RULE}")?;
        Ok(())
    }

    /// Shows the status menu and asks until a choice between 1 and 4 is entered.
    pub fn filing_status(&mut self) -> Result<FilingStatus, PromptError> {
        writeln!(self.output, "\nFiling Status Options:")?;
        for status in FilingStatus::all() {
            writeln!(self.output, "{} - {}", status.choice(), status.label())?;
        }
        self.ask_until(STATUS_PROMPT, "filing status", parse_choice)
    }

    /// Asks until a non-negative income is entered.
    pub fn taxable_income(&mut self) -> Result<Decimal, PromptError> {
        self.ask_until(INCOME_PROMPT, "taxable income", parse_income)
    }

    pub fn show(
        &mut self,
        report: &TaxReport,
    ) -> Result<(), PromptError> {
        write!(self.output, "{report}")?;
        self.output.flush()?;
        Ok(())
    }

    fn ask_until<T>(
        &mut self,
        prompt: &str,
        what: &'static str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<T, PromptError> {
        loop {
            let line = self.read_line(prompt, what)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    debug!(%error, input = line.trim(), "re-prompting for {what}");
                    writeln!(self.output, "{}", retry_message(&error))?;
                }
            }
        }
    }

    fn read_line(
        &mut self,
        prompt: &str,
        what: &'static str,
    ) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput(what));
        }
        Ok(line)
    }
}

fn retry_message(error: &InputError) -> &'static str {
    match error {
        InputError::InvalidChoice(_) => "Please enter a number between 1 and 4.",
        InputError::InvalidNumericInput(_) => "Please enter a valid number.",
        InputError::NegativeIncome(_) => "Income cannot be negative.",
        InputError::IncomeTooLarge(_) => "Income is too large to calculate.",
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output_of(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).expect("prompts are UTF-8")
    }

    #[test]
    fn banner_prints_title_and_rule() {
        let mut p = prompter("");

        p.banner().unwrap();

        assert_eq!(
            output_of(p),
            format!("US Federal Income Tax Calculator (2009 Tax Year)\n{RULE}\n")
        );
    }

    #[test]
    fn filing_status_lists_all_options() {
        let mut p = prompter("2\n");

        let status = p.filing_status().unwrap();

        assert_eq!(status, FilingStatus::MarriedFilingJointly);
        let output = output_of(p);
        assert!(output.contains("1 - Single\n"));
        assert!(output.contains("2 - Married Filing Jointly or Qualifying Widow(er)\n"));
        assert!(output.contains("3 - Married Filing Separately\n"));
        assert!(output.contains("4 - Head of Household\n"));
    }

    #[test]
    fn filing_status_reprompts_until_valid() {
        let mut p = prompter("abc\n9\n\n3\n");

        let status = p.filing_status().unwrap();

        assert_eq!(status, FilingStatus::MarriedFilingSeparately);
        let output = output_of(p);
        assert_eq!(output.matches(STATUS_PROMPT).count(), 4);
        assert_eq!(output.matches("Please enter a valid number.").count(), 2);
        assert_eq!(output.matches("Please enter a number between 1 and 4.").count(), 1);
    }

    #[test]
    fn taxable_income_reprompts_on_negative_and_garbage() {
        let mut p = prompter("-5\nlots\n50,000.25\n");

        let income = p.taxable_income().unwrap();

        assert_eq!(income, dec!(50000.25));
        let output = output_of(p);
        assert_eq!(output.matches(INCOME_PROMPT).count(), 3);
        assert!(output.contains("Income cannot be negative.\n"));
        assert!(output.contains("Please enter a valid number.\n"));
    }

    #[test]
    fn taxable_income_reprompts_when_too_large() {
        let mut p = prompter("1e28
75000
");

        let income = p.taxable_income().unwrap();

        assert_eq!(income, dec!(75000));
        let output = output_of(p);
        assert_eq!(output.matches(INCOME_PROMPT).count(), 2);
        assert!(output.contains("Income is too large to calculate.\n"));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut p = prompter("7\n");

        let result = p.filing_status();

        assert!(matches!(result, Err(PromptError::EndOfInput("filing status"))));
    }
}

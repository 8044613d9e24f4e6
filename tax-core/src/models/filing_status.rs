use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
}

impl FilingStatus {
    /// All statuses in menu order.
    pub fn all() -> &'static [FilingStatus] {
        &[
            FilingStatus::Single,
            FilingStatus::MarriedFilingJointly,
            FilingStatus::MarriedFilingSeparately,
            FilingStatus::HeadOfHousehold,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "S" => Some(Self::Single),
            "MFJ" => Some(Self::MarriedFilingJointly),
            "MFS" => Some(Self::MarriedFilingSeparately),
            "HOH" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }

    /// Menu number shown to the user (1-4).
    pub fn choice(&self) -> u8 {
        match self {
            Self::Single => 1,
            Self::MarriedFilingJointly => 2,
            Self::MarriedFilingSeparately => 3,
            Self::HeadOfHousehold => 4,
        }
    }

    pub fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Self::Single),
            2 => Some(Self::MarriedFilingJointly),
            3 => Some(Self::MarriedFilingSeparately),
            4 => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }

    /// Label used in the filing status menu.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly or Qualifying Widow(er)",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
        }
    }

    /// Compact label used on the printed report.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Joint",
            Self::MarriedFilingSeparately => "Married Separate",
            Self::HeadOfHousehold => "Head Household",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.short_label())
    }
}

/// Accepts a status code (`S`, `MFJ`, `MFS`, `HOH`, any case) or a menu number.
impl FromStr for FilingStatus {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let by_code = Self::parse(&trimmed.to_ascii_uppercase());
        let by_choice = || trimmed.parse::<u8>().ok().and_then(Self::from_choice);

        by_code
            .or_else(by_choice)
            .ok_or_else(|| TaxError::InvalidStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn codes_round_trip_through_parse() {
        for status in FilingStatus::all() {
            assert_eq!(FilingStatus::parse(status.as_str()), Some(*status));
        }
    }

    #[test]
    fn choices_are_one_through_four_in_menu_order() {
        let choices: Vec<u8> = FilingStatus::all().iter().map(|s| s.choice()).collect();

        assert_eq!(choices, vec![1, 2, 3, 4]);
        assert_eq!(FilingStatus::from_choice(0), None);
        assert_eq!(FilingStatus::from_choice(5), None);
    }

    #[test]
    fn short_labels_match_report_wording() {
        assert_eq!(FilingStatus::MarriedFilingJointly.to_string(), "Married Joint");
        assert_eq!(FilingStatus::MarriedFilingSeparately.to_string(), "Married Separate");
        assert_eq!(FilingStatus::HeadOfHousehold.to_string(), "Head Household");
    }

    #[test]
    fn from_str_accepts_codes_in_any_case() {
        assert_eq!("mfj".parse::<FilingStatus>(), Ok(FilingStatus::MarriedFilingJointly));
        assert_eq!(" HOH ".parse::<FilingStatus>(), Ok(FilingStatus::HeadOfHousehold));
    }

    #[test]
    fn from_str_accepts_menu_numbers() {
        assert_eq!("3".parse::<FilingStatus>(), Ok(FilingStatus::MarriedFilingSeparately));
    }

    #[test]
    fn from_str_rejects_unknown_tags() {
        assert_eq!(
            "QSS".parse::<FilingStatus>(),
            Err(TaxError::InvalidStatus("QSS".to_string()))
        );
        assert_eq!(
            "7".parse::<FilingStatus>(),
            Err(TaxError::InvalidStatus("7".to_string()))
        );
    }
}

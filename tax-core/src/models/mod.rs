mod filing_status;
mod tax_bracket;

pub use filing_status::FilingStatus;
pub use tax_bracket::{BracketSegment, BracketTable, BracketTableError};

//! Disbursement report extraction engine.

mod assemble;
mod output;
mod parser;
pub mod rules;

pub use assemble::{assemble, sort_rows};
pub use output::format_tsv;
pub use parser::{BlockFields, DisbursementParser, ExtractionResult, ReportParser};

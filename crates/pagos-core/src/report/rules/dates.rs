//! Transaction date extraction.

use super::normalize::convert_date;
use super::patterns::REPORT_DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Finds ISO dates in the 2000-2099 range.
///
/// The value is the converted `DD/MM/YYYY` form; `source` keeps the ISO text
/// so callers can locate it again.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        REPORT_DATE
            .find_iter(text)
            .map(|m| ExtractionMatch::new(convert_date(m.as_str()), m.start(), m.end(), m.as_str()))
            .collect()
    }
}

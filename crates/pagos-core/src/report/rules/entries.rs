//! "Bank -- (amount)" payment entry extraction.

use crate::models::report::PaymentEntry;

use super::FieldExtractor;
use super::patterns::PAYMENT_ENTRY;

/// Payment entry extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct PaymentEntryExtractor;

impl PaymentEntryExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PaymentEntryExtractor {
    type Output = PaymentEntry;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PAYMENT_ENTRY
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let bank = caps.get(1)?;
                let name = bank.as_str().trim();
                if name.is_empty() {
                    return None;
                }

                // The name run may begin with spaces; the entry starts at the name.
                let leading = bank.as_str().len() - bank.as_str().trim_start().len();
                Some(PaymentEntry::new(name, &caps[2], full.start() + leading, full.end()))
            })
            .collect()
    }
}

/// All payment entries in `span`, in discovery order, untagged.
pub fn extract_entries(span: &str) -> Vec<PaymentEntry> {
    PaymentEntryExtractor::new().extract_all(span)
}

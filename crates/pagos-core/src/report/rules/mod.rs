//! Rule-based extractors for disbursement report text.

pub mod beneficiary;
pub mod classify;
pub mod dates;
pub mod entries;
pub mod normalize;
pub mod patterns;
pub mod segment;

pub use beneficiary::BeneficiaryExtractor;
pub use classify::{PaymentClassifier, score_boundary, standalone_amounts};
pub use dates::DateExtractor;
pub use entries::{PaymentEntryExtractor, extract_entries};
pub use normalize::{collapse_whitespace, convert_date, normalize};
pub use segment::InvoiceSegmenter;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Extract all occurrences of the field, in text order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source text.
    pub position: (usize, usize),
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, start: usize, end: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            position: (start, end),
            source: source.into(),
        }
    }

    pub fn start(&self) -> usize {
        self.position.0
    }

    pub fn end(&self) -> usize {
        self.position.1
    }
}

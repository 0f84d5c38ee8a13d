//! PDF processing module.
//!
//! Only page text is needed: the report engine treats page breaks as
//! ordinary whitespace.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Separator placed between page texts.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Text of every page, in page order.
    fn extract_pages(&self) -> Result<Vec<String>>;

    /// Text of the whole document, pages joined with [`PAGE_SEPARATOR`].
    fn extract_text(&self) -> Result<String> {
        Ok(self.extract_pages()?.join(PAGE_SEPARATOR))
    }
}

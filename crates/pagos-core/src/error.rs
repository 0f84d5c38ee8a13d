//! Error types for the pagos-core library.

use thiserror::Error;

/// Main error type for the pagos library.
#[derive(Error, Debug)]
pub enum PagosError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Tabular (CSV) input error.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// The input file type is not one we can convert.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// The input was read but no invoice rows could be assembled.
    #[error("no invoice rows found")]
    NoRows,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
///
/// The collaborator's own error text is kept for logging only; the display
/// form stays generic.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("could not read the document")]
    Parse(String),

    /// Failed to extract text from the PDF.
    #[error("could not read the document text")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

impl PdfError {
    /// Underlying collaborator message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Parse(detail) | Self::TextExtraction(detail) => Some(detail),
            Self::Encrypted | Self::NoPages => None,
        }
    }
}

/// Errors related to tabular report input.
#[derive(Error, Debug)]
pub enum TableError {
    /// The header row lacks one or more required columns.
    #[error("unrecognized report layout, missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The input has no header row at all.
    #[error("table is empty")]
    Empty,

    /// The CSV reader rejected the input.
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for the pagos library.
pub type Result<T> = std::result::Result<T, PagosError>;

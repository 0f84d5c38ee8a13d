//! Core library for disbursement report conversion.
//!
//! This crate provides:
//! - PDF page text extraction and CSV report reading
//! - Report text normalization and invoice block segmentation
//! - Beneficiary, date and "bank -- (amount)" payment extraction
//! - Transfer/check classification and sorted tab-separated row output

pub mod convert;
pub mod error;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod report;
pub mod table;

pub use convert::{Conversion, Converter, InputKind};
pub use error::{PagosError, PdfError, Result, TableError};
pub use models::config::{
    BeneficiaryStrategy, BoundaryScoring, ExtractionConfig, FallbackPolicy, OutputConfig,
    PagosConfig, PaymentMode, Profile, TableConfig,
};
pub use models::report::{InvoiceBlock, InvoiceToken, PaymentEntry, PaymentMethod, Row};
#[cfg(feature = "pdf")]
pub use pdf::{PdfExtractor, PdfProcessor};
pub use report::{DisbursementParser, ExtractionResult, ReportParser, format_tsv};
pub use table::TableReader;

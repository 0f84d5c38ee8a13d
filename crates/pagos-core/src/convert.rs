//! End-to-end conversion of a report file into payment rows.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{PagosError, Result};
use crate::models::config::PagosConfig;
use crate::models::report::Row;
use crate::report::{DisbursementParser, ReportParser, format_tsv};
use crate::table::TableReader;

/// Kind of report input, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// PDF export; page text goes through the report engine.
    Pdf,
    /// CSV export with one invoice per row.
    Csv,
    /// Report text already extracted by another tool.
    Text,
}

impl InputKind {
    /// Detect the input kind from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "csv" => Ok(Self::Csv),
            "txt" => Ok(Self::Text),
            "" => Err(PagosError::UnsupportedInput(format!(
                "{} has no file extension; expected .pdf, .csv or .txt",
                path.display()
            ))),
            other => Err(PagosError::UnsupportedInput(format!(
                "unsupported file format: .{}; expected .pdf, .csv or .txt",
                other
            ))),
        }
    }
}

/// Rows produced from one input, with some bookkeeping for reporting.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub kind: InputKind,
    pub rows: Vec<Row>,
    /// Distinct invoice ids among the rows.
    pub invoices: usize,
}

/// Converts report inputs into rows according to a [`PagosConfig`].
#[derive(Debug, Clone)]
pub struct Converter {
    config: PagosConfig,
    parser: DisbursementParser,
    table: TableReader,
}

impl Converter {
    pub fn new(config: PagosConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            parser: DisbursementParser::from_config(&config.extraction)?,
            table: TableReader::new(config.table.clone()),
            config,
        })
    }

    pub fn config(&self) -> &PagosConfig {
        &self.config
    }

    /// Convert raw file bytes of the given kind.
    ///
    /// Fails with [`PagosError::NoRows`] when the input holds no payment rows.
    pub fn convert(&self, kind: InputKind, data: &[u8]) -> Result<Conversion> {
        let rows = match kind {
            InputKind::Pdf => self.rows_from_pdf(data)?,
            InputKind::Csv => self.table.parse(data)?,
            InputKind::Text => self.rows_from_text(&String::from_utf8_lossy(data)),
        };

        if rows.is_empty() {
            return Err(PagosError::NoRows);
        }

        let invoices = rows.iter().map(|r| r.invoice_id.as_str()).collect::<HashSet<_>>().len();
        info!("Converted {:?} input: {} rows, {} invoices", kind, rows.len(), invoices);

        Ok(Conversion {
            kind,
            rows,
            invoices,
        })
    }

    /// Read and convert a file, rejecting unsupported extensions before reading.
    pub fn convert_file(&self, path: &Path) -> Result<Conversion> {
        let kind = InputKind::from_path(path)?;
        let data = std::fs::read(path)?;
        debug!("Read {} bytes from {}", data.len(), path.display());
        self.convert(kind, &data)
    }

    /// Run the report engine over already extracted text.
    pub fn rows_from_text(&self, text: &str) -> Vec<Row> {
        self.parser.parse(text).rows
    }

    /// Render rows as tab-separated text, with the header line if configured.
    pub fn render(&self, rows: &[Row]) -> String {
        format_tsv(rows, self.config.output.include_header)
    }

    #[cfg(feature = "pdf")]
    fn rows_from_pdf(&self, data: &[u8]) -> Result<Vec<Row>> {
        let text = crate::pdf::PdfExtractor::text_from_bytes(data).inspect_err(|e| {
            if let Some(detail) = e.detail() {
                debug!("PDF extraction failed: {}", detail);
            }
        })?;
        Ok(self.rows_from_text(&text))
    }

    #[cfg(not(feature = "pdf"))]
    fn rows_from_pdf(&self, _data: &[u8]) -> Result<Vec<Row>> {
        Err(PagosError::UnsupportedInput(
            "PDF support is not enabled in this build".to_string(),
        ))
    }
}

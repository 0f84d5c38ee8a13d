//! Disbursement report parser: text in, payment rows out.

use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::{ExtractionConfig, PaymentMode};
use crate::models::report::{InvoiceBlock, Row};

use super::assemble::assemble;
use super::rules::{
    BeneficiaryExtractor, DateExtractor, ExtractionMatch, FieldExtractor, InvoiceSegmenter,
    PaymentClassifier, PaymentEntryExtractor, normalize,
};

/// Result of report extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Assembled rows, sorted by invoice id.
    pub rows: Vec<Row>,
    /// Number of invoice blocks found.
    pub blocks: usize,
    /// Blocks dropped because they held no payment entries.
    pub skipped_blocks: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-block header fields. Missing values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockFields {
    pub invoice_id: String,
    /// DD/MM/YYYY.
    pub date: String,
    pub beneficiary: String,
}

/// Trait for report parsing.
pub trait ReportParser {
    /// Parse report text into rows. Never fails; unrecognizable text yields
    /// an empty result.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Rule-based parser for the disbursement report layout.
#[derive(Debug, Clone)]
pub struct DisbursementParser {
    segmenter: InvoiceSegmenter,
    dates: DateExtractor,
    beneficiary: BeneficiaryExtractor,
    entries: PaymentEntryExtractor,
    classifier: PaymentClassifier,
}

impl DisbursementParser {
    /// Build a parser from an extraction profile.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;

        let parser = Self {
            segmenter: InvoiceSegmenter::new(config.min_leading_zeros)?,
            dates: DateExtractor::new(),
            beneficiary: BeneficiaryExtractor::from_config(config)?,
            entries: PaymentEntryExtractor::new(),
            classifier: PaymentClassifier::from_config(config),
        };
        debug!(
            "Report parser in {:?} mode, invoice tokens need {} leading zeros",
            parser.classifier.mode(),
            parser.segmenter.min_leading_zeros()
        );

        Ok(parser)
    }

    /// Tolerant profile in the given mode.
    pub fn with_mode(mode: PaymentMode) -> Result<Self> {
        Self::from_config(&ExtractionConfig::tolerant().with_mode(mode))
    }

    /// Invoice id, date and beneficiary of one block.
    pub fn extract_fields(&self, block: &InvoiceBlock) -> BlockFields {
        let mut fields = BlockFields {
            invoice_id: block.invoice_id.clone(),
            ..BlockFields::default()
        };

        if let Some((date, beneficiary)) = self.header_fields(&block.text, &block.token) {
            fields.date = date.value;
            fields.beneficiary = beneficiary.unwrap_or_default();
        }

        fields
    }

    /// First date of a block and the beneficiary found before it. Without a
    /// date there is no beneficiary either.
    fn header_fields(&self, text: &str, token: &str) -> Option<(ExtractionMatch<String>, Option<String>)> {
        let date = self.dates.extract(text)?;
        let beneficiary = self.beneficiary.extract(text, token, date.start());
        Some((date, beneficiary))
    }

    /// Normalize, segment, extract and classify, keeping every block.
    pub fn extract_blocks(&self, text: &str) -> Vec<InvoiceBlock> {
        let normalized = normalize(text);

        self.segmenter
            .segment(&normalized)
            .into_iter()
            .map(|mut block| {
                if let Some((date, beneficiary)) = self.header_fields(&block.text, &block.token) {
                    block.date = Some(date.source);
                    block.beneficiary = beneficiary;
                }

                let entries = self.entries.extract_all(&block.text);
                block.entries = self.classifier.classify(entries, &block.text);

                debug!(
                    "Invoice {}: {} entries, date {:?}, beneficiary {:?}",
                    block.invoice_id,
                    block.entries.len(),
                    block.date,
                    block.beneficiary
                );
                block
            })
            .collect()
    }
}

impl ReportParser for DisbursementParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        let blocks = self.extract_blocks(text);
        let skipped_blocks = blocks.iter().filter(|b| b.entries.is_empty()).count();
        let rows = assemble(&blocks);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Extracted {} rows from {} invoice blocks ({} without payments) in {}ms",
            rows.len(),
            blocks.len(),
            skipped_blocks,
            processing_time_ms
        );

        ExtractionResult {
            rows,
            blocks: blocks.len(),
            skipped_blocks,
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::PaymentMethod;
    use crate::report::rules::convert_date;
    use pretty_assertions::assert_eq;

    const REPORT: &str = "REPORTE DE PAGOS Página 1\n\
        0000009963 Cliente, Frecuente Ana María Rojas V-9876543 Pagada 2026-01-15\n\
        Banesco -- (1200. 00)\n\
        TOTAL TRANSFERENCIA 1200.00, TOTAL CHEQUE 0.00\n\
        0000009962 Cliente, Ocasional Juan Perez V-12345678 Pagada 2026-01-14\n\
        Banco General -- (500.00)\n\
        TOTAL TRANSFERENCIA 500.00,\n\
        Mercantil Bank -- (250 .50)\n\
        TOTAL CHEQUE 250.50\n\
        0000009970 Factura Anulada 2026-01-16 sin pagos\n";

    #[test]
    fn test_forced_transfer_end_to_end() {
        let text = "0000009962 Juan Perez 2026-01-14 Banco General -- (500.00) 750.50 Mercantil Bank -- (250.50)";
        let parser = DisbursementParser::with_mode(PaymentMode::Transfer).unwrap();

        let result = parser.parse(text);
        assert_eq!(result.rows.len(), 2);
        for row in &result.rows {
            assert_eq!(row.invoice_id, "9962");
            assert_eq!(row.date, "14/01/2026");
            assert_eq!(row.payment_method, PaymentMethod::Transfer);
        }
        assert_eq!(result.rows[0].bank, "Banco General");
        assert_eq!(result.rows[0].amount, "500.00");
        assert_eq!(result.rows[1].bank, "Mercantil Bank");
        assert_eq!(result.rows[1].amount, "250.50");
    }

    #[test]
    fn test_auto_mode_report() {
        let parser = DisbursementParser::with_mode(PaymentMode::Auto).unwrap();
        let result = parser.parse(REPORT);

        assert_eq!(result.blocks, 3);
        assert_eq!(result.skipped_blocks, 1);

        let rows: Vec<(&str, &str, &str, PaymentMethod, &str, &str)> = result
            .rows
            .iter()
            .map(|r| {
                (
                    r.invoice_id.as_str(),
                    r.beneficiary.as_str(),
                    r.date.as_str(),
                    r.payment_method,
                    r.bank.as_str(),
                    r.amount.as_str(),
                )
            })
            .collect();

        assert_eq!(
            rows,
            vec![
                ("9962", "Juan Perez", "14/01/2026", PaymentMethod::Transfer, "Banco General", "500.00"),
                ("9962", "Juan Perez", "14/01/2026", PaymentMethod::Check, "Mercantil Bank", "250.50"),
                ("9963", "Ana María Rojas", "15/01/2026", PaymentMethod::Transfer, "Banesco", "1200.00"),
            ]
        );
    }

    #[test]
    fn test_extract_fields_without_date() {
        let parser = DisbursementParser::with_mode(PaymentMode::Auto).unwrap();
        let blocks = parser.segmenter.segment("0000000042 Cliente, Ocasional Juan Perez Banco A -- (1.00)");

        let fields = parser.extract_fields(&blocks[0]);
        assert_eq!(
            fields,
            BlockFields {
                invoice_id: "42".to_string(),
                date: String::new(),
                beneficiary: String::new(),
            }
        );
    }

    #[test]
    fn test_extract_fields_with_date() {
        let parser = DisbursementParser::with_mode(PaymentMode::Auto).unwrap();
        let blocks = parser
            .segmenter
            .segment("0000000042 Cliente, Ocasional Juan Perez 2026-03-01 Banco A -- (1.00)");

        let fields = parser.extract_fields(&blocks[0]);
        assert_eq!(fields.date, "01/03/2026");
        assert_eq!(fields.beneficiary, "Juan Perez");
    }

    #[test]
    fn test_date_glued_to_bank_name() {
        let parser = DisbursementParser::with_mode(PaymentMode::Transfer).unwrap();
        let result = parser.parse(
            "0000009962 Cliente, Ocasional Juan Perez V-1234567 2026-01-14Banco General -- (500.00)",
        );

        assert_eq!(
            result.rows,
            vec![Row {
                invoice_id: "9962".to_string(),
                beneficiary: "Juan Perez".to_string(),
                date: "14/01/2026".to_string(),
                payment_method: PaymentMethod::Transfer,
                bank: "Banco General".to_string(),
                amount: "500.00".to_string(),
            }]
        );
    }

    #[test]
    fn test_extract_fields_matches_extracted_blocks() {
        let parser = DisbursementParser::with_mode(PaymentMode::Auto).unwrap();
        let text = normalize(REPORT);

        for block in parser.extract_blocks(&text) {
            let fields = parser.extract_fields(&block);
            assert_eq!(fields.invoice_id, block.invoice_id);
            assert_eq!(fields.beneficiary, block.beneficiary.clone().unwrap_or_default());
            assert_eq!(
                fields.date,
                block.date.as_deref().map(convert_date).unwrap_or_default()
            );
        }
    }

    #[test]
    fn test_text_without_invoices() {
        let parser = DisbursementParser::with_mode(PaymentMode::Auto).unwrap();
        let result = parser.parse("Banco General -- (500.00)");

        assert!(result.is_empty());
        assert_eq!(result.blocks, 0);
    }

    #[test]
    fn test_strict_profile_ignores_short_padding() {
        let parser = DisbursementParser::from_config(&ExtractionConfig::strict()).unwrap();
        let result = parser.parse("0009962 Juan 2026-01-14 Banco General -- (500.00)");
        assert!(result.is_empty());

        let parser = DisbursementParser::from_config(&ExtractionConfig::tolerant()).unwrap();
        let result = parser.parse("0009962 Juan 2026-01-14 Banco General -- (500.00)");
        assert_eq!(result.rows.len(), 1);
    }
}

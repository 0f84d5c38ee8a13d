//! CSV report reader.
//!
//! The CSV export already separates invoices into rows and payments into a
//! transfer column and a check column, so no segmentation or classification
//! is needed: each detail cell goes through the payment entry extractor with
//! the tag of its column.

use tracing::{debug, warn};

use crate::error::TableError;
use crate::models::config::TableConfig;
use crate::models::report::{PaymentMethod, Row, strip_leading_zeros};
use crate::report::rules::{collapse_whitespace, convert_date, extract_entries, normalize};
use crate::report::sort_rows;

use super::Result;

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub invoice: usize,
    pub client: usize,
    pub date: usize,
    pub transfer: usize,
    pub check: usize,
}

/// Reads tabular disbursement reports.
#[derive(Debug, Clone, Default)]
pub struct TableReader {
    config: TableConfig,
}

impl TableReader {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    /// Parse CSV bytes into rows sorted by invoice id.
    pub fn parse(&self, data: &[u8]) -> Result<Vec<Row>> {
        let matrix = read_matrix(data)?;
        self.rows(&matrix)
    }

    /// Rows from an already tokenized cell matrix whose first row is the header.
    pub fn rows(&self, matrix: &[Vec<String>]) -> Result<Vec<Row>> {
        let (header, records) = matrix.split_first().ok_or(TableError::Empty)?;
        let columns = self.resolve(header)?;
        debug!("Resolved report columns: {:?}", columns);

        let mut rows = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let cell = |i: usize| record.get(i).map(|c| c.trim()).unwrap_or("");

            let invoice = cell(columns.invoice);
            if invoice.is_empty() {
                debug!("Skipping table row {} without invoice number", index + 2);
                continue;
            }

            let invoice_id = if invoice.bytes().all(|b| b.is_ascii_digit()) {
                strip_leading_zeros(invoice)
            } else {
                warn!("Invoice number {:?} is not numeric, keeping it verbatim", invoice);
                invoice.to_string()
            };
            let beneficiary = collapse_whitespace(cell(columns.client));
            let date = convert_date(cell(columns.date));

            let details = [
                (columns.transfer, PaymentMethod::Transfer),
                (columns.check, PaymentMethod::Check),
            ];
            for (column, method) in details {
                for entry in extract_entries(&normalize(cell(column))) {
                    rows.push(Row {
                        invoice_id: invoice_id.clone(),
                        beneficiary: beneficiary.clone(),
                        date: date.clone(),
                        payment_method: method,
                        bank: entry.bank,
                        amount: entry.amount,
                    });
                }
            }
        }

        sort_rows(&mut rows);
        Ok(rows)
    }

    /// Locate the configured columns, case-insensitively, in the header row.
    pub fn resolve(&self, header: &[String]) -> Result<ColumnMap> {
        let names: Vec<String> = header.iter().map(|h| header_key(h)).collect();
        let mut missing = Vec::new();

        let mut find = |wanted: &str| -> usize {
            let key = header_key(wanted);
            match names.iter().position(|name| *name == key) {
                Some(i) => i,
                None => {
                    missing.push(wanted.to_string());
                    usize::MAX
                }
            }
        };

        let columns = ColumnMap {
            invoice: find(self.config.invoice_column.as_str()),
            client: find(self.config.client_column.as_str()),
            date: find(self.config.date_column.as_str()),
            transfer: find(self.config.transfer_column.as_str()),
            check: find(self.config.check_column.as_str()),
        };

        if missing.is_empty() {
            Ok(columns)
        } else {
            Err(TableError::MissingColumns(missing))
        }
    }
}

/// Tokenize CSV bytes into a matrix of cells, header row included.
pub fn read_matrix(data: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut matrix = Vec::new();
    for record in reader.records() {
        let record = record?;
        matrix.push(record.iter().map(String::from).collect());
    }

    if matrix.is_empty() {
        return Err(TableError::Empty);
    }
    Ok(matrix)
}

fn header_key(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

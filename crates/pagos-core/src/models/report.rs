//! Report data models: invoice tokens, blocks, payment entries and output rows.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Column titles of the optional output header line.
pub const ROW_HEADER: [&str; 6] = [
    "# factura",
    "Beneficiario",
    "Fecha",
    "Forma de pago",
    "Banco",
    "Monto",
];

/// A zero-padded invoice number found in report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceToken {
    /// Byte offset of the first digit.
    pub start: usize,
    /// Byte offset one past the last digit.
    pub end: usize,
    /// Digits as they appear in the text, padding included.
    pub digits: String,
}

impl InvoiceToken {
    /// Invoice id with the zero padding removed.
    pub fn invoice_id(&self) -> String {
        strip_leading_zeros(&self.digits)
    }
}

/// Drop leading zeros from a digit string; an all-zero (or empty) string becomes "0".
pub fn strip_leading_zeros(digits: &str) -> String {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// How a single payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Wire transfer (transferencia).
    Transfer,
    /// Check (cheque).
    Check,
}

impl PaymentMethod {
    /// Label used in the "Forma de pago" column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transfer => "Transferencia",
            Self::Check => "Cheque",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One "bank -- (amount)" occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEntry {
    /// Bank name, trimmed.
    pub bank: String,
    /// Amount exactly as written, two fraction digits.
    pub amount: String,
    /// Byte offset of the match within its block or cell.
    pub start: usize,
    /// Byte offset one past the closing parenthesis.
    pub end: usize,
    /// Assigned by the classifier; `None` straight out of extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
}

impl PaymentEntry {
    pub fn new(bank: impl Into<String>, amount: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            bank: bank.into(),
            amount: amount.into(),
            start,
            end,
            method: None,
        }
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }
}

/// Text attributed to one invoice token, plus everything extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceBlock {
    /// Byte offset of the block in the normalized source text.
    pub start: usize,
    /// Byte offset one past the block end.
    pub end: usize,
    /// Block text.
    pub text: String,
    /// Invoice id without zero padding.
    pub invoice_id: String,
    /// Token digits as they appear in `text`.
    pub token: String,
    /// First ISO date in the block.
    pub date: Option<String>,
    /// Beneficiary name.
    pub beneficiary: Option<String>,
    /// Payment entries in discovery order.
    pub entries: Vec<PaymentEntry>,
}

/// One output line: a single payment of a single invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub invoice_id: String,
    pub beneficiary: String,
    /// DD/MM/YYYY, or the source value when it was not an ISO date.
    pub date: String,
    pub payment_method: PaymentMethod,
    pub bank: String,
    pub amount: String,
}

impl Row {
    /// Field values in output column order.
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.invoice_id,
            &self.beneficiary,
            &self.date,
            self.payment_method.label(),
            &self.bank,
            &self.amount,
        ]
    }
}

/// Compare two invoice ids as base-10 integers of any length.
///
/// Ids that are not plain digit strings order after every numeric id and
/// compare equal among themselves, so a stable sort keeps their input order.
pub fn compare_invoice_ids(a: &str, b: &str) -> Ordering {
    match (numeric_key(a), numeric_key(b)) {
        (Some(a), Some(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn numeric_key(id: &str) -> Option<&str> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let stripped = id.trim_start_matches('0');
    Some(if stripped.is_empty() { "0" } else { stripped })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_leading_zeros() {
        assert_eq!(strip_leading_zeros("0000009962"), "9962");
        assert_eq!(strip_leading_zeros("007"), "7");
        assert_eq!(strip_leading_zeros("0000"), "0");
        assert_eq!(strip_leading_zeros("1200"), "1200");
    }

    #[test]
    fn test_strip_leading_zeros_keeps_integer_value() {
        for digits in ["0001", "000120", "0", "000000", "9", "00900"] {
            let stripped = strip_leading_zeros(digits);
            assert_eq!(stripped.parse::<u64>().unwrap(), digits.parse::<u64>().unwrap());
        }
    }

    #[test]
    fn test_compare_invoice_ids() {
        assert_eq!(compare_invoice_ids("9", "10"), Ordering::Less);
        assert_eq!(compare_invoice_ids("120", "99"), Ordering::Greater);
        assert_eq!(compare_invoice_ids("007", "7"), Ordering::Equal);
        assert_eq!(
            compare_invoice_ids("123456789012345678901234567890", "99"),
            Ordering::Greater
        );
        assert_eq!(compare_invoice_ids("A-1", "5"), Ordering::Greater);
        assert_eq!(compare_invoice_ids("A-1", "B-2"), Ordering::Equal);
    }

    #[test]
    fn test_row_fields_order() {
        let row = Row {
            invoice_id: "9962".to_string(),
            beneficiary: "Juan Perez".to_string(),
            date: "14/01/2026".to_string(),
            payment_method: PaymentMethod::Check,
            bank: "Banco General".to_string(),
            amount: "500.00".to_string(),
        };

        assert_eq!(
            row.fields(),
            ["9962", "Juan Perez", "14/01/2026", "Cheque", "Banco General", "500.00"]
        );
    }
}

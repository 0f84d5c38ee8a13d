//! Common regex patterns for disbursement report extraction.
//!
//! Patterns that depend on configuration (invoice token padding, noise words)
//! are compiled per parser instead; see `segment` and `beneficiary`.

use lazy_static::lazy_static;
use regex::Regex;

/// Letters allowed in bank and beneficiary names: ASCII plus Latin-1 accented letters.
pub const NAME_CHARS: &str = "A-Za-zÀ-ÖØ-öø-ÿ";

lazy_static! {
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // "123. 45" -> "123.45"
    pub static ref DECIMAL_SPACE_AFTER_POINT: Regex = Regex::new(
        r"(\d)\.\s+(\d{2})\b"
    ).unwrap();

    // "123 .45" / "123 . 45" -> "123.45"
    pub static ref DECIMAL_SPACE_BEFORE_POINT: Regex = Regex::new(
        r"(\d)\s+\.\s*(\d{2})\b"
    ).unwrap();

    pub static ref ISO_DATE_EXACT: Regex = Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})$"
    ).unwrap();

    // Unanchored; layout text may glue the date to the next word.
    pub static ref REPORT_DATE: Regex = Regex::new(
        r"20\d{2}-\d{2}-\d{2}"
    ).unwrap();

    // "Banco Aliado -- (23148.04)"
    pub static ref PAYMENT_ENTRY: Regex = Regex::new(&format!(
        r"([{NAME_CHARS} ]+?)\s*--\s*\((\d+\.\d{{2}})\)"
    )).unwrap();

    // Decimal with two fraction digits, optionally wrapped in parentheses;
    // callers keep only the unwrapped ones.
    pub static ref DECIMAL_AMOUNT: Regex = Regex::new(
        r"\(?\b(\d+\.\d{2})\b\)?"
    ).unwrap();

    pub static ref CLIENT_LABEL: Regex = Regex::new(
        r"(?i)\bcliente\s*,\s*(?:ocasional|frecuente)\b"
    ).unwrap();

    // Name run after the client label, up to an ID marker, a long number or the end.
    pub static ref LABELED_NAME: Regex = Regex::new(&format!(
        r"^\s*([{NAME_CHARS} ]+?)\s*(?:[VEJGPvejgp]-\d|\d{{5,}}|$)"
    )).unwrap();

    // Word-bounded run of letters, digits, dots and hyphens holding at least one
    // hyphen and one digit: "J-30123456-7", "V-12.345.678", "OP-2026-001".
    pub static ref HYPHEN_CODE: Regex = Regex::new(
        r"\b[A-Za-z0-9.]*(?:\d[A-Za-z0-9.]*-|-[A-Za-z0-9.]*\d)[A-Za-z0-9.\-]*"
    ).unwrap();

    pub static ref LONG_DIGIT_RUN: Regex = Regex::new(r"\d{5,}").unwrap();
}

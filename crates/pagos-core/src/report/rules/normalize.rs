//! Whitespace, decimal and date repair for extracted report text.

use std::borrow::Cow;

use super::patterns::{DECIMAL_SPACE_AFTER_POINT, DECIMAL_SPACE_BEFORE_POINT, ISO_DATE_EXACT, WHITESPACE};

/// Collapse whitespace and rejoin decimals split by the text extractor.
///
/// The repair passes run until neither changes the text, so the result is a
/// fixpoint: `normalize(&normalize(t)) == normalize(t)`.
pub fn normalize(text: &str) -> String {
    let mut current = collapse_whitespace(text);

    loop {
        let repaired = {
            let after = DECIMAL_SPACE_AFTER_POINT.replace_all(&current, "$1.$2");
            let before = DECIMAL_SPACE_BEFORE_POINT.replace_all(&after, "$1.$2");
            let unchanged = matches!(after, Cow::Borrowed(_)) && matches!(before, Cow::Borrowed(_));
            if unchanged { None } else { Some(before.into_owned()) }
        };

        match repaired {
            Some(text) => current = text,
            None => return current,
        }
    }
}

/// Replace every whitespace run with a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Reformat `YYYY-MM-DD` as `DD/MM/YYYY`; anything else is returned unchanged.
pub fn convert_date(iso: &str) -> String {
    match ISO_DATE_EXACT.captures(iso) {
        Some(caps) => format!("{}/{}/{}", &caps[3], &caps[2], &caps[1]),
        None => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Banco \n\n General\t-- "), "Banco General --");
    }

    #[test]
    fn test_repairs_split_decimals() {
        assert_eq!(normalize("Banco Aliado -- (23148. 04)"), "Banco Aliado -- (23148.04)");
        assert_eq!(normalize("TOTAL 750 .50"), "TOTAL 750.50");
        assert_eq!(normalize("TOTAL 750 . 50"), "TOTAL 750.50");
        assert_eq!(normalize("TOTAL 750.\n50"), "TOTAL 750.50");
    }

    #[test]
    fn test_leaves_other_numbers_alone() {
        assert_eq!(normalize("Pagina 1. 234 items"), "Pagina 1. 234 items");
        assert_eq!(normalize("0000009962 2026-01-14"), "0000009962 2026-01-14");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "0000009962  Cliente,  Ocasional\nJuan   Perez 2026-01-14\nBanco General -- (500. 00)",
            "1. 22. 33 and 4 . 55 . 66",
            "7 .12. 34",
            "",
            "   \n\t ",
        ];

        for text in samples {
            let once = normalize(text);
            assert_eq!(normalize(&once), once, "input: {:?}", text);
        }
    }

    #[test]
    fn test_convert_date() {
        assert_eq!(convert_date("2026-01-14"), "14/01/2026");
        assert_eq!(convert_date("14/01/2026"), "14/01/2026");
        assert_eq!(convert_date("2026-1-14"), "2026-1-14");
        assert_eq!(convert_date(""), "");
    }
}

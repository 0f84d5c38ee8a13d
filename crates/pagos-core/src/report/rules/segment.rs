//! Invoice token detection and block segmentation.

use regex::Regex;
use tracing::debug;

use crate::error::{PagosError, Result};
use crate::models::report::{InvoiceBlock, InvoiceToken};

/// Splits report text into one block per zero-padded invoice number.
#[derive(Debug, Clone)]
pub struct InvoiceSegmenter {
    token: Regex,
    min_leading_zeros: usize,
}

impl InvoiceSegmenter {
    /// Create a segmenter accepting digit runs with at least `min_leading_zeros`
    /// leading zeros followed by more digits.
    pub fn new(min_leading_zeros: usize) -> Result<Self> {
        if min_leading_zeros == 0 {
            return Err(PagosError::Config(
                "invoice tokens need at least one leading zero".to_string(),
            ));
        }

        let token = Regex::new(&format!(r"\b0{{{},}}\d+\b", min_leading_zeros))
            .map_err(|e| PagosError::Config(e.to_string()))?;

        Ok(Self { token, min_leading_zeros })
    }

    pub fn min_leading_zeros(&self) -> usize {
        self.min_leading_zeros
    }

    /// All invoice tokens, left to right, non-overlapping.
    pub fn tokens(&self, text: &str) -> Vec<InvoiceToken> {
        self.token
            .find_iter(text)
            .map(|m| InvoiceToken {
                start: m.start(),
                end: m.end(),
                digits: m.as_str().to_string(),
            })
            .collect()
    }

    /// Cut `text` at every token start. Text before the first token belongs
    /// to no block; no tokens means no blocks.
    pub fn segment(&self, text: &str) -> Vec<InvoiceBlock> {
        let tokens = self.tokens(text);
        debug!("Found {} invoice tokens", tokens.len());

        let bounds: Vec<usize> = tokens
            .iter()
            .skip(1)
            .map(|t| t.start)
            .chain(std::iter::once(text.len()))
            .collect();

        tokens
            .into_iter()
            .zip(bounds)
            .map(|(token, end)| InvoiceBlock {
                start: token.start,
                end,
                text: text[token.start..end].to_string(),
                invoice_id: token.invoice_id(),
                token: token.digits,
                date: None,
                beneficiary: None,
                entries: Vec::new(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokens_respect_padding_threshold() {
        let tolerant = InvoiceSegmenter::new(3).unwrap();
        let strict = InvoiceSegmenter::new(4).unwrap();
        let text = "0009961 x 0000009962 y 00123";

        let ids: Vec<String> = tolerant.tokens(text).iter().map(|t| t.invoice_id()).collect();
        assert_eq!(ids, vec!["9961", "9962"]);

        let ids: Vec<String> = strict.tokens(text).iter().map(|t| t.invoice_id()).collect();
        assert_eq!(ids, vec!["9962"]);
    }

    #[test]
    fn test_tokens_are_word_bounded() {
        let segmenter = InvoiceSegmenter::new(3).unwrap();

        assert!(segmenter.tokens("REF0000123 1200045").is_empty());
        assert!(segmenter.tokens("000").is_empty());
        assert_eq!(segmenter.tokens("0000").len(), 1);
        assert_eq!(segmenter.tokens("0000")[0].invoice_id(), "0");
    }

    #[test]
    fn test_no_tokens_no_blocks() {
        let segmenter = InvoiceSegmenter::new(3).unwrap();
        assert!(segmenter.segment("Reporte de pagos sin facturas 2026-01-14").is_empty());
    }

    #[test]
    fn test_blocks_partition_text_from_first_token() {
        let segmenter = InvoiceSegmenter::new(3).unwrap();
        let text = "Reporte 0000009962 Juan Banco A -- (1.00) 0000009963 Ana Banco B -- (2.00) 0001 fin";

        let blocks = segmenter.segment(text);
        assert_eq!(blocks.len(), 3);

        let ids: Vec<&str> = blocks.iter().map(|b| b.invoice_id.as_str()).collect();
        assert_eq!(ids, vec!["9962", "9963", "1"]);

        let first = text.find("0000009962").unwrap();
        let joined: String = blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(joined, &text[first..]);

        for pair in blocks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(blocks.last().unwrap().end, text.len());
        assert_eq!(blocks[1].text, "0000009963 Ana Banco B -- (2.00) ");
    }

    #[test]
    fn test_rejects_zero_padding() {
        assert!(InvoiceSegmenter::new(0).is_err());
    }
}

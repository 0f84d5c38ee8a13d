//! Beneficiary name extraction.

use regex::Regex;

use crate::error::{PagosError, Result};
use crate::models::config::{BeneficiaryStrategy, ExtractionConfig};

use super::normalize::collapse_whitespace;
use super::patterns::{CLIENT_LABEL, HYPHEN_CODE, LABELED_NAME, LONG_DIGIT_RUN};

/// Extracts the beneficiary from the text of one invoice block.
#[derive(Debug, Clone)]
pub struct BeneficiaryExtractor {
    strategy: BeneficiaryStrategy,
    noise: Option<Regex>,
    max_chars: usize,
}

impl BeneficiaryExtractor {
    pub fn new(strategy: BeneficiaryStrategy, noise_words: &[String], max_chars: usize) -> Result<Self> {
        Ok(Self {
            strategy,
            noise: noise_pattern(noise_words)?,
            max_chars,
        })
    }

    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Self::new(config.beneficiary, &config.noise_words, config.beneficiary_max_chars)
    }

    /// Beneficiary of `block`, whose invoice token is `token` and whose date
    /// starts at byte `date_start`.
    pub fn extract(&self, block: &str, token: &str, date_start: usize) -> Option<String> {
        let date_start = date_start.min(block.len());

        match self.strategy {
            BeneficiaryStrategy::LabelWithFallback => self
                .from_label(block, date_start)
                .or_else(|| self.from_context(block, token, date_start)),
            BeneficiaryStrategy::LabelOnly => self.from_label(block, date_start),
            BeneficiaryStrategy::HeuristicOnly => self.from_context(block, token, date_start),
        }
    }

    /// Name following "Cliente, Ocasional|Frecuente", up to an ID marker, a
    /// long number or the date.
    pub fn from_label(&self, block: &str, date_start: usize) -> Option<String> {
        let head = block.get(..date_start)?;
        let label = CLIENT_LABEL.find(head)?;
        let caps = LABELED_NAME.captures(&head[label.end()..])?;

        let name = caps.get(1)?.as_str().trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    /// Whatever is left of the text before the date once the token, noise
    /// words and identifiers are removed.
    pub fn from_context(&self, block: &str, token: &str, date_start: usize) -> Option<String> {
        let head = block.get(..date_start)?;

        let mut text = if token.is_empty() {
            head.to_string()
        } else {
            head.replacen(token, " ", 1)
        };
        if let Some(noise) = &self.noise {
            text = noise.replace_all(&text, " ").into_owned();
        }
        text = HYPHEN_CODE.replace_all(&text, " ").into_owned();
        text = LONG_DIGIT_RUN.replace_all(&text, " ").into_owned();

        let cleaned = collapse_whitespace(&text);
        let cleaned = cleaned.trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '|' | '-' | ' '));

        let truncated: String = cleaned.chars().take(self.max_chars).collect();
        let name = truncated.trim_end();
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// One case-insensitive, whole-word alternation over all noise words,
/// longest first so multi-word labels win over their parts.
fn noise_pattern(words: &[String]) -> Result<Option<Regex>> {
    let mut words: Vec<&str> = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return Ok(None);
    }
    words.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));

    let alternation = words
        .iter()
        .map(|w| regex::escape(w).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
        .map(Some)
        .map_err(|e| PagosError::Config(format!("invalid noise word list: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(strategy: BeneficiaryStrategy) -> BeneficiaryExtractor {
        let config = ExtractionConfig::tolerant();
        BeneficiaryExtractor::new(strategy, &config.noise_words, config.beneficiary_max_chars).unwrap()
    }

    fn date_start(block: &str) -> usize {
        block.find("2026-01-14").unwrap()
    }

    #[test]
    fn test_label_terminated_by_id_marker() {
        let block = "0000009962 Cliente, Ocasional Juan Pérez V-12345678 2026-01-14 Banco General -- (500.00)";
        let found = extractor(BeneficiaryStrategy::LabelOnly).extract(block, "0000009962", date_start(block));

        assert_eq!(found.as_deref(), Some("Juan Pérez"));
    }

    #[test]
    fn test_label_terminated_by_long_number_or_date() {
        let block = "0000009962 cliente ,frecuente María José Núñez 20123456 2026-01-14";
        let found = extractor(BeneficiaryStrategy::LabelOnly).extract(block, "0000009962", date_start(block));
        assert_eq!(found.as_deref(), Some("María José Núñez"));

        let block = "0000009962 Cliente, Frecuente Ana Rosa 2026-01-14";
        let found = extractor(BeneficiaryStrategy::LabelOnly).extract(block, "0000009962", date_start(block));
        assert_eq!(found.as_deref(), Some("Ana Rosa"));
    }

    #[test]
    fn test_label_only_without_label() {
        let block = "0000009962 Inversiones Lara 2026-01-14";
        let found = extractor(BeneficiaryStrategy::LabelOnly).extract(block, "0000009962", date_start(block));
        assert_eq!(found, None);
    }

    #[test]
    fn test_fallback_strips_noise_and_identifiers() {
        let block = "0000009962 Factura Pagada Inversiones Lara J-30123456-7 OP-2026-001 998877 2026-01-14 Banco";
        let found = extractor(BeneficiaryStrategy::LabelWithFallback).extract(block, "0000009962", date_start(block));

        assert_eq!(found.as_deref(), Some("Inversiones Lara"));
    }

    #[test]
    fn test_fallback_when_label_has_no_clean_name() {
        let block = "0000009962 Cliente, Ocasional Comercial A.B. 2026-01-14";
        let found = extractor(BeneficiaryStrategy::LabelWithFallback).extract(block, "0000009962", date_start(block));

        assert_eq!(found.as_deref(), Some("Comercial A.B."));
    }

    #[test]
    fn test_fallback_truncates() {
        let name = "Distribuidora ".repeat(10);
        let block = format!("0000009962 {}2026-01-14", name);
        let found = extractor(BeneficiaryStrategy::HeuristicOnly)
            .extract(&block, "0000009962", date_start(&block))
            .unwrap();

        assert!(found.chars().count() <= 70);
        assert!(found.starts_with("Distribuidora Distribuidora"));
        assert!(!found.ends_with(' '));
    }

    #[test]
    fn test_empty_noise_list() {
        let extractor = BeneficiaryExtractor::new(BeneficiaryStrategy::HeuristicOnly, &[], 70).unwrap();
        let block = "0000009962 Factura Juan 2026-01-14";

        assert_eq!(
            extractor.extract(block, "0000009962", date_start(block)).as_deref(),
            Some("Factura Juan")
        );
    }
}

//! Payment method classification.
//!
//! Reports list transfers first and checks after them, usually separated by a
//! printed transfer subtotal. In auto mode the gap between every pair of
//! adjacent entries is scored and the strongest gap, if strong enough, becomes
//! the transfer/check split.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::models::config::{BoundaryScoring, ExtractionConfig, FallbackPolicy, PaymentMode};
use crate::models::report::{PaymentEntry, PaymentMethod};

use super::patterns::DECIMAL_AMOUNT;

/// Assigns a payment method to every entry of a block.
#[derive(Debug, Clone)]
pub struct PaymentClassifier {
    mode: PaymentMode,
    scoring: BoundaryScoring,
    fallback: FallbackPolicy,
}

impl PaymentClassifier {
    pub fn new(mode: PaymentMode, scoring: BoundaryScoring, fallback: FallbackPolicy) -> Self {
        Self { mode, scoring, fallback }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.mode, config.scoring.clone(), config.fallback)
    }

    pub fn mode(&self) -> PaymentMode {
        self.mode
    }

    /// Tag `entries`, which were extracted from `block`, with a payment method.
    pub fn classify(&self, entries: Vec<PaymentEntry>, block: &str) -> Vec<PaymentEntry> {
        if let Some(method) = self.mode.forced() {
            return tag_all(entries, method);
        }
        if entries.is_empty() {
            return entries;
        }

        match self.split_point(&entries, block) {
            Some(split) => entries
                .into_iter()
                .enumerate()
                .map(|(i, entry)| {
                    let method = if i <= split {
                        PaymentMethod::Transfer
                    } else {
                        PaymentMethod::Check
                    };
                    entry.with_method(method)
                })
                .collect(),
            None => {
                let method = self.fallback_method(&entries, block);
                debug!("No transfer/check boundary accepted, defaulting to {}", method);
                tag_all(entries, method)
            }
        }
    }

    /// Index of the last transfer entry, if some boundary reaches the threshold.
    fn split_point(&self, entries: &[PaymentEntry], block: &str) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;

        for (i, pair) in entries.windows(2).enumerate() {
            let gap = block.get(pair[0].end..pair[1].start).unwrap_or("");
            let score = score_boundary(gap, &self.scoring);
            trace!("Boundary {} score {} gap {:?}", i, score, gap);

            if best.is_none_or(|(_, top)| score > top) {
                best = Some((i, score));
            }
        }

        best.filter(|(_, score)| *score >= self.scoring.acceptance_threshold)
            .map(|(i, _)| i)
    }

    fn fallback_method(&self, entries: &[PaymentEntry], block: &str) -> PaymentMethod {
        match self.fallback {
            FallbackPolicy::Transfer => PaymentMethod::Transfer,
            FallbackPolicy::Check => PaymentMethod::Check,
            FallbackPolicy::ZeroCheckTotal => {
                let tail = entries
                    .last()
                    .and_then(|last| block.get(last.end..))
                    .unwrap_or("");

                let zero_total = standalone_amounts(tail)
                    .into_iter()
                    .any(|amount| Decimal::from_str(amount).is_ok_and(|d| d.is_zero()));

                if zero_total {
                    PaymentMethod::Transfer
                } else {
                    PaymentMethod::Check
                }
            }
        }
    }
}

/// Score the text between two adjacent payment entries.
pub fn score_boundary(gap: &str, scoring: &BoundaryScoring) -> u32 {
    let mut score = 0;

    if !standalone_amounts(gap).is_empty() {
        score += scoring.standalone_total_weight;
    }
    if gap.chars().count() > scoring.long_gap_min_chars {
        score += scoring.long_gap_weight;
    }
    if gap.contains(',') {
        score += scoring.comma_weight;
    }

    score
}

/// Decimal amounts in `text` that are not wrapped in parentheses.
pub fn standalone_amounts(text: &str) -> Vec<&str> {
    DECIMAL_AMOUNT
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?.as_str();
            if full.starts_with('(') || full.ends_with(')') {
                None
            } else {
                caps.get(1).map(|m| m.as_str())
            }
        })
        .collect()
}

fn tag_all(entries: Vec<PaymentEntry>, method: PaymentMethod) -> Vec<PaymentEntry> {
    entries.into_iter().map(|entry| entry.with_method(method)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::rules::extract_entries;
    use pretty_assertions::assert_eq;

    fn auto() -> PaymentClassifier {
        PaymentClassifier::from_config(&ExtractionConfig::tolerant())
    }

    fn methods(entries: &[PaymentEntry]) -> Vec<PaymentMethod> {
        entries.iter().filter_map(|e| e.method).collect()
    }

    #[test]
    fn test_standalone_amounts() {
        assert_eq!(standalone_amounts(" TOTAL TRANSFERENCIA 750.50 "), vec!["750.50"]);
        assert!(standalone_amounts("(750.50)").is_empty());
        assert!(standalone_amounts("TOTAL 750").is_empty());
        assert_eq!(standalone_amounts("0.00 y (1.00) y 3.25"), vec!["0.00", "3.25"]);
    }

    #[test]
    fn test_score_boundary() {
        let scoring = BoundaryScoring::default();

        assert_eq!(score_boundary(" ", &scoring), 0);
        assert_eq!(score_boundary(" TOTAL TRANSFERENCIA 750.50 ", &scoring), 3);
        assert_eq!(score_boundary(" 750.50, ", &scoring), 3);
        assert_eq!(score_boundary(" Pagada, Total Cheques ", &scoring), 2);

        let strict = ExtractionConfig::strict().scoring;
        assert_eq!(score_boundary(" 750.50 ", &strict), 3);
        assert_eq!(score_boundary(" 123456789 ", &strict), 0);
        assert_eq!(score_boundary(" 123456789012 ", &strict), 1);
    }

    #[test]
    fn test_forced_mode_tags_everything() {
        let block = "Banco General -- (500.00) TOTAL TRANSFERENCIA 750.50 Mercantil Bank -- (250.50)";
        let classifier = PaymentClassifier::new(
            PaymentMode::Check,
            BoundaryScoring::default(),
            FallbackPolicy::ZeroCheckTotal,
        );

        let tagged = classifier.classify(extract_entries(block), block);
        assert_eq!(methods(&tagged), vec![PaymentMethod::Check, PaymentMethod::Check]);
    }

    #[test]
    fn test_auto_splits_at_subtotal() {
        let block = "0000009962 Juan 2026-01-14 Banco General -- (500.00) Banesco -- (250.00) \
                     TOTAL TRANSFERENCIA 750.00 Mercantil Bank -- (250.50) TOTAL CHEQUE 250.50";

        let tagged = auto().classify(extract_entries(block), block);
        assert_eq!(
            methods(&tagged),
            vec![PaymentMethod::Transfer, PaymentMethod::Transfer, PaymentMethod::Check]
        );
    }

    #[test]
    fn test_auto_picks_first_of_equal_scores() {
        let block = "A -- (1.00) total 1.00 xx B -- (2.00) total 2.00 xx C -- (3.00)";

        let tagged = auto().classify(extract_entries(block), block);
        assert_eq!(
            methods(&tagged),
            vec![PaymentMethod::Transfer, PaymentMethod::Check, PaymentMethod::Check]
        );
    }

    #[test]
    fn test_fallback_zero_check_total() {
        let block = "Banco General -- (500.00) Banesco -- (250.00) TOTAL CHEQUES 0.00";
        let tagged = auto().classify(extract_entries(block), block);
        assert_eq!(methods(&tagged), vec![PaymentMethod::Transfer, PaymentMethod::Transfer]);

        let block = "Banco General -- (500.00) Banesco -- (250.00) TOTAL CHEQUES 750.00";
        let tagged = auto().classify(extract_entries(block), block);
        assert_eq!(methods(&tagged), vec![PaymentMethod::Check, PaymentMethod::Check]);
    }

    #[test]
    fn test_fixed_fallback_policies() {
        let block = "Banco General -- (500.00) TOTAL CHEQUES 0.00";
        let entries = extract_entries(block);

        let check = PaymentClassifier::new(PaymentMode::Auto, BoundaryScoring::default(), FallbackPolicy::Check);
        assert_eq!(methods(&check.classify(entries.clone(), block)), vec![PaymentMethod::Check]);

        let transfer = PaymentClassifier::new(PaymentMode::Auto, BoundaryScoring::default(), FallbackPolicy::Transfer);
        assert_eq!(methods(&transfer.classify(entries, block)), vec![PaymentMethod::Transfer]);
    }

    #[test]
    fn test_empty_entries() {
        assert!(auto().classify(Vec::new(), "nothing here").is_empty());
    }
}

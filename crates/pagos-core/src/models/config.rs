//! Configuration structures for the conversion pipeline.
//!
//! Everything corpus-specific (noise words, score weights, thresholds, the
//! invoice token padding) lives here so the extraction rules stay generic.

use serde::{Deserialize, Serialize};

use crate::error::{PagosError, Result};
use crate::models::report::PaymentMethod;

/// Main configuration for the pagos pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PagosConfig {
    /// Report text extraction configuration.
    pub extraction: ExtractionConfig,

    /// Tabular (CSV) input configuration.
    pub table: TableConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// How payment methods are assigned to extracted entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Infer transfer/check boundaries from the text between entries.
    #[default]
    Auto,
    /// Tag every entry as a transfer.
    #[serde(alias = "transferencia")]
    Transfer,
    /// Tag every entry as a check.
    #[serde(alias = "cheque")]
    Check,
}

impl PaymentMode {
    /// The fixed tag of a forced mode.
    pub fn forced(&self) -> Option<PaymentMethod> {
        match self {
            Self::Auto => None,
            Self::Transfer => Some(PaymentMethod::Transfer),
            Self::Check => Some(PaymentMethod::Check),
        }
    }
}

/// Where the beneficiary name comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeneficiaryStrategy {
    /// "Cliente, Ocasional|Frecuente" label first, noise stripping otherwise.
    #[default]
    LabelWithFallback,
    /// Label only; blocks without the label get an empty beneficiary.
    LabelOnly,
    /// Noise stripping of the text before the date only.
    HeuristicOnly,
}

/// Tag applied in auto mode when no boundary scores high enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// A zero-valued standalone amount after the last entry means the check
    /// total is zero, so everything is a transfer; otherwise everything is a check.
    #[default]
    ZeroCheckTotal,
    /// Always tag as transfer.
    Transfer,
    /// Always tag as check.
    Check,
}

/// Weights used to score the text between two adjacent payment entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryScoring {
    /// Added when the gap holds a standalone (unparenthesized) decimal total.
    pub standalone_total_weight: u32,

    /// Added when the gap is longer than `long_gap_min_chars`.
    pub long_gap_weight: u32,

    /// Gap length, in characters, that must be exceeded.
    pub long_gap_min_chars: usize,

    /// Added when the gap contains a comma.
    pub comma_weight: u32,

    /// Minimum score for a boundary to split transfers from checks.
    pub acceptance_threshold: u32,
}

impl Default for BoundaryScoring {
    fn default() -> Self {
        Self {
            standalone_total_weight: 2,
            long_gap_weight: 1,
            long_gap_min_chars: 10,
            comma_weight: 1,
            acceptance_threshold: 3,
        }
    }
}

/// Report text extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Payment method assignment mode.
    pub mode: PaymentMode,

    /// Minimum number of leading zeros for a digit run to be an invoice token.
    pub min_leading_zeros: usize,

    /// Beneficiary extraction strategy.
    pub beneficiary: BeneficiaryStrategy,

    /// Longest beneficiary produced by the heuristic strategy, in characters.
    pub beneficiary_max_chars: usize,

    /// Column headers, status labels and operator names that appear verbatim
    /// in reports and are never part of a beneficiary name.
    pub noise_words: Vec<String>,

    /// Boundary scoring for auto mode.
    pub scoring: BoundaryScoring,

    /// Auto mode tag when no boundary is accepted.
    pub fallback: FallbackPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::tolerant()
    }
}

impl ExtractionConfig {
    /// Profile for report variants with as few as three padding zeros.
    pub fn tolerant() -> Self {
        Self {
            mode: PaymentMode::Auto,
            min_leading_zeros: 3,
            beneficiary: BeneficiaryStrategy::LabelWithFallback,
            beneficiary_max_chars: 70,
            noise_words: default_noise_words(),
            scoring: BoundaryScoring::default(),
            fallback: FallbackPolicy::ZeroCheckTotal,
        }
    }

    /// Profile for report variants that always pad invoice numbers with four
    /// or more zeros and print explicit transfer totals.
    pub fn strict() -> Self {
        Self {
            min_leading_zeros: 4,
            scoring: BoundaryScoring {
                standalone_total_weight: 3,
                long_gap_min_chars: 12,
                ..BoundaryScoring::default()
            },
            ..Self::tolerant()
        }
    }

    /// Replace the payment mode.
    pub fn with_mode(mut self, mode: PaymentMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check values the extraction rules cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.min_leading_zeros == 0 {
            return Err(PagosError::Config(
                "extraction.min_leading_zeros must be at least 1".to_string(),
            ));
        }
        if self.beneficiary_max_chars == 0 {
            return Err(PagosError::Config(
                "extraction.beneficiary_max_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Named extraction profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    #[default]
    Tolerant,
    Strict,
}

impl Profile {
    pub fn extraction(&self) -> ExtractionConfig {
        match self {
            Self::Tolerant => ExtractionConfig::tolerant(),
            Self::Strict => ExtractionConfig::strict(),
        }
    }
}

fn default_noise_words() -> Vec<String> {
    [
        "Factura",
        "Nro",
        "Número",
        "Numero",
        "Fecha",
        "Cliente",
        "Ocasional",
        "Frecuente",
        "Beneficiario",
        "Estatus",
        "Estado",
        "Status",
        "Pagada",
        "Pagado",
        "Procesada",
        "Procesado",
        "Aprobada",
        "Aprobado",
        "Pendiente",
        "Anulada",
        "Emitida",
        "Monto",
        "Total",
        "Transferencia",
        "Transferencias",
        "Cheque",
        "Cheques",
        "Detalle",
        "Forma de pago",
        "Banco",
        "Operador",
        "Usuario",
        "Página",
        "Reporte de pagos",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Column names of the tabular report layout, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Invoice number column.
    pub invoice_column: String,

    /// Client (beneficiary) name column.
    pub client_column: String,

    /// Date column.
    pub date_column: String,

    /// Transfer detail column, "bank -- (amount)" entries.
    pub transfer_column: String,

    /// Check detail column, "bank -- (amount)" entries.
    pub check_column: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            invoice_column: "factura".to_string(),
            client_column: "cliente".to_string(),
            date_column: "fecha".to_string(),
            transfer_column: "detalle transferencia".to_string(),
            check_column: "detalle cheque".to_string(),
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<()> {
        let columns = [
            ("invoice_column", &self.invoice_column),
            ("client_column", &self.client_column),
            ("date_column", &self.date_column),
            ("transfer_column", &self.transfer_column),
            ("check_column", &self.check_column),
        ];
        for (key, name) in columns {
            if name.trim().is_empty() {
                return Err(PagosError::Config(format!("table.{} must not be empty", key)));
            }
        }
        Ok(())
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix the output with the column header line.
    pub include_header: bool,
}

impl PagosConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| PagosError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PagosError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        self.table.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_differ_in_thresholds() {
        let tolerant = ExtractionConfig::tolerant();
        let strict = ExtractionConfig::strict();

        assert_eq!(tolerant.min_leading_zeros, 3);
        assert_eq!(strict.min_leading_zeros, 4);
        assert_eq!(tolerant.scoring.standalone_total_weight, 2);
        assert_eq!(strict.scoring.standalone_total_weight, 3);
        assert_eq!(strict.scoring.long_gap_min_chars, 12);
        assert_eq!(strict.noise_words, tolerant.noise_words);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PagosConfig =
            serde_json::from_str(r#"{"extraction": {"mode": "cheque"}, "output": {"include_header": true}}"#)
                .unwrap();

        assert_eq!(config.extraction.mode, PaymentMode::Check);
        assert_eq!(config.extraction.min_leading_zeros, 3);
        assert!(config.output.include_header);
        assert_eq!(config.table.invoice_column, "factura");
    }

    #[test]
    fn test_validate_rejects_zero_padding() {
        let mut config = PagosConfig::default();
        config.extraction.min_leading_zeros = 0;
        assert!(matches!(config.validate(), Err(PagosError::Config(_))));

        let mut config = PagosConfig::default();
        config.table.check_column = "  ".to_string();
        assert!(matches!(config.validate(), Err(PagosError::Config(_))));
    }

    #[test]
    fn test_forced_mode() {
        assert_eq!(PaymentMode::Auto.forced(), None);
        assert_eq!(PaymentMode::Transfer.forced(), Some(PaymentMethod::Transfer));
        assert_eq!(PaymentMode::Check.forced(), Some(PaymentMethod::Check));
    }
}

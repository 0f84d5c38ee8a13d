//! Subcommands and the options they share.

pub mod batch;
pub mod config;
pub mod convert;

use std::path::Path;

use clap::{Args, ValueEnum};
use tracing::debug;

use pagos_core::{PagosConfig, PaymentMode, Profile};

/// Extraction options accepted by every converting command.
#[derive(Args, Debug, Clone)]
pub struct ExtractionArgs {
    /// Payment method assignment
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Extraction profile for the report variant
    #[arg(short, long, value_enum)]
    profile: Option<ProfileArg>,

    /// Prefix the output with the column header line
    #[arg(long)]
    header: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    /// Infer transfers and checks from the report text
    Auto,
    /// Every payment is a transfer
    #[value(alias = "transfer")]
    Transferencia,
    /// Every payment is a check
    #[value(alias = "check")]
    Cheque,
}

impl From<ModeArg> for PaymentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => PaymentMode::Auto,
            ModeArg::Transferencia => PaymentMode::Transfer,
            ModeArg::Cheque => PaymentMode::Check,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ProfileArg {
    /// Three or more padding zeros, lighter subtotal weight
    Tolerant,
    /// Four or more padding zeros, heavier subtotal weight
    Strict,
}

impl From<ProfileArg> for Profile {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::Tolerant => Profile::Tolerant,
            ProfileArg::Strict => Profile::Strict,
        }
    }
}

impl ExtractionArgs {
    /// Apply command line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut PagosConfig) {
        if let Some(profile) = self.profile {
            let preset = Profile::from(profile).extraction();
            config.extraction.min_leading_zeros = preset.min_leading_zeros;
            config.extraction.scoring = preset.scoring;
        }
        if let Some(mode) = self.mode {
            config.extraction.mode = mode.into();
        }
        if self.header {
            config.output.include_header = true;
        }
    }
}

/// Load the configuration from `config_path`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PagosConfig> {
    if let Some(path) = config_path {
        return Ok(PagosConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(PagosConfig::from_file(&default_path)?)
    } else {
        Ok(PagosConfig::default())
    }
}

//! Convert command - turn one report into payment rows.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use pagos_core::models::report::ROW_HEADER;
use pagos_core::{Conversion, Converter, InputKind, PagosError, PaymentMethod, Row};

use super::{ExtractionArgs, load_config};

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input report (PDF, CSV or TXT)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tsv")]
    format: OutputFormat,

    /// Print transfer and check totals to stderr
    #[arg(long)]
    totals: bool,

    #[command(flatten)]
    extraction: ExtractionArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated rows, ready to paste into a spreadsheet
    Tsv,
    /// JSON array of rows
    Json,
    /// Comma-separated rows
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

pub async fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.extraction.apply(&mut config);
    let converter = Converter::new(config)?;

    let conversion = convert_path(&converter, &args.input).await?;
    let output = format_rows(&converter, &conversion.rows, args.format)?;

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        println!(
            "{} {} rows written to {}",
            style("✓").green(),
            conversion.rows.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.totals {
        print_totals(&conversion.rows);
    }

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

/// Read `path` and convert it on a blocking worker.
pub async fn convert_path(converter: &Converter, path: &Path) -> anyhow::Result<Conversion> {
    let kind = InputKind::from_path(path)?;

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    info!("Processing {:?} file: {}", kind, path.display());
    let data = tokio::fs::read(path).await?;

    let worker = converter.clone();
    let result = tokio::task::spawn_blocking(move || worker.convert(kind, &data)).await?;

    match result {
        Ok(conversion) => Ok(conversion),
        Err(PagosError::NoRows) => anyhow::bail!("No invoice rows found in {}", path.display()),
        Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to convert {}", path.display()))),
    }
}

/// Render rows in the requested format.
pub fn format_rows(converter: &Converter, rows: &[Row], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Tsv => Ok(converter.render(rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => format_csv(rows, converter.config().output.include_header),
    }
}

fn format_csv(rows: &[Row], include_header: bool) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    if include_header {
        wtr.write_record(ROW_HEADER)?;
    }
    for row in rows {
        wtr.write_record(row.fields())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data.trim_end().to_string())
}

fn print_totals(rows: &[Row]) {
    let mut transfers = (0usize, Decimal::ZERO);
    let mut checks = (0usize, Decimal::ZERO);

    for row in rows {
        let Ok(amount) = Decimal::from_str(&row.amount) else {
            warn!("Skipping unparseable amount {:?} of invoice {}", row.amount, row.invoice_id);
            continue;
        };
        let bucket = match row.payment_method {
            PaymentMethod::Transfer => &mut transfers,
            PaymentMethod::Check => &mut checks,
        };
        bucket.0 += 1;
        bucket.1 += amount;
    }

    eprintln!();
    eprintln!(
        "{} {}: {} payments, {}",
        style("ℹ").blue(),
        PaymentMethod::Transfer,
        transfers.0,
        transfers.1
    );
    eprintln!(
        "{} {}: {} payments, {}",
        style("ℹ").blue(),
        PaymentMethod::Check,
        checks.0,
        checks.1
    );
}

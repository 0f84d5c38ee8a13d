//! Batch conversion command for multiple report files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use tracing::{debug, error, warn};

use pagos_core::Converter;

use super::convert::{OutputFormat, convert_path, format_rows};
use super::{ExtractionArgs, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "tsv")]
    format: OutputFormat,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    #[command(flatten)]
    extraction: ExtractionArgs,
}

/// Result of converting a single file.
struct FileResult {
    path: PathBuf,
    output: Option<PathBuf>,
    rows: usize,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.extraction.apply(&mut config);
    let converter = Converter::new(config)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "csv" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to convert",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match convert_single_file(&converter, &path, &args).await {
            Ok((output, rows)) => {
                debug!("Wrote {} rows to {}", rows, output.display());
                results.push(FileResult {
                    path,
                    output: Some(output),
                    rows,
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to convert {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        output: None,
                        rows: 0,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to convert {}: {}", path.display(), error_msg);
                    anyhow::bail!("Conversion failed: {}", error_msg);
                }
            }
        }
    }

    let successful: Vec<_> = results.iter().filter(|r| r.error.is_none()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let total_rows: usize = successful.iter().map(|r| r.rows).sum();

    println!();
    println!(
        "{} Converted {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} rows), {} failed",
        style(successful.len()).green(),
        total_rows,
        style(failed.len()).red()
    );

    for result in &successful {
        if let Some(output) = &result.output {
            println!("  {} -> {}", result.path.display(), output.display());
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

async fn convert_single_file(
    converter: &Converter,
    path: &Path,
    args: &BatchArgs,
) -> anyhow::Result<(PathBuf, usize)> {
    let conversion = convert_path(converter, path).await?;
    let content = format_rows(converter, &conversion.rows, args.format)?;

    let output_path = output_path_for(path, args.output_dir.as_deref(), args.format);
    if output_path == path {
        anyhow::bail!("Refusing to overwrite input {}; pass --output-dir", path.display());
    }
    tokio::fs::write(&output_path, content).await?;

    Ok((output_path, conversion.rows.len()))
}

/// `<stem>.<ext>` in `output_dir`, or next to the input.
fn output_path_for(input: &Path, output_dir: Option<&Path>, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    let file_name = format!("{}.{}", stem, format.extension());

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

//! Batch command - extract receipts from many recognized-text files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use bonex_core::{ExtractionOutcome, GeminiBackend, ReceiptPipeline};

use super::extract::{build_pipeline, format_csv, format_text, load_config, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-receipt files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of extracting a single file.
struct FileResult {
    path: PathBuf,
    outcome: Option<ExtractionOutcome>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let pipeline = build_pipeline(&config)?;

    // One engine call per file, in glob order
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = extract_single_file(&path, &pipeline).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(outcome) => {
                results.push(FileResult {
                    path: path.clone(),
                    outcome: Some(outcome),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to extract {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path: path.clone(),
                        outcome: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to extract {}: {}", path.display(), error_msg);
                    anyhow::bail!("Extraction failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    // Write outputs
    let successful: Vec<_> = results.iter().filter(|r| r.outcome.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(ref output_dir) = args.output_dir {
        for result in &successful {
            if let Some(outcome) = &result.outcome {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("receipt");

                let extension = match args.format {
                    OutputFormat::Json => "json",
                    OutputFormat::Csv => "csv",
                    OutputFormat::Text => "txt",
                };

                let output_path = output_dir.join(format!("{}.{}", output_name, extension));

                let content = match args.format {
                    OutputFormat::Json => serde_json::to_string(&outcome.receipt)?,
                    OutputFormat::Csv => format_csv(&outcome.receipt)?,
                    OutputFormat::Text => format_text(&outcome.receipt),
                };

                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

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

async fn extract_single_file(
    path: &PathBuf,
    pipeline: &ReceiptPipeline<GeminiBackend>,
) -> anyhow::Result<ExtractionOutcome> {
    let text = fs::read_to_string(path)?;
    let outcome = pipeline.extract(&[text]).await?;
    Ok(outcome)
}

fn write_summary(path: &PathBuf, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "store_name",
        "date",
        "category",
        "total_amount",
        "products",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(outcome) = &result.outcome {
            let receipt = &outcome.receipt;
            wtr.write_record([
                filename,
                "success",
                &receipt.store_name,
                &receipt.date.to_string(),
                receipt.category.as_str(),
                &receipt.total_amount.to_string(),
                &receipt.products.len().to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

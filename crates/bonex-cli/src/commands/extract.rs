//! Extract command - pull structured data from one receipt.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use bonex_core::models::config::BonexConfig;
use bonex_core::models::receipt::ReceiptExtraction;
use bonex_core::{ExtractionOutcome, GeminiBackend, ReceiptPipeline};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Recognized-text files, one per receipt image, in image order.
    /// Reads stdin when no files are given.
    input: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show the raw engine response
    #[arg(long)]
    show_raw: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let blocks = read_blocks(&args.input)?;

    info!("Extracting receipt from {} text blocks", blocks.len());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Preparing engine...");
    pb.set_position(10);

    let pipeline = build_pipeline(&config)?;

    pb.set_message("Extracting receipt data...");
    pb.set_position(30);

    let outcome = pipeline.extract(&blocks).await?;

    pb.set_position(90);
    pb.finish_with_message("Done");

    let output = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_raw {
        println!();
        println!("{}", style("Raw engine response:").blue());
        println!("{}", outcome.raw_response);
        println!(
            "{} Extraction time: {}ms",
            style("ℹ").blue(),
            outcome.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load configuration from an explicit path, or fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BonexConfig> {
    match config_path {
        Some(path) => Ok(BonexConfig::from_file(std::path::Path::new(path))?),
        None => Ok(BonexConfig::default()),
    }
}

/// Build the extraction pipeline described by the configuration.
pub fn build_pipeline(config: &BonexConfig) -> anyhow::Result<ReceiptPipeline<GeminiBackend>> {
    let backend = GeminiBackend::from_env()?
        .with_model(&config.engine.model)
        .with_timeout(config.engine.timeout())
        .with_max_output_tokens(config.engine.max_output_tokens);

    Ok(ReceiptPipeline::new(backend).with_language(&config.extraction.language))
}

fn read_blocks(inputs: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    if inputs.is_empty() {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(vec![text]);
    }

    let mut blocks = Vec::with_capacity(inputs.len());
    for path in inputs {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        blocks.push(fs::read_to_string(path)?);
    }

    Ok(blocks)
}

fn format_outcome(outcome: &ExtractionOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&outcome.receipt)?),
        OutputFormat::Csv => format_csv(&outcome.receipt),
        OutputFormat::Text => Ok(format_text(&outcome.receipt)),
    }
}

pub fn format_csv(receipt: &ReceiptExtraction) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["store_name", "date", "category", "total_amount", "products"])?;

    wtr.write_record([
        &receipt.store_name,
        &receipt.date.to_string(),
        receipt.category.as_str(),
        &receipt.total_amount.to_string(),
        &receipt.products.len().to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(receipt: &ReceiptExtraction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Store: {}\n", receipt.store_name));
    output.push_str(&format!("Date: {}\n", receipt.date));
    output.push_str(&format!("Category: {}\n", receipt.category));
    output.push_str("\n");

    output.push_str("Products:\n");
    for product in &receipt.products {
        output.push_str(&format!(
            "  {:<30} {:>8}  {}\n",
            product.name, product.price, product.category
        ));
    }
    output.push_str("\n");

    output.push_str(&format!("Total: {}\n", receipt.total_amount));

    output
}

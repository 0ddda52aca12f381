//! Stats command - summarize saved receipt extractions.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use glob::glob;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use bonex_core::models::receipt::ReceiptExtraction;
use bonex_core::stats::{self, CategorySpend, Period, PeriodSpend};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Arguments for the stats command.
#[derive(Args)]
pub struct StatsArgs {
    /// Saved receipt JSON files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Time bucket for the period table
    #[arg(short, long, default_value = "month", value_parser = parse_period)]
    period: Period,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: StatsFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum StatsFormat {
    /// Styled tables
    Text,
    /// CSV rows
    Csv,
    /// JSON document
    Json,
}

fn parse_period(s: &str) -> Result<Period, String> {
    Period::from_str(s).ok_or_else(|| format!("unknown period: {s} (expected day, month, or year)"))
}

pub async fn run(args: StatsArgs) -> anyhow::Result<()> {
    let receipts = load_receipts(&args.input)?;

    let by_category = stats::spend_by_category(&receipts);
    let by_period = stats::spend_by_period(&receipts, args.period);

    match args.format {
        StatsFormat::Text => print_tables(&receipts, &by_category, &by_period, args.period),
        StatsFormat::Csv => print!("{}", format_csv(&by_category, &by_period)?),
        StatsFormat::Json => {
            let document = serde_json::json!({
                "time_based": by_period,
                "category_based": by_category,
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}

fn load_receipts(pattern: &str) -> anyhow::Result<Vec<ReceiptExtraction>> {
    let files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", pattern);
    }

    debug!("Reading {} saved extractions", files.len());

    let mut receipts = Vec::with_capacity(files.len());
    for path in &files {
        let text = fs::read_to_string(path)?;
        match serde_json::from_str::<ReceiptExtraction>(&text) {
            Ok(receipt) => receipts.push(receipt),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    if receipts.is_empty() {
        anyhow::bail!("No receipts could be loaded from {} files", files.len());
    }

    Ok(receipts)
}

fn print_tables(
    receipts: &[ReceiptExtraction],
    by_category: &[CategorySpend],
    by_period: &[PeriodSpend],
    period: Period,
) {
    println!("{} Loaded {} receipts", style("ℹ").blue(), receipts.len());
    println!();

    println!("{}", style("Spending by category:").bold());
    for spend in by_category {
        println!(
            "  {:<14} {:>10}   {} receipts",
            spend.category.to_string(),
            spend.total_amount,
            spend.receipt_count
        );
    }
    println!();

    println!("{}", style(format!("Spending by {}:", period)).bold());
    for spend in by_period {
        println!(
            "  {:<14} {:>10}",
            period_label(period, spend.period),
            spend.total_amount
        );
    }
    println!();

    let total = receipts
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc + r.total_amount);
    println!("{} Total spend: {}", style("✓").green(), total);
}

fn format_csv(by_category: &[CategorySpend], by_period: &[PeriodSpend]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["section", "key", "total_amount", "receipt_count"])?;

    for spend in by_category {
        wtr.write_record([
            "category",
            spend.category.as_str(),
            &spend.total_amount.to_string(),
            &spend.receipt_count.to_string(),
        ])?;
    }

    for spend in by_period {
        wtr.write_record([
            "period",
            &spend.period.to_string(),
            &spend.total_amount.to_string(),
            "",
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn period_label(period: Period, key: i32) -> String {
    match period {
        Period::Month => MONTH_NAMES
            .get((key - 1) as usize)
            .map(|name| name.to_string())
            .unwrap_or_else(|| key.to_string()),
        Period::Day | Period::Year => key.to_string(),
    }
}

//! Extract command - decode passport records from one recorded OCR file.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use passcan_core::{load_ocr_dump, DocumentProcessor, DocumentResult};

use super::load_config;
use super::output::{format_result, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Recorded OCR output (native or Google Vision JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show confidence scores of accepted pages
    #[arg(long)]
    show_confidence: bool,

    /// Decode pages in parallel
    #[arg(long)]
    parallel: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;
    if args.parallel {
        config.pipeline.parallel = true;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);

    pb.set_message("Loading OCR output...");
    let json = tokio::fs::read_to_string(&args.input).await?;
    let pages = load_ocr_dump(&json)?;
    debug!("Loaded {} pages", pages.len());

    pb.set_message("Extracting passport fields...");
    let result = DocumentProcessor::from_config(&config).process_pages(pages);
    pb.finish_and_clear();

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    print_summary(&result, args.show_confidence);
    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Per-document summary on stderr. Rejected pages are not an error.
fn print_summary(result: &DocumentResult, show_confidence: bool) {
    eprintln!(
        "{} {} pages: {} accepted, {} rejected",
        style("ℹ").blue(),
        result.len(),
        style(result.success_count()).green(),
        style(result.failure_count()).red()
    );

    for outcome in result {
        if let Some(reason) = outcome.reason() {
            eprintln!("  - page {}: {}", outcome.page_number(), reason);
        }
    }

    if show_confidence {
        for (page, record) in result.records() {
            eprintln!(
                "{} Page {} confidence: {:.1}%",
                style("ℹ").blue(),
                page,
                record.confidence_score() * 100.0
            );
        }
    }
}

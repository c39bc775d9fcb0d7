//! Batch processing command for many recorded OCR files.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use passcan_core::{load_ocr_dump, DocumentProcessor, DocumentResult, PageOutcome};

use super::load_config;
use super::output::{format_result, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of OCR output files
    #[arg(required = true)]
    input: String,

    /// Output directory
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

    /// Decode pages in parallel
    #[arg(long)]
    parallel: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Result<DocumentResult, String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;
    if args.parallel {
        config.pipeline.parallel = true;
    }

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        tokio::fs::create_dir_all(output_dir).await?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let processor = DocumentProcessor::from_config(&config);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match process_file(&path, &processor).await {
            Ok(result) => {
                if let Some(output_dir) = &args.output_dir {
                    write_output(output_dir, &path, &result, args.format).await?;
                }
                results.push(FileResult {
                    path,
                    outcome: Ok(result),
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        outcome: Err(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let (accepted, rejected) = results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok())
        .fold((0, 0), |(a, r), doc| (a + doc.success_count(), r + doc.failure_count()));
    let failed: Vec<_> = results.iter().filter(|r| r.outcome.is_err()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} pages accepted, {} pages rejected, {} files failed",
        style(accepted).green(),
        style(rejected).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            if let Err(e) = &result.outcome {
                eprintln!("  - {}: {}", result.path.display(), e);
            }
        }
    }

    Ok(())
}

async fn process_file(path: &Path, processor: &DocumentProcessor) -> anyhow::Result<DocumentResult> {
    let json = tokio::fs::read_to_string(path).await?;
    let pages = load_ocr_dump(&json)?;
    Ok(processor.process_pages(pages))
}

async fn write_output(
    output_dir: &Path,
    path: &Path,
    result: &DocumentResult,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let output_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

    tokio::fs::write(&output_path, format_result(result, format)?).await?;
    debug!("Wrote output to {}", output_path.display());

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "page", "status", "passport_number", "confidence", "reason"])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &result.outcome {
            Ok(document) => {
                for outcome in document {
                    let page = outcome.page_number().to_string();
                    match outcome {
                        PageOutcome::Success { record, .. } => wtr.write_record([
                            filename,
                            page.as_str(),
                            "success",
                            record.passport_number(),
                            &format!("{:.4}", record.confidence_score()),
                            "",
                        ])?,
                        PageOutcome::Failure { reason, .. } => {
                            wtr.write_record([filename, page.as_str(), "failure", "", "", reason])?
                        }
                    }
                }
            }
            Err(e) => wtr.write_record([filename, "", "error", "", "", e])?,
        }
    }

    wtr.flush()?;
    Ok(())
}

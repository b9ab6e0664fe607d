//! Batch processing command for multiple notice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use noticex_core::{acquire_file, ExtractionResult, NoticeField, NoticeParser, PdfConfig};

use super::output::{diagnostics_cell, format_result, status, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
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

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Result<ExtractionResult, String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::config::load(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt" | "text")
        })
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
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // One shared parser; extraction is stateless so workers need no locking
    let parser = Arc::new(NoticeParser::from_config(&config.extraction));
    let pdf_config = Arc::new(config.pdf.clone());
    let workers = Arc::new(Semaphore::new(args.jobs.max(1)));

    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let permit = Arc::clone(&workers).acquire_owned().await?;
        let parser = Arc::clone(&parser);
        let pdf_config = Arc::clone(&pdf_config);

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let outcome = process_single_file(&path, &parser, &pdf_config)
                .map_err(|e| e.to_string());
            FileResult {
                path,
                outcome,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            }
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await?;
        overall_pb.inc(1);

        if let Err(error_msg) = &result.outcome {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                overall_pb.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        results.push(result);
    }

    overall_pb.finish_and_clear();

    // Write outputs
    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Ok(extraction) = &result.outcome {
                let output_path = output_dir.join(output_file_name(&result.path, args.format));

                fs::write(&output_path, format_result(extraction, args.format)?)?;
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

    let failed: Vec<_> = results.iter().filter(|r| r.outcome.is_err()).collect();
    let with_warnings = results
        .iter()
        .filter(|r| matches!(&r.outcome, Ok(e) if !e.is_valid()))
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} valid, {} with warnings, {} failed",
        style(results.len() - failed.len() - with_warnings).green(),
        style(with_warnings).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            if let Err(error_msg) = &result.outcome {
                println!("  - {}: {}", result.path.display(), error_msg);
            }
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    parser: &NoticeParser,
    pdf_config: &PdfConfig,
) -> anyhow::Result<ExtractionResult> {
    let acquired = acquire_file(path, pdf_config)?;
    Ok(parser.parse(&acquired.text))
}

/// Per-file output name. Keeps the input extension so `notice.pdf` and
/// `notice.txt` in one batch do not overwrite each other.
fn output_file_name(input: &Path, format: OutputFormat) -> String {
    let name = input
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "notice".into());
    format!("{}.{}", name, format.extension())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["file"];
    header.extend(NoticeField::ALL.iter().map(|f| f.as_str()));
    header.extend(["status", "diagnostics", "processing_time_ms"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut row = vec![filename];
        match &result.outcome {
            Ok(extraction) => {
                row.extend(
                    NoticeField::ALL
                        .iter()
                        .map(|f| extraction.record.get(*f).to_string()),
                );
                row.push(status(extraction).to_string());
                row.push(diagnostics_cell(extraction));
            }
            Err(error_msg) => {
                row.extend(NoticeField::ALL.iter().map(|_| String::new()));
                row.push("error".to_string());
                row.push(error_msg.clone());
            }
        }
        row.push(result.processing_time_ms.to_string());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name_keeps_input_extension() {
        assert_eq!(
            output_file_name(Path::new("in/notice.pdf"), OutputFormat::Json),
            "notice.pdf.json"
        );
        assert_eq!(
            output_file_name(Path::new("in/notice.txt"), OutputFormat::Json),
            "notice.txt.json"
        );
        assert_eq!(
            output_file_name(Path::new("notice.txt"), OutputFormat::Text),
            "notice.txt.txt"
        );
    }
}

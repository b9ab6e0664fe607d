//! Process command - extract fields from a single notice file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use noticex_core::{acquire_file, NoticeParser};

use super::output::{format_result, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also print the normalized text the fields were extracted from
    #[arg(long)]
    show_raw: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::config::load(config_path)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading document...");
    pb.set_position(10);

    let acquired = acquire_file(&args.input, &config.pdf)?;
    debug!(
        "Acquired {} characters from {} page(s)",
        acquired.text.len(),
        acquired.page_count
    );

    pb.set_message("Extracting fields...");
    pb.set_position(60);

    let parser = NoticeParser::from_config(&config.extraction);
    let result = parser.parse(&acquired.text);

    pb.set_position(100);
    pb.finish_and_clear();

    let output = format_result(&result, args.format)?;

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

    if !acquired.pages_without_text.is_empty() {
        eprintln!(
            "{} Pages without embedded text were skipped: {:?}",
            style("⚠").yellow(),
            acquired.pages_without_text
        );
    }

    if args.show_raw {
        println!();
        println!("{}", style("Normalized text:").blue());
        println!("{}", result.normalized_text);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

//! Extract-text command - run extraction on text from stdin or an argument.
//!
//! Intended for piping in the output of an external OCR tool.

use std::io::Read;

use clap::Args;
use console::style;

use noticex_core::NoticeParser;

use super::output::{format_result, OutputFormat};

/// Arguments for the extract-text command.
#[derive(Args)]
pub struct ExtractTextArgs {
    /// Text to extract from (default: read stdin)
    #[arg(short, long)]
    text: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also print the normalized text
    #[arg(long)]
    show_raw: bool,
}

pub async fn run(args: ExtractTextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if text.trim().is_empty() {
        anyhow::bail!("No input text");
    }

    let result = NoticeParser::from_config(&config.extraction).parse(&text);
    println!("{}", format_result(&result, args.format)?);

    if args.show_raw {
        println!();
        println!("{}", style("Normalized text:").blue());
        println!("{}", result.normalized_text);
    }

    Ok(())
}

//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract_text;
pub mod output;
pub mod process;

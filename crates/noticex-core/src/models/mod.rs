//! Data models for notice extraction.

pub mod config;
pub mod notice;

pub use config::{ExtractionConfig, NoticexConfig, PdfConfig};
pub use notice::{ExtractedRecord, NoticeField, ValidationError};

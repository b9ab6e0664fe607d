//! Core library for immigration notice processing.
//!
//! This crate provides:
//! - OCR-noise tolerant text normalization
//! - Ordered rule chains for beneficiary name, receipt number, received
//!   date, validity range and case/form type
//! - Record validation with per-field diagnostics
//! - Text acquisition from plain text and PDF (embedded text layer)

pub mod error;
pub mod models;
pub mod notice;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod source;

pub use error::{AcquisitionError, NoticexError, Result};
pub use models::config::{ExtractionConfig, NoticexConfig, PdfConfig};
pub use models::notice::{ExtractedRecord, NoticeField, ValidationError};
pub use notice::{extract, normalize, validate, ExtractionResult, NoticeExtractor, NoticeParser};
#[cfg(feature = "pdf")]
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor, PdfType};
pub use source::{acquire_file, source_for_path, AcquiredText, PlainTextSource, TextSource};

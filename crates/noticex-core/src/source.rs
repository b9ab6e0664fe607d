//! Text acquisition boundary.
//!
//! A [`TextSource`] turns document bytes into the single string the
//! extraction engine consumes. Acquisition is the only fallible stage; a
//! document with no recoverable text fails with [`AcquisitionError::NoText`].

use std::path::Path;

use tracing::debug;

use crate::error::{AcquisitionError, Result};
use crate::models::config::PdfConfig;

/// Text recovered from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredText {
    /// Document text, pages joined with newlines.
    pub text: String,
    /// Number of pages in the document (1 for plain text).
    pub page_count: u32,
    /// Pages that carried no embedded text (1-indexed).
    pub pages_without_text: Vec<u32>,
}

/// Something that can recover text from document bytes.
pub trait TextSource {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Recover the document text.
    fn acquire(&self, data: &[u8]) -> Result<AcquiredText>;
}

/// Plain text files, decoded as UTF-8 with lossy replacement.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn name(&self) -> &'static str {
        "text"
    }

    fn acquire(&self, data: &[u8]) -> Result<AcquiredText> {
        let text = String::from_utf8_lossy(data).into_owned();
        if text.trim().is_empty() {
            return Err(AcquisitionError::NoText.into());
        }
        Ok(AcquiredText {
            text,
            page_count: 1,
            pages_without_text: Vec::new(),
        })
    }
}

/// Pick a text source by file extension.
#[cfg_attr(not(feature = "pdf"), allow(unused_variables))]
pub fn source_for_path(path: &Path, config: &PdfConfig) -> Result<Box<dyn TextSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        #[cfg(feature = "pdf")]
        "pdf" => Ok(Box::new(crate::pdf::PdfExtractor::with_config(config.clone()))),
        "txt" | "text" => Ok(Box::new(PlainTextSource)),
        _ => Err(AcquisitionError::UnsupportedFormat(path.display().to_string()).into()),
    }
}

/// Read a file and recover its text with the source chosen for its extension.
pub fn acquire_file(path: &Path, config: &PdfConfig) -> Result<AcquiredText> {
    let source = source_for_path(path, config)?;
    let data = std::fs::read(path)?;
    debug!(
        "Acquiring text from {} ({} bytes) with {} source",
        path.display(),
        data.len(),
        source.name()
    );
    source.acquire(&data)
}

//! PDF text acquisition.
//!
//! Only embedded text is read. Pages without a text layer are reported so a
//! caller can route them through an external OCR tool.

mod extractor;

pub use extractor::{PdfContent, PdfExtractor, PdfPage};

use crate::error::AcquisitionError;

/// Type of PDF content, judged by which pages carry embedded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Every page has embedded text.
    Text,
    /// No page has embedded text (scanned document).
    Scanned,
    /// Some pages have embedded text, some do not.
    Mixed,
    /// No pages at all.
    Empty,
}

impl PdfType {
    /// Classify a document from its page counts.
    pub fn classify(pages_with_text: usize, total_pages: usize) -> Self {
        match (pages_with_text, total_pages) {
            (_, 0) => PdfType::Empty,
            (0, _) => PdfType::Scanned,
            (n, total) if n >= total => PdfType::Text,
            _ => PdfType::Mixed,
        }
    }
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, AcquisitionError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Analyze the PDF to determine its type.
    fn analyze(&self) -> PdfType;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(PdfType::classify(0, 0), PdfType::Empty);
        assert_eq!(PdfType::classify(0, 3), PdfType::Scanned);
        assert_eq!(PdfType::classify(2, 3), PdfType::Mixed);
        assert_eq!(PdfType::classify(3, 3), PdfType::Text);
    }
}

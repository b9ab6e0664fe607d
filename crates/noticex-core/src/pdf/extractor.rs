//! Embedded text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, PdfType, Result};
use crate::error::AcquisitionError;
use crate::models::config::PdfConfig;
use crate::source::{AcquiredText, TextSource};

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    config: PdfConfig,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Type of PDF content.
    pub pdf_type: PdfType,
    /// Page texts joined with newlines.
    pub text: String,
    /// Pages read, in order.
    pub pages: Vec<PdfPage>,
}

impl PdfContent {
    /// Page numbers without embedded text.
    pub fn pages_without_text(&self) -> Vec<u32> {
        self.pages
            .iter()
            .filter(|p| !p.has_text)
            .map(|p| p.number)
            .collect()
    }
}

/// Content from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
    /// Whether the page carried enough embedded text to count.
    pub has_text: bool,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    /// Create a new PDF extractor with acquisition settings.
    pub fn with_config(config: PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            config,
        }
    }

    /// Read every page (up to `max_pages`) of the loaded document.
    ///
    /// Falls back to whole-document extraction with pdf-extract when lopdf
    /// recovers no text from any page.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let page_count = self.page_count();
        if self.document.is_none() {
            return Err(AcquisitionError::Parse("No document loaded".to_string()));
        }
        if page_count == 0 {
            return Err(AcquisitionError::NoPages);
        }

        let limit = match self.config.max_pages {
            0 => page_count,
            n => page_count.min(n as u32),
        };

        let mut pages = Vec::with_capacity(limit as usize);
        for number in 1..=limit {
            let text = match self.extract_page_text(number) {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    trace!("Page {} text extraction failed: {}", number, e);
                    String::new()
                }
            };
            let has_text = text.chars().count() >= self.config.min_text_length.max(1);
            pages.push(PdfPage {
                number,
                text,
                has_text,
            });
        }

        let with_text = pages.iter().filter(|p| p.has_text).count();
        let mut text = pages
            .iter()
            .filter(|p| p.has_text)
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            debug!("No per-page text found, trying whole-document extraction");
            match self.extract_text() {
                Ok(full) => text = full.trim().to_string(),
                Err(e) => warn!("Whole-document text extraction failed: {}", e),
            }
        }

        let pdf_type = PdfType::classify(with_text, pages.len());
        debug!(
            "PDF analysis: {} pages, {} with text, {} chars -> {:?}",
            pages.len(),
            with_text,
            text.len(),
            pdf_type
        );

        Ok(PdfContent {
            pdf_type,
            text,
            pages,
        })
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc =
            Document::load_mem(data).map_err(|e| AcquisitionError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(AcquisitionError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted).map_err(|e| {
                AcquisitionError::Parse(format!("Failed to save decrypted PDF: {}", e))
            })?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(AcquisitionError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        self.extract_all()
            .map(|content| content.pdf_type)
            .unwrap_or(PdfType::Empty)
    }

    fn extract_text(&self) -> Result<String> {
        if self.raw_data.is_empty() {
            return Err(AcquisitionError::Parse("No document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| AcquisitionError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| AcquisitionError::Parse("No document loaded".to_string()))?;

        if !doc.get_pages().contains_key(&page) {
            return Err(AcquisitionError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| AcquisitionError::TextExtraction(e.to_string()))
    }
}

impl TextSource for PdfExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn acquire(&self, data: &[u8]) -> crate::Result<AcquiredText> {
        let mut extractor = PdfExtractor::with_config(self.config.clone());
        extractor.load(data)?;
        let content = extractor.extract_all()?;

        if content.text.trim().is_empty() {
            return Err(AcquisitionError::NoText.into());
        }

        let pages_without_text = content.pages_without_text();
        if !pages_without_text.is_empty() {
            warn!(
                "{} page(s) without embedded text: {:?}",
                pages_without_text.len(),
                pages_without_text
            );
        }

        Ok(AcquiredText {
            text: content.text,
            page_count: extractor.page_count(),
            pages_without_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoticexError;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert_eq!(extractor.analyze(), PdfType::Empty);
    }

    #[test]
    fn test_extract_without_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(
            extractor.extract_page_text(1),
            Err(AcquisitionError::Parse(_))
        ));
        assert!(matches!(
            extractor.extract_all(),
            Err(AcquisitionError::Parse(_))
        ));
        assert!(extractor.extract_text().is_err());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let result = extractor.load(b"this is not a pdf");
        assert!(matches!(result, Err(AcquisitionError::Parse(_))));
    }

    #[test]
    fn test_acquire_rejects_garbage() {
        let extractor = PdfExtractor::new();
        let result = extractor.acquire(b"%PDF-broken");
        assert!(matches!(
            result,
            Err(NoticexError::Acquisition(AcquisitionError::Parse(_)))
        ));
    }
}

//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{NoticexError, Result};
use crate::notice::rules::catalog::{is_valid_prefix, DEFAULT_RECEIPT_PREFIX};

/// Main configuration for noticex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticexConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF text acquisition configuration.
    pub pdf: PdfConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Accept a bare 9-digit number as a receipt number when no labeled or
    /// prefixed candidate exists. Trades precision for recall.
    pub bare_receipt_fallback: bool,

    /// Accept an unlabeled date (or date range) when no labeled one exists.
    pub bare_date_fallback: bool,

    /// Office prefix prepended to bare 9-digit receipt numbers.
    pub default_receipt_prefix: String,

    /// Beneficiary names matched literally before any other name rule.
    pub known_names: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            bare_receipt_fallback: true,
            bare_date_fallback: true,
            default_receipt_prefix: DEFAULT_RECEIPT_PREFIX.to_string(),
            known_names: Vec::new(),
        }
    }
}

impl ExtractionConfig {
    /// The configured default prefix, or `IOE` when it is not a known office.
    pub fn receipt_prefix(&self) -> String {
        let prefix = self.default_receipt_prefix.trim().to_uppercase();
        if is_valid_prefix(&prefix) {
            prefix
        } else {
            warn!(
                "Ignoring unknown default receipt prefix {:?}, using {}",
                self.default_receipt_prefix, DEFAULT_RECEIPT_PREFIX
            );
            DEFAULT_RECEIPT_PREFIX.to_string()
        }
    }
}

/// PDF text acquisition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Minimum characters of embedded text for a page to count as having text.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 1,
        }
    }
}

impl NoticexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| NoticexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| NoticexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

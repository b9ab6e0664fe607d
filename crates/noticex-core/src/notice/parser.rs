//! Notice extraction pipeline: normalize once, run every field extractor,
//! validate.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::notice::{ExtractedRecord, ValidationError};

use super::normalize::normalize;
use super::rules::{
    CaseTypeExtractor, FieldExtractor, NameExtractor, ReceiptNumberExtractor,
    ReceivedDateExtractor, ValidityRangeExtractor,
};
use super::validate::validate;

/// Result of notice extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Extracted record; unrecovered fields are empty.
    pub record: ExtractedRecord,
    /// Validation diagnostics for recovered-but-invalid fields.
    pub diagnostics: Vec<ValidationError>,
    /// Text after normalization, as seen by the extractors.
    #[serde(skip)]
    pub normalized_text: String,
    /// Processing time in milliseconds.
    #[serde(skip)]
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// True when every recovered field passed validation.
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Trait for notice parsing.
pub trait NoticeExtractor {
    /// Extract a record from raw document text. Never fails.
    fn extract(&self, raw_text: &str) -> ExtractionResult;
}

/// Rule-based notice parser.
///
/// Holds no mutable state; one parser can be shared across threads and
/// documents.
pub struct NoticeParser {
    name: NameExtractor,
    receipt_number: ReceiptNumberExtractor,
    received_date: ReceivedDateExtractor,
    valid_from_to: ValidityRangeExtractor,
    case_type: CaseTypeExtractor,
}

impl NoticeParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            name: NameExtractor::new(),
            receipt_number: ReceiptNumberExtractor::new(),
            received_date: ReceivedDateExtractor::new(),
            valid_from_to: ValidityRangeExtractor::new(),
            case_type: CaseTypeExtractor::new(),
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_known_names(config.known_names.as_slice())
            .with_bare_receipt_fallback(config.bare_receipt_fallback)
            .with_bare_date_fallback(config.bare_date_fallback)
            .with_default_receipt_prefix(config.receipt_prefix())
    }

    /// Set beneficiary names matched literally before other name rules.
    pub fn with_known_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.name = self.name.with_known_names(names);
        self
    }

    /// Enable or disable the bare 9-digit receipt fallback.
    pub fn with_bare_receipt_fallback(mut self, enabled: bool) -> Self {
        self.receipt_number = self.receipt_number.with_bare_fallback(enabled);
        self
    }

    /// Enable or disable the bare date fallbacks (received date and range).
    pub fn with_bare_date_fallback(mut self, enabled: bool) -> Self {
        self.received_date = self.received_date.with_bare_fallback(enabled);
        self.valid_from_to = self.valid_from_to.with_bare_fallback(enabled);
        self
    }

    /// Set the prefix prepended to bare 9-digit receipt numbers.
    pub fn with_default_receipt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.receipt_number = self.receipt_number.with_default_prefix(prefix);
        self
    }

    /// Parse raw document text.
    pub fn parse(&self, raw_text: &str) -> ExtractionResult {
        // std's Instant panics on wasm32-unknown-unknown; chrono's clock does not.
        let start = Utc::now();

        info!("Parsing notice from {} characters of text", raw_text.len());

        let text = normalize(raw_text);

        let record = ExtractedRecord {
            name: run(&self.name, &text),
            receipt_number: run(&self.receipt_number, &text),
            received_date: run(&self.received_date, &text),
            valid_from_to: run(&self.valid_from_to, &text),
            case_type: run(&self.case_type, &text),
        };

        let diagnostics = validate(&record);
        let processing_time_ms = (Utc::now() - start).num_milliseconds().max(0) as u64;

        info!(
            "Extracted {} of 5 fields with {} diagnostics in {}ms",
            5 - record.missing_fields().len(),
            diagnostics.len(),
            processing_time_ms
        );

        ExtractionResult {
            record,
            diagnostics,
            normalized_text: text,
            processing_time_ms,
        }
    }
}

fn run(extractor: &impl FieldExtractor, text: &str) -> String {
    let value = extractor.extract(text);
    debug!("{}: {:?}", extractor.field(), value);
    value
}

impl Default for NoticeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeExtractor for NoticeParser {
    fn extract(&self, raw_text: &str) -> ExtractionResult {
        self.parse(raw_text)
    }
}

/// Extract a notice with the default parser.
pub fn extract(raw_text: &str) -> ExtractionResult {
    NoticeParser::new().parse(raw_text)
}

//! WASM bindings for immigration notice field extraction.
//!
//! Text acquisition (PDF reading, OCR) happens on the JavaScript side; these
//! bindings take the recovered text and return the extracted record.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use noticex_core::notice::rules::catalog::form_types;
use noticex_core::{ExtractionConfig, NoticeParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract notice fields from text.
///
/// Returns `{ record, diagnostics }` with the default configuration.
#[wasm_bindgen]
pub fn extract_notice(text: &str) -> Result<JsValue, JsValue> {
    to_js(&noticex_core::extract(text))
}

/// Whether a receipt number has the `<office><9-10 digits>` shape.
#[wasm_bindgen]
pub fn validate_receipt_number(receipt_number: &str) -> bool {
    noticex_core::notice::is_valid_receipt_number(receipt_number)
}

/// Whether an `MM/DD/YYYY` string is a real calendar date.
#[wasm_bindgen]
pub fn is_valid_date(date: &str) -> bool {
    noticex_core::notice::is_valid_date(date)
}

/// Apply the OCR corrections the extractor runs before matching.
#[wasm_bindgen]
pub fn normalize_text(text: &str) -> String {
    noticex_core::normalize(text)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FormTypeJs {
    code: &'static str,
    display: String,
    classifications: &'static [&'static str],
}

/// The recognized petition forms, e.g. `[{ code: "I129", display: "I-129", ... }]`.
#[wasm_bindgen]
pub fn known_form_types() -> Result<JsValue, JsValue> {
    let forms: Vec<FormTypeJs> = form_types()
        .iter()
        .map(|f| FormTypeJs {
            code: f.code,
            display: f.display(),
            classifications: f.classifications,
        })
        .collect();
    to_js(&forms)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractionWithMetadata<'a> {
    record: &'a noticex_core::ExtractedRecord,
    diagnostics: &'a [noticex_core::ValidationError],
    normalized_text: &'a str,
    processing_time_ms: u64,
}

/// Configurable notice extractor for browser use.
#[wasm_bindgen(js_name = NoticeExtractor)]
pub struct NoticeExtractorJs {
    config: ExtractionConfig,
    parser: NoticeParser,
}

#[wasm_bindgen(js_class = NoticeExtractor)]
impl NoticeExtractorJs {
    /// Create an extractor with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = ExtractionConfig::default();
        let parser = NoticeParser::from_config(&config);
        Self { config, parser }
    }

    /// Accept a bare 9-digit number when no labeled receipt number exists.
    #[wasm_bindgen(js_name = setBareReceiptFallback)]
    pub fn set_bare_receipt_fallback(&mut self, enabled: bool) {
        self.config.bare_receipt_fallback = enabled;
        self.rebuild();
    }

    /// Accept an unlabeled date or range when no labeled one exists.
    #[wasm_bindgen(js_name = setBareDateFallback)]
    pub fn set_bare_date_fallback(&mut self, enabled: bool) {
        self.config.bare_date_fallback = enabled;
        self.rebuild();
    }

    /// Office prefix for bare receipt numbers. Unknown prefixes fall back to IOE.
    #[wasm_bindgen(js_name = setDefaultReceiptPrefix)]
    pub fn set_default_receipt_prefix(&mut self, prefix: &str) {
        self.config.default_receipt_prefix = prefix.to_string();
        self.rebuild();
    }

    /// Names to match literally before any other name rule.
    #[wasm_bindgen(js_name = setKnownNames)]
    pub fn set_known_names(&mut self, names: Vec<String>) {
        self.config.known_names = names;
        self.rebuild();
    }

    /// Extract notice fields, returning `{ record, diagnostics }`.
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }

    /// Like `extract`, plus `normalizedText` and `processingTimeMs`.
    #[wasm_bindgen(js_name = extractWithMetadata)]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);
        to_js(&ExtractionWithMetadata {
            record: &result.record,
            diagnostics: &result.diagnostics,
            normalized_text: &result.normalized_text,
            processing_time_ms: result.processing_time_ms,
        })
    }
}

impl NoticeExtractorJs {
    fn rebuild(&mut self) {
        self.parser = NoticeParser::from_config(&self.config);
    }
}

impl Default for NoticeExtractorJs {
    fn default() -> Self {
        Self::new()
    }
}

/// Page texts collected from browser-side OCR, joined before extraction.
#[wasm_bindgen]
pub struct OcrPages {
    pages: Vec<String>,
}

#[wasm_bindgen]
impl OcrPages {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Append the recognized text of the next page.
    #[wasm_bindgen(js_name = addPage)]
    pub fn add_page(&mut self, text: &str) {
        self.pages.push(text.to_string());
    }

    #[wasm_bindgen(getter, js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages joined with newlines.
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.pages.join("\n")
    }

    /// Run extraction over the joined pages.
    pub fn extract(&self, extractor: &NoticeExtractorJs) -> Result<JsValue, JsValue> {
        extractor.extract(&self.text())
    }
}

impl Default for OcrPages {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_validators() {
        assert!(validate_receipt_number("IOE1234567890"));
        assert!(!validate_receipt_number("XYZ123456789"));
        assert!(is_valid_date("02/28/2023"));
        assert!(!is_valid_date("02/30/2023"));
    }

    #[wasm_bindgen_test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("l0E 123456789"), "IOE 123456789");
    }

    #[wasm_bindgen_test]
    fn test_ocr_pages_join() {
        let mut pages = OcrPages::new();
        pages.add_page("Receipt Number: IOE123456789");
        pages.add_page("Received Date: 01/15/2023");
        assert_eq!(pages.page_count(), 2);
        assert_eq!(
            pages.text(),
            "Receipt Number: IOE123456789\nReceived Date: 01/15/2023"
        );
    }

    #[wasm_bindgen_test]
    fn test_extraction_entry_points_do_not_throw() {
        let text = "Beneficiary: LEE, JAE KEON Receipt Number: IOE1234567890";
        assert!(extract_notice(text).unwrap().is_object());

        let extractor = NoticeExtractorJs::new();
        assert!(extractor.extract_with_metadata(text).unwrap().is_object());

        let mut pages = OcrPages::new();
        pages.add_page(text);
        assert!(pages.extract(&extractor).unwrap().is_object());
    }

    #[wasm_bindgen_test]
    fn test_extractor_returns_object() {
        let extractor = NoticeExtractorJs::new();
        let value = extractor.extract("Receipt Number: IOE123456789").unwrap();
        assert!(value.is_object());
    }
}

//! Receipt number extraction and normalization.

use super::catalog::{is_valid_prefix, DEFAULT_RECEIPT_PREFIX};
use super::patterns::RECEIPT_RULES;
use super::{select_rules, FieldExtractor, PatternRule};
use crate::models::notice::NoticeField;

/// Receipt number field extractor.
pub struct ReceiptNumberExtractor {
    bare_fallback: bool,
    default_prefix: String,
}

impl ReceiptNumberExtractor {
    /// Create a new receipt number extractor.
    pub fn new() -> Self {
        Self {
            bare_fallback: true,
            default_prefix: DEFAULT_RECEIPT_PREFIX.to_string(),
        }
    }

    /// Set whether a bare 9-digit number may be taken as a receipt number.
    pub fn with_bare_fallback(mut self, enabled: bool) -> Self {
        self.bare_fallback = enabled;
        self
    }

    /// Set the prefix inferred for unprefixed numbers.
    pub fn with_default_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.default_prefix = prefix.into();
        self
    }
}

impl Default for ReceiptNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReceiptNumberExtractor {
    fn field(&self) -> NoticeField {
        NoticeField::ReceiptNumber
    }

    fn rules(&self) -> Vec<&PatternRule> {
        select_rules(&RECEIPT_RULES, self.bare_fallback)
    }

    fn normalize(&self, candidate: &str) -> String {
        normalize_with_prefix(candidate, &self.default_prefix).unwrap_or_default()
    }
}

/// Canonicalize a receipt-number candidate.
///
/// Returns an empty string unless the result carries a known office prefix
/// followed by 9 or 10 digits. A bare 9-digit number gets the `IOE` prefix.
pub fn normalize_receipt_number(candidate: &str) -> String {
    normalize_with_prefix(candidate, DEFAULT_RECEIPT_PREFIX).unwrap_or_default()
}

fn normalize_with_prefix(candidate: &str, default_prefix: &str) -> Option<String> {
    let compact: String = candidate
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if compact.len() == 9 && compact.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("{}{}", default_prefix, compact));
    }

    let split = compact.char_indices().nth(3).map(|(i, _)| i)?;
    let (prefix, digits) = compact.split_at(split);

    let prefix = repair_prefix(prefix)?;
    let digits: String = digits.chars().map(repair_digit).collect();

    let digits_ok = (9..=10).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    digits_ok.then(|| format!("{}{}", prefix, digits))
}

/// Letter-side OCR repairs for the 3-character office prefix.
fn repair_prefix(prefix: &str) -> Option<String> {
    let upper: String = prefix
        .chars()
        .map(|c| match c {
            '0' => 'O',
            '5' => 'S',
            '|' | '1' => 'I',
            c => c.to_ascii_uppercase(),
        })
        .collect();

    if is_valid_prefix(&upper) {
        return Some(upper);
    }

    // A lower-case l read as L where I was meant, e.g. "lOE".
    let swapped: String = prefix
        .chars()
        .zip(upper.chars())
        .map(|(orig, up)| if orig == 'l' { 'I' } else { up })
        .collect();
    is_valid_prefix(&swapped).then_some(swapped)
}

/// Digit-side OCR repairs for the number part.
fn repair_digit(c: char) -> char {
    match c {
        'o' | 'O' => '0',
        c => c,
    }
}

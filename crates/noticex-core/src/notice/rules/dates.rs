//! Received date and validity range extraction.

use super::patterns::{RANGE_SHAPE, RECEIVED_DATE_RULES, VALIDITY_RULES};
use super::{select_rules, FieldExtractor, PatternRule};
use crate::models::notice::NoticeField;

/// Extracts the date the petition was received, as printed (`MM/DD/YYYY`).
pub struct ReceivedDateExtractor {
    bare_fallback: bool,
}

impl ReceivedDateExtractor {
    pub fn new() -> Self {
        Self { bare_fallback: true }
    }

    /// Set whether any standalone date may be taken as the received date.
    pub fn with_bare_fallback(mut self, enabled: bool) -> Self {
        self.bare_fallback = enabled;
        self
    }
}

impl Default for ReceivedDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReceivedDateExtractor {
    fn field(&self) -> NoticeField {
        NoticeField::ReceivedDate
    }

    fn rules(&self) -> Vec<&PatternRule> {
        select_rules(&RECEIVED_DATE_RULES, self.bare_fallback)
    }

    fn normalize(&self, candidate: &str) -> String {
        candidate.trim().to_string()
    }
}

/// Extracts the validity period, rendered as `MM/DD/YYYY to MM/DD/YYYY`.
///
/// Ordering of the two dates is not checked here; a reversed range is
/// returned as printed and reported by the validator.
pub struct ValidityRangeExtractor {
    bare_fallback: bool,
}

impl ValidityRangeExtractor {
    pub fn new() -> Self {
        Self { bare_fallback: true }
    }

    /// Set whether an unlabeled `date to date` span may be taken as the range.
    pub fn with_bare_fallback(mut self, enabled: bool) -> Self {
        self.bare_fallback = enabled;
        self
    }
}

impl Default for ValidityRangeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ValidityRangeExtractor {
    fn field(&self) -> NoticeField {
        NoticeField::ValidFromTo
    }

    fn rules(&self) -> Vec<&PatternRule> {
        select_rules(&VALIDITY_RULES, self.bare_fallback)
    }

    fn normalize(&self, candidate: &str) -> String {
        normalize_range(candidate)
    }
}

/// Rewrite `A to B` / `A through B` (any spacing) as `A to B`.
/// Anything else yields an empty string.
pub fn normalize_range(candidate: &str) -> String {
    match RANGE_SHAPE.captures(candidate.trim()) {
        Some(caps) => format!("{} to {}", &caps[1], &caps[2]),
        None => String::new(),
    }
}

/// Split a normalized range into its two dates.
pub fn split_range(range: &str) -> Option<(&str, &str)> {
    let caps = RANGE_SHAPE.captures(range)?;
    let from = caps.get(1)?.as_str();
    let to = caps.get(2)?.as_str();
    Some((from, to))
}

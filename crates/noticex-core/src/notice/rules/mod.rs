//! Rule-based field extractors for immigration notices.
//!
//! Each field is described by an ordered chain of [`PatternRule`]s plus a
//! post-match normalizer. The chain is tried front to back and the first rule
//! that matches decides the candidate; later rules are never consulted.

pub mod case_type;
pub mod catalog;
pub mod dates;
pub mod name;
pub mod patterns;
pub mod receipt;

pub use case_type::{normalize_case_type, CaseTypeExtractor};
pub use catalog::{is_known_form, is_valid_prefix, lookup_form, FormType, VALID_RECEIPT_PREFIXES};
pub use dates::{normalize_range, ReceivedDateExtractor, ValidityRangeExtractor};
pub use name::{normalize_name, NameExtractor};
pub use receipt::{normalize_receipt_number, ReceiptNumberExtractor};

use regex::Regex;
use tracing::trace;

use crate::models::notice::NoticeField;

/// One matching directive: a pattern and the capture group holding the value.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Short identifier used in logs and tests.
    pub name: &'static str,
    /// Compiled pattern.
    pub pattern: Regex,
    /// Index of the capture group holding the candidate value.
    pub group: usize,
    /// Permissive rules have no label or context and can hit unrelated text.
    pub permissive: bool,
}

impl PatternRule {
    /// Compile a rule.
    pub fn compile(name: &'static str, pattern: &str, group: usize) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            group,
            permissive: false,
        })
    }

    /// Mark the rule as a permissive last-resort fallback.
    pub fn permissive(mut self) -> Self {
        self.permissive = true;
        self
    }

    /// Trimmed value of the capture group, if the pattern matches and the
    /// group participated with non-blank text.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
    }
}

/// Result of running a rule chain: which rule won and what it captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'t> {
    /// Name of the winning rule.
    pub rule: &'static str,
    /// Trimmed captured value.
    pub value: &'t str,
}

/// Run `rules` in order and return the first capture.
pub fn first_rule_match<'t, 'r, I>(text: &'t str, rules: I) -> Option<RuleMatch<'t>>
where
    I: IntoIterator<Item = &'r PatternRule>,
{
    rules.into_iter().find_map(|rule| {
        rule.capture(text).map(|value| {
            trace!("Rule {} matched {:?}", rule.name, value);
            RuleMatch {
                rule: rule.name,
                value,
            }
        })
    })
}

/// Run `rules` in order and return the first trimmed capture, or an empty
/// string when no rule matches.
pub fn first_match<'r, I>(text: &str, rules: I) -> String
where
    I: IntoIterator<Item = &'r PatternRule>,
{
    first_rule_match(text, rules)
        .map(|m| m.value.to_string())
        .unwrap_or_default()
}

/// A declarative field extractor: an ordered rule chain plus a normalizer.
pub trait FieldExtractor {
    /// The record field this extractor fills.
    fn field(&self) -> NoticeField;

    /// Ordered rule chain, most specific first.
    fn rules(&self) -> Vec<&PatternRule>;

    /// Canonicalize a raw capture. Returns an empty string to reject it.
    fn normalize(&self, candidate: &str) -> String;

    /// Extract the field from normalized document text.
    fn extract(&self, text: &str) -> String {
        match first_rule_match(text, self.rules()) {
            Some(m) => {
                let value = self.normalize(m.value);
                if value.is_empty() {
                    trace!(
                        "{}: candidate {:?} from rule {} rejected",
                        self.field(),
                        m.value,
                        m.rule
                    );
                }
                value
            }
            None => String::new(),
        }
    }
}

/// Drop permissive rules unless `allow_permissive` is set.
pub(crate) fn select_rules(rules: &[PatternRule], allow_permissive: bool) -> Vec<&PatternRule> {
    rules
        .iter()
        .filter(|r| allow_permissive || !r.permissive)
        .collect()
}

//! Regex tables for notice extraction.
//!
//! The `regex` crate has no look-around, so context that must follow a value
//! is matched after the value's capture group (rules) or captured and written
//! back unchanged (corrections).

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::catalog::{FORM_NUMBER_ALTERNATION, VALID_RECEIPT_PREFIXES};
use super::PatternRule;
use crate::notice::normalize::{Correction, Rewrite};

/// `MM/DD/YYYY` shape, without calendar checks.
pub const DATE: &str = r"\d{2}/\d{2}/\d{4}";

/// Words that end a beneficiary name: date and form-number markers.
const NAME_STOP_WORDS: &str = r"DOB|A\d+|Notice|Valid|Receipt|Received|Case|Form|Date";

/// Stop words must be whole words, so CASEY or FORMAN stay part of the name.
/// A 4-digit run (a year) also ends the name.
fn name_stop(extra: &str) -> String {
    format!(r"(?:\s+(?:(?:{extra}{NAME_STOP_WORDS})\b|\d{{4}})|\s*$)")
}

fn range(lead: &str) -> String {
    format!(r"(?i){lead}({DATE}\s*(?:to|through)\s*{DATE})")
}

fn fix(name: &'static str, pattern: &str, replacement: &'static str) -> Correction {
    Correction {
        name,
        pattern: Regex::new(pattern).unwrap(),
        rewrite: Rewrite::Template(replacement),
    }
}

fn zero_os(caps: &Captures<'_>) -> String {
    caps[0].replace(['o', 'O'], "0")
}

fn rule(name: &'static str, pattern: &str, group: usize) -> PatternRule {
    PatternRule::compile(name, pattern, group).unwrap()
}

lazy_static! {
    // Whitespace collapse
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // OCR corrections, applied in order after whitespace collapse
    pub static ref CORRECTIONS: Vec<Correction> = vec![
        fix("pipe", r"\|", "I"),
        fix("brace", r"[{}]", "I"),
        // Whole 9-character words only, so `012345678A` is left alone. The
        // trailing boundary keeps this from undoing the o-run rewrite below.
        fix("leading_zero", r"\b0(\d{8})\b", "O${1}"),
        // The whole o/0 run before a receipt digit run, in one replacement.
        Correction::with(
            "o_run_before_digits",
            Regex::new(r"[oO][oO0]*\d{9,10}").unwrap(),
            zero_os,
        ),
        fix("prefix_ioe", r"(?i)\b[1il][o0]e([-\s]?\d{9})", "IOE${1}"),
        fix("prefix_src", r"(?i)\b[s5]rc([-\s]?\d{9})", "SRC${1}"),
        fix("prefix_eac", r"(?i)\beac([-\s]?\d{9})", "EAC${1}"),
        fix("prefix_wac", r"(?i)\bwac([-\s]?\d{9})", "WAC${1}"),
        fix("prefix_lin", r"(?i)\blin([-\s]?\d{9})", "LIN${1}"),
        fix("prefix_msc", r"(?i)\bmsc([-\s]?\d{9})", "MSC${1}"),
    ];

    // Beneficiary name; the known-name literal rule is built per parser
    pub static ref NAME_RULES: Vec<PatternRule> = vec![
        rule(
            "name.label",
            &format!(
                r"(?i)Beneficiary(?:'s)?(?:\s*Name)?[:\s]+([A-Z]+,\s*[A-Z\s]+?){}",
                name_stop("")
            ),
            1,
        ),
        rule(
            "name.named_beneficiary",
            &format!(
                r"(?i)named\s+beneficiar(?:y|ies)\s+([A-Z]+,\s*[A-Z\s]+?){}",
                name_stop("is|are|has|have|")
            ),
            1,
        ),
        rule(
            "name.surname_given",
            &format!(r"(?i)\b([A-Z]+,\s*[A-Z\s]+?){}", name_stop("is|are|has|have|")),
            1,
        ),
    ];

    // Receipt number
    pub static ref RECEIPT_RULES: Vec<PatternRule> = vec![
        rule("receipt.ioe", r"(?i)\b(IOE[-\s]?\d{9})\b", 1),
        rule(
            "receipt.label",
            r"(?i)(?:Receipt|Case|Application|USCIS|Notice)[\s#]*(?:Number|No|ID)?[:\s]*([A-Z]{3}[-\s]?\d{9,10})",
            1,
        ),
        rule(
            "receipt.account",
            r"(?i)(?:USCIS|DHS)[\s#]*(?:Account|Number|#|Case|Receipt)[:\s]*([A-Z]{3}[-\s]?\d{9,10})",
            1,
        ),
        rule("receipt.form_797", r"(?is)Form\s+I-?797.*?([A-Z]{3}[-\s]?\d{9,10})", 1),
        rule("receipt.prefixed", r"(?i)\b([A-Z]{3}[-\s]?\d{9,10})\b", 1),
        rule("receipt.bare_digits", r"\b(\d{9})\b", 1).permissive(),
    ];

    // Received date
    pub static ref RECEIVED_DATE_RULES: Vec<PatternRule> = vec![
        rule("received.label", &format!(r"(?i)Received\s*Date[:\s]*({DATE})"), 1),
        rule("received.notice_date", &format!(r"(?i)Notice\s*Date[:\s]*({DATE})"), 1),
        rule("received.date_label", &format!(r"(?i)(?:^|\s)Date[:\s]*({DATE})"), 1),
        rule(
            "received.before_keyword",
            &format!(r"(?i)(?:^|\s)({DATE})\s+(?:Notice|Receipt|Case)"),
            1,
        ),
        rule("received.bare", &format!(r"(?:^|\s)({DATE})(?:\s|$)"), 1).permissive(),
    ];

    // Validity range; group 1 holds the whole range
    pub static ref VALIDITY_RULES: Vec<PatternRule> = vec![
        rule("validity.valid_from", &range(r"Valid\s*from\s*"), 1),
        rule("validity.status_valid", &range(r"Status\s*Valid\s*from\s*"), 1),
        rule("validity.dates_valid", &range(r"Dates?\s*Valid\s*from\s*"), 1),
        rule("validity.bare", &range(""), 1).permissive(),
    ];

    // Case/form type
    pub static ref CASE_TYPE_RULES: Vec<PatternRule> = {
        let form = format!(r"([Il1|]-?(?:{}))\b", *FORM_NUMBER_ALTERNATION);
        vec![
            rule("case.form", &format!(r"(?i)\bForm\s*{form}"), 1),
            rule("case.case_type", &format!(r"(?i)Case\s*Type[:\s]*(?:Form\s*)?{form}"), 1),
            rule("case.notice_type", &format!(r"(?is)Notice\s+Type.*?\b{form}"), 1),
            rule(
                "case.classification",
                &format!(r"(?i)Classification[:\s]*(?:Form\s*)?{form}"),
                1,
            ),
            rule(
                "case.bare",
                &format!(r"(?i)\b([Il]-?(?:{}))\b", *FORM_NUMBER_ALTERNATION),
                1,
            ),
        ]
    };

    // Post-match shapes
    pub static ref RANGE_SHAPE: Regex = Regex::new(
        &format!(r"(?i)^({DATE})\s*(?:to|through)\s*({DATE})$")
    ).unwrap();

    pub static ref FORM_CODE_SHAPE: Regex = Regex::new(r"^[IL1|](\d{3})$").unwrap();

    // Validator shapes
    pub static ref NAME_SHAPE: Regex = Regex::new(r"(?i)^[A-Z]+,\s*[A-Z\s]+$").unwrap();

    pub static ref RECEIPT_SHAPE: Regex = Regex::new(
        &format!(r"(?i)^(?:{})\d{{9,10}}$", VALID_RECEIPT_PREFIXES.join("|"))
    ).unwrap();

    pub static ref DATE_SHAPE: Regex = Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_compile() {
        assert_eq!(CORRECTIONS.len(), 10);
        assert_eq!(NAME_RULES.len(), 3);
        assert_eq!(RECEIPT_RULES.len(), 6);
        assert_eq!(RECEIVED_DATE_RULES.len(), 5);
        assert_eq!(VALIDITY_RULES.len(), 4);
        assert_eq!(CASE_TYPE_RULES.len(), 5);
    }

    #[test]
    fn test_only_bare_rules_are_permissive() {
        let permissive: Vec<&str> = RECEIPT_RULES
            .iter()
            .chain(RECEIVED_DATE_RULES.iter())
            .chain(VALIDITY_RULES.iter())
            .chain(NAME_RULES.iter())
            .chain(CASE_TYPE_RULES.iter())
            .filter(|r| r.permissive)
            .map(|r| r.name)
            .collect();
        assert_eq!(
            permissive,
            vec!["receipt.bare_digits", "received.bare", "validity.bare"]
        );
    }

    #[test]
    fn test_receipt_shape() {
        assert!(RECEIPT_SHAPE.is_match("IOE1234567890"));
        assert!(RECEIPT_SHAPE.is_match("eac123456789"));
        assert!(!RECEIPT_SHAPE.is_match("XYZ123456789"));
        assert!(!RECEIPT_SHAPE.is_match("IOE12345678"));
        assert!(!RECEIPT_SHAPE.is_match("IOE12345678901"));
    }

    #[test]
    fn test_range_shape_accepts_both_connectors() {
        assert!(RANGE_SHAPE.is_match("01/01/2023 to 01/01/2024"));
        assert!(RANGE_SHAPE.is_match("01/01/2023 through 01/01/2024"));
        assert!(RANGE_SHAPE.is_match("01/01/2023to01/01/2024"));
        assert!(!RANGE_SHAPE.is_match("01/01/2023 - 01/01/2024"));
    }
}

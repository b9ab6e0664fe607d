//! OCR text normalization.
//!
//! Collapses whitespace, then rewrites glyphs that OCR commonly confuses.
//! Digit/letter repairs only fire next to a receipt-shaped digit run so that
//! unrelated numbers elsewhere in the document are left alone.

use std::borrow::Cow;

use regex::{Captures, Regex};
use tracing::trace;

use super::rules::patterns::{CORRECTIONS, WHITESPACE_RUN};

/// How a correction rewrites a match.
#[derive(Debug, Clone, Copy)]
pub enum Rewrite {
    /// Replacement in `regex` template syntax, e.g. `O${1}`.
    Template(&'static str),
    /// Replacement computed from the match.
    With(fn(&Captures<'_>) -> String),
}

/// A single context-gated substitution.
#[derive(Debug, Clone)]
pub struct Correction {
    /// Short identifier used in tests and logs.
    pub name: &'static str,
    /// Pattern to replace; trailing context is captured and written back.
    pub pattern: Regex,
    pub rewrite: Rewrite,
}

impl Correction {
    /// A correction whose replacement is computed from each match.
    pub fn with(
        name: &'static str,
        pattern: Regex,
        rewrite: fn(&Captures<'_>) -> String,
    ) -> Self {
        Self {
            name,
            pattern,
            rewrite: Rewrite::With(rewrite),
        }
    }

    /// Apply this correction to every match in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.rewrite {
            Rewrite::Template(template) => self.pattern.replace_all(text, template),
            Rewrite::With(f) => self.pattern.replace_all(text, |caps: &Captures<'_>| f(caps)),
        }
    }
}

/// Collapse whitespace runs to one space and trim.
pub fn collapse_whitespace(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw, " ").trim().to_string()
}

/// Normalize raw document text. Total and idempotent.
///
/// The correction list is applied until a pass changes nothing, since one
/// correction can create the context another one is gated on. Runs of `o`
/// are rewritten whole, so adversarial input still settles in a few passes.
pub fn normalize(raw: &str) -> String {
    let mut text = collapse_whitespace(raw);
    settle(&mut text);
    text
}

/// Run correction passes until one changes nothing. Returns the number of
/// passes, including the final unchanged one.
fn settle(text: &mut String) -> usize {
    // Each character is rewritten at most twice, so this always converges.
    let max_passes = 2 * text.len() + 1;
    let mut passes = 0;
    while passes < max_passes {
        passes += 1;
        if !correction_pass(text) {
            break;
        }
    }
    if passes > 2 {
        trace!("Normalization settled after {} passes", passes);
    }
    passes
}

/// Apply every correction once, in order. Returns whether anything changed.
fn correction_pass(text: &mut String) -> bool {
    let mut changed = false;
    for correction in CORRECTIONS.iter() {
        if let Cow::Owned(fixed) = correction.apply(text) {
            if fixed != *text {
                *text = fixed;
                changed = true;
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b\r\n\nc  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace(" \n "), "");
    }

    #[test]
    fn test_pipe_and_brace_become_i() {
        assert_eq!(normalize("|OE123456789"), "IOE123456789");
        assert_eq!(normalize("Form {-129"), "Form I-129");
        assert_eq!(normalize("}}"), "II");
    }

    #[test]
    fn test_leading_zero_before_eight_digits() {
        assert_eq!(normalize("A# 012345678"), "A# O12345678");
        // Not word-initial: untouched.
        assert_eq!(normalize("X012345678"), "X012345678");
        // Not a whole 9-character word: untouched.
        assert_eq!(normalize("012345678A"), "012345678A");
    }

    #[test]
    fn test_o_before_receipt_digits() {
        assert_eq!(normalize("EAC O123456789"), "EAC 0123456789");
        assert_eq!(normalize("o1234567890"), "01234567890");
        // Too short a run: untouched.
        assert_eq!(normalize("O1234567"), "O1234567");
    }

    #[test]
    fn test_prefix_repairs() {
        assert_eq!(normalize("l0E 123456789"), "IOE 123456789");
        assert_eq!(normalize("1OE123456789"), "IOE123456789");
        assert_eq!(normalize("5RC1234567890"), "SRC1234567890");
        assert_eq!(normalize("eac-1234567890"), "EAC-1234567890");
        assert_eq!(normalize("Wac 123456789"), "WAC 123456789");
        assert_eq!(normalize("lin1234567890"), "LIN1234567890");
        assert_eq!(normalize("msc123456789"), "MSC123456789");
    }

    #[test]
    fn test_prefix_repairs_are_gated() {
        // No receipt-shaped digit run follows: leave the text alone.
        assert_eq!(normalize("lin 12345"), "lin 12345");
        assert_eq!(normalize("The 5rc team"), "The 5rc team");
        assert_eq!(normalize("eac"), "eac");
        // Unrelated digits elsewhere keep their zeros.
        assert_eq!(normalize("Total 1000 units"), "Total 1000 units");
    }

    #[test]
    fn test_o_repair_cascades_to_fixpoint() {
        assert_eq!(normalize("x 0o0oo123456789"), "x 00000123456789");
        // Nine digits after a word-initial zero is a receipt run, not an A-number.
        assert_eq!(normalize("0123456789"), "0123456789");
    }

    #[test]
    fn test_long_o_run_settles_quickly() {
        let mut text = format!("{}123456789", "o".repeat(10_000));
        assert!(settle(&mut text) <= 2);
        assert_eq!(text, format!("{}123456789", "0".repeat(10_000)));

        let mut text = format!("ref {}o123456789 end", "o0".repeat(5_000));
        assert!(settle(&mut text) <= 2);
        assert!(!text.contains('o'));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "Beneficiary: LEE, JAE KEON\nReceipt Number: IOE1234567890",
            "l0E 123456789",
            "0123456789 O12345678 o1234567890",
            "|{}| 5rc 1234567890 eac0123456789",
            "00000000000 0O0O0O0O0O",
            "1oe-o123456789 lOE 0123456789",
            "Valid from 02/01/2023 through 01/31/2024",
            "012345678",
            "x O1234567890123",
        ];
        for sample in samples {
            let once = normalize(sample);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }
}

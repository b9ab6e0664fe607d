//! Known USCIS form numbers and receipt-number office prefixes.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Office prefixes a receipt number may carry.
pub const VALID_RECEIPT_PREFIXES: [&str; 6] = ["IOE", "WAC", "EAC", "SRC", "LIN", "MSC"];

/// Prefix assumed for a receipt number printed without one.
pub const DEFAULT_RECEIPT_PREFIX: &str = "IOE";

/// A petition/application form and its sub-classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormType {
    /// Canonical code, e.g. `I129`.
    pub code: &'static str,
    /// Known classifications filed on this form.
    pub classifications: &'static [&'static str],
}

impl FormType {
    /// Display form, e.g. `I-129`.
    pub fn display(&self) -> String {
        format!("{}-{}", &self.code[..1], &self.code[1..])
    }

    /// Digits of the form number, e.g. `129`.
    pub fn number(&self) -> &'static str {
        &self.code[1..]
    }
}

const FORM_TYPES: [FormType; 6] = [
    FormType {
        code: "I129",
        classifications: &["H-1B", "L-1", "O-1", "P-1", "R-1", "TN"],
    },
    FormType {
        code: "I130",
        classifications: &["IR-1", "F2A", "F2B", "F3", "F4"],
    },
    FormType {
        code: "I140",
        classifications: &["EB-1", "EB-2", "EB-3", "EB-4"],
    },
    FormType {
        code: "I485",
        classifications: &["AOS", "Adjustment of Status"],
    },
    FormType {
        code: "I539",
        classifications: &["Extension of Stay", "Change of Status"],
    },
    FormType {
        code: "I765",
        classifications: &["EAD", "Employment Authorization"],
    },
];

lazy_static! {
    static ref FORM_CATALOG: HashMap<&'static str, FormType> =
        FORM_TYPES.iter().map(|f| (f.code, *f)).collect();

    /// Regex alternation of the known form numbers, e.g. `129|130|...`.
    pub static ref FORM_NUMBER_ALTERNATION: String = FORM_TYPES
        .iter()
        .map(|f| f.number())
        .collect::<Vec<_>>()
        .join("|");
}

/// All catalogued forms, in code order.
pub fn form_types() -> &'static [FormType] {
    &FORM_TYPES
}

/// Look up a canonical form code.
pub fn lookup_form(code: &str) -> Option<&'static FormType> {
    FORM_CATALOG.get(code)
}

/// Whether `code` is a canonical catalogued form code.
pub fn is_known_form(code: &str) -> bool {
    FORM_CATALOG.contains_key(code)
}

/// Whether `prefix` is a known receipt office prefix (case-sensitive).
pub fn is_valid_prefix(prefix: &str) -> bool {
    VALID_RECEIPT_PREFIXES.contains(&prefix)
}

//! Case/form type extraction.

use super::catalog::is_known_form;
use super::patterns::{CASE_TYPE_RULES, FORM_CODE_SHAPE};
use super::{FieldExtractor, PatternRule};
use crate::models::notice::NoticeField;

/// Extracts the petition form code, canonicalized to `I129` style.
#[derive(Default)]
pub struct CaseTypeExtractor;

impl CaseTypeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for CaseTypeExtractor {
    fn field(&self) -> NoticeField {
        NoticeField::CaseType
    }

    fn rules(&self) -> Vec<&PatternRule> {
        CASE_TYPE_RULES.iter().collect()
    }

    fn normalize(&self, candidate: &str) -> String {
        normalize_case_type(candidate)
    }
}

/// Canonicalize a form-code candidate (`i-129`, `l129`, `|-765`) to `I129`.
/// Codes outside the catalog yield an empty string.
pub fn normalize_case_type(candidate: &str) -> String {
    let compact: String = candidate
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase();

    FORM_CODE_SHAPE
        .captures(&compact)
        .map(|caps| format!("I{}", &caps[1]))
        .filter(|code| is_known_form(code))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_type() {
        assert_eq!(normalize_case_type("I-129"), "I129");
        assert_eq!(normalize_case_type("i129"), "I129");
        assert_eq!(normalize_case_type("l-765"), "I765");
        assert_eq!(normalize_case_type("1-485"), "I485");
        assert_eq!(normalize_case_type("|539"), "I539");
        assert_eq!(normalize_case_type("I-797"), "");
        assert_eq!(normalize_case_type("I-12"), "");
        assert_eq!(normalize_case_type(""), "");
    }

    #[test]
    fn test_extract_form_label() {
        let extractor = CaseTypeExtractor::new();
        assert_eq!(
            extractor.extract("Form I-797C Notice of Action ... Form I-129 Petition"),
            "I129"
        );
    }

    #[test]
    fn test_extract_case_type_label() {
        let extractor = CaseTypeExtractor::new();
        assert_eq!(extractor.extract("Case Type: I-140 Immigrant Petition"), "I140");
        assert_eq!(extractor.extract("Classification: Form l-765"), "I765");
    }

    #[test]
    fn test_extract_bare_code() {
        let extractor = CaseTypeExtractor::new();
        assert_eq!(extractor.extract("Petition I485 pending"), "I485");
    }

    #[test]
    fn test_uncatalogued_form_not_found() {
        let extractor = CaseTypeExtractor::new();
        assert_eq!(extractor.extract("Form I-797 Notice of Action"), "");
        assert_eq!(extractor.extract("Receipt Number: IOE1234567890"), "");
    }
}

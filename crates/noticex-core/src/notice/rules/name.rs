//! Beneficiary name extraction.

use tracing::warn;

use super::patterns::{NAME_RULES, WHITESPACE_RUN};
use super::{FieldExtractor, PatternRule};
use crate::models::notice::NoticeField;

/// Beneficiary name extractor.
///
/// Rule order: configured known-name literals, `Beneficiary:` label,
/// "named beneficiary" phrase, bare `SURNAME, GIVEN NAMES` shape.
pub struct NameExtractor {
    known_names: Vec<PatternRule>,
}

impl NameExtractor {
    pub fn new() -> Self {
        Self {
            known_names: Vec::new(),
        }
    }

    /// Names to match literally (case-insensitive, any spacing) before any
    /// other rule.
    pub fn with_known_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.known_names = names
            .iter()
            .map(|n| n.as_ref().trim())
            .filter(|n| !n.is_empty())
            .filter_map(|n| match known_name_rule(n) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!("Skipping known name {:?}: {}", n, e);
                    None
                }
            })
            .collect();
        self
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    fn field(&self) -> NoticeField {
        NoticeField::Name
    }

    fn rules(&self) -> Vec<&PatternRule> {
        self.known_names.iter().chain(NAME_RULES.iter()).collect()
    }

    fn normalize(&self, candidate: &str) -> String {
        normalize_name(candidate)
    }
}

/// Upper-case and collapse whitespace.
pub fn normalize_name(candidate: &str) -> String {
    WHITESPACE_RUN
        .replace_all(candidate.trim(), " ")
        .to_uppercase()
}

fn known_name_rule(name: &str) -> Result<PatternRule, regex::Error> {
    let words: Vec<String> = name.split_whitespace().map(regex::escape).collect();
    PatternRule::compile(
        "name.known",
        &format!(r"(?i)\b({})\b", words.join(r"\s*")),
        1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::first_rule_match;

    #[test]
    fn test_label_rule_stops_at_next_field() {
        let extractor = NameExtractor::new();
        let text = "Beneficiary: LEE, JAE KEON Receipt Number: IOE1234567890";
        assert_eq!(extractor.extract(text), "LEE, JAE KEON");
    }

    #[test]
    fn test_label_variants() {
        let extractor = NameExtractor::new();
        assert_eq!(
            extractor.extract("Beneficiary's Name: Doe, Jane Ann DOB 01/01/1990"),
            "DOE, JANE ANN"
        );
        assert_eq!(
            extractor.extract("Beneficiary SMITH, JOHN A123456789"),
            "SMITH, JOHN"
        );
        assert_eq!(extractor.extract("Beneficiary: PARK, MIN  JI"), "PARK, MIN JI");
    }

    #[test]
    fn test_given_names_starting_with_stop_words() {
        let extractor = NameExtractor::new();
        assert_eq!(
            extractor.extract("Beneficiary: SMITH, JOHN CASEY Receipt Number: IOE123456789"),
            "SMITH, JOHN CASEY"
        );
        assert_eq!(
            extractor.extract("Beneficiary: DOE, JANE FORMAN DOB 01/01/1990"),
            "DOE, JANE FORMAN"
        );
        assert_eq!(
            extractor.extract("Beneficiary: WOLF, DATEN VALIDA Notice Date: 03/04/2023"),
            "WOLF, DATEN VALIDA"
        );
        assert_eq!(
            extractor.extract("Applicant GARCIA, MARIA ISABEL is eligible"),
            "GARCIA, MARIA ISABEL"
        );
    }

    #[test]
    fn test_year_ends_name() {
        let extractor = NameExtractor::new();
        assert_eq!(extractor.extract("Beneficiary: DATEN, LEO 1990 born"), "DATEN, LEO");
    }

    #[test]
    fn test_named_beneficiary_phrase() {
        let extractor = NameExtractor::new();
        let text = "Approved for the named beneficiaries KIM, SOO are listed below";
        assert_eq!(extractor.extract(text), "KIM, SOO");
    }

    #[test]
    fn test_bare_surname_given_shape() {
        let extractor = NameExtractor::new();
        assert_eq!(extractor.extract("Applicant GARCIA, MARIA is eligible"), "GARCIA, MARIA");
    }

    #[test]
    fn test_known_name_takes_precedence() {
        let extractor = NameExtractor::new().with_known_names(&["LEE, JAE KEON"]);
        let text = "Beneficiary: PARK, MIN JI Valid from 01/01/2023 lee,jae  keon";
        let m = first_rule_match(text, extractor.rules()).unwrap();
        assert_eq!(m.rule, "name.known");
        assert_eq!(extractor.extract(text), "LEE,JAE KEON");
    }

    #[test]
    fn test_known_names_are_escaped() {
        let extractor = NameExtractor::new().with_known_names(&["O.BRIEN, (SEAN)", "  "]);
        assert_eq!(extractor.known_names.len(), 1);
        assert_eq!(extractor.extract("OXBRIEN, SEAN"), "OXBRIEN, SEAN");
    }

    #[test]
    fn test_no_name_found() {
        let extractor = NameExtractor::new();
        assert_eq!(extractor.extract("Receipt Number: IOE1234567890"), "");
        assert_eq!(extractor.extract(""), "");
    }
}

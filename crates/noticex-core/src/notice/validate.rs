//! Post-extraction validation of notice records.
//!
//! Validation re-checks every non-empty field independently of how it was
//! extracted. An empty field means "not found" and never fails.

use chrono::NaiveDate;
use tracing::warn;

use super::rules::catalog::is_known_form;
use super::rules::dates::split_range;
use super::rules::patterns::{DATE_SHAPE, NAME_SHAPE, RECEIPT_SHAPE};
use crate::models::notice::{ExtractedRecord, NoticeField, ValidationError};

/// Validate a record, returning one diagnostic per failing non-empty field
/// in record order.
pub fn validate(record: &ExtractedRecord) -> Vec<ValidationError> {
    NoticeField::ALL
        .iter()
        .copied()
        .filter_map(|field| {
            let value = record.get(field);
            if value.is_empty() || is_valid_field(field, value) {
                return None;
            }
            let error = ValidationError::invalid(field, value);
            warn!("{}", error);
            Some(error)
        })
        .collect()
}

/// Check a single field value.
pub fn is_valid_field(field: NoticeField, value: &str) -> bool {
    match field {
        NoticeField::Name => is_valid_name(value),
        NoticeField::ReceiptNumber => is_valid_receipt_number(value),
        NoticeField::ReceivedDate => is_valid_date(value),
        NoticeField::ValidFromTo => is_valid_range(value),
        NoticeField::CaseType => is_known_form(value),
    }
}

/// `SURNAME, GIVEN NAMES`: letters, one comma, letters and spaces.
pub fn is_valid_name(value: &str) -> bool {
    NAME_SHAPE.is_match(value)
}

/// Known office prefix followed by exactly 9 or 10 digits.
pub fn is_valid_receipt_number(value: &str) -> bool {
    RECEIPT_SHAPE.is_match(value)
}

/// `MM/DD/YYYY` that names a real calendar day.
pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// `date to|through date`, both real dates, from-date not after to-date.
pub fn is_valid_range(value: &str) -> bool {
    let Some((from, to)) = split_range(value) else {
        return false;
    };
    match (parse_date(from), parse_date(to)) {
        (Some(from), Some(to)) => from <= to,
        _ => false,
    }
}

/// Parse a strict `MM/DD/YYYY` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let caps = DATE_SHAPE.captures(value)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> ExtractedRecord {
        ExtractedRecord {
            name: "LEE, JAE KEON".to_string(),
            receipt_number: "IOE1234567890".to_string(),
            received_date: "01/15/2023".to_string(),
            valid_from_to: "02/01/2023 to 01/31/2024".to_string(),
            case_type: "I129".to_string(),
        }
    }

    #[test]
    fn test_calendar_dates() {
        assert!(!is_valid_date("02/30/2023"));
        assert!(is_valid_date("02/28/2023"));
        assert!(is_valid_date("02/29/2024"));
        assert!(!is_valid_date("02/29/2023"));
        assert!(!is_valid_date("13/01/2023"));
        assert!(!is_valid_date("1/15/2023"));
        assert!(!is_valid_date("01/15/2023 "));
    }

    #[test]
    fn test_ranges() {
        assert!(is_valid_range("02/01/2023 to 01/31/2024"));
        assert!(is_valid_range("02/01/2023 through 01/31/2024"));
        assert!(is_valid_range("01/01/2023 to 01/01/2023"));
        assert!(!is_valid_range("01/01/2023 to 01/01/2022"));
        assert!(!is_valid_range("02/30/2023 to 01/31/2024"));
        assert!(!is_valid_range("02/01/2023 - 01/31/2024"));
    }

    #[test]
    fn test_names_and_receipts() {
        assert!(is_valid_name("LEE, JAE KEON"));
        assert!(!is_valid_name("LEE JAE KEON"));
        assert!(!is_valid_name("O'NEIL, SEAN"));
        assert!(is_valid_receipt_number("EAC123456789"));
        assert!(!is_valid_receipt_number("XYZ123456789"));
        assert!(!is_valid_receipt_number("IOE 123456789"));
    }

    #[test]
    fn test_valid_record_has_no_diagnostics() {
        assert!(validate(&record()).is_empty());
    }

    #[test]
    fn test_empty_fields_are_not_errors() {
        assert!(validate(&ExtractedRecord::default()).is_empty());
    }

    #[test]
    fn test_reversed_range_reported() {
        let mut record = record();
        record.valid_from_to = "01/01/2023 to 01/01/2022".to_string();
        assert_eq!(
            validate(&record),
            vec![ValidationError::invalid(
                NoticeField::ValidFromTo,
                "01/01/2023 to 01/01/2022"
            )]
        );
    }

    #[test]
    fn test_diagnostics_in_record_order() {
        let record = ExtractedRecord {
            name: "LEE".to_string(),
            receipt_number: String::new(),
            received_date: "02/30/2023".to_string(),
            valid_from_to: String::new(),
            case_type: "I797".to_string(),
        };
        let messages: Vec<String> = validate(&record).into_iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec![
                "Invalid name: LEE",
                "Invalid receivedDate: 02/30/2023",
                "Invalid caseType: I797",
            ]
        );
    }
}

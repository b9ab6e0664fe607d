//! Immigration notice record and diagnostic types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fields recovered from a notice.
///
/// Every field is a canonical string or empty; empty means the field could
/// not be recovered. There is no separate "absent" state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    /// Beneficiary name, `SURNAME, GIVEN NAMES` in upper case.
    pub name: String,

    /// Receipt number, 3-letter office prefix plus 9 or 10 digits.
    pub receipt_number: String,

    /// Received/notice date as `MM/DD/YYYY`.
    pub received_date: String,

    /// Validity range as `MM/DD/YYYY to MM/DD/YYYY`.
    pub valid_from_to: String,

    /// Canonical form number (e.g. `I129`).
    pub case_type: String,
}

impl ExtractedRecord {
    /// Value of a single field.
    pub fn get(&self, field: NoticeField) -> &str {
        match field {
            NoticeField::Name => &self.name,
            NoticeField::ReceiptNumber => &self.receipt_number,
            NoticeField::ReceivedDate => &self.received_date,
            NoticeField::ValidFromTo => &self.valid_from_to,
            NoticeField::CaseType => &self.case_type,
        }
    }

    /// True when nothing at all was recovered.
    pub fn is_empty(&self) -> bool {
        NoticeField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Fields that came back empty, in record order.
    pub fn missing_fields(&self) -> Vec<NoticeField> {
        NoticeField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }
}

/// Identifies one field of [`ExtractedRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeField {
    Name,
    ReceiptNumber,
    ReceivedDate,
    ValidFromTo,
    CaseType,
}

impl NoticeField {
    /// All fields in record order.
    pub const ALL: [NoticeField; 5] = [
        NoticeField::Name,
        NoticeField::ReceiptNumber,
        NoticeField::ReceivedDate,
        NoticeField::ValidFromTo,
        NoticeField::CaseType,
    ];

    /// Record key of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeField::Name => "name",
            NoticeField::ReceiptNumber => "receiptNumber",
            NoticeField::ReceivedDate => "receivedDate",
            NoticeField::ValidFromTo => "validFromTo",
            NoticeField::CaseType => "caseType",
        }
    }
}

impl fmt::Display for NoticeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recovered value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed.
    pub field: NoticeField,
    /// Human-readable message naming the field and the offending value.
    pub message: String,
}

impl ValidationError {
    pub fn invalid(field: NoticeField, value: &str) -> Self {
        Self {
            field,
            message: format!("Invalid {}: {}", field, value),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

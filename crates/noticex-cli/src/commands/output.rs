//! Output formatting shared by the extraction commands.

use noticex_core::{ExtractionResult, NoticeField};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for per-file outputs.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Row status shown in tables: `valid`, or `warning` when any field failed
/// validation.
pub fn status(result: &ExtractionResult) -> &'static str {
    if result.is_valid() { "valid" } else { "warning" }
}

/// Diagnostics joined into one cell.
pub fn diagnostics_cell(result: &ExtractionResult) -> String {
    result
        .diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = NoticeField::ALL.iter().map(|f| f.as_str()).collect();
    header.extend(["status", "diagnostics"]);
    wtr.write_record(&header)?;

    let mut row: Vec<String> = NoticeField::ALL
        .iter()
        .map(|f| result.record.get(*f).to_string())
        .collect();
    row.push(status(result).to_string());
    row.push(diagnostics_cell(result));
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let record = &result.record;
    let mut output = String::new();

    let lines = [
        ("Name", &record.name),
        ("Receipt number", &record.receipt_number),
        ("Received date", &record.received_date),
        ("Valid from/to", &record.valid_from_to),
        ("Case type", &record.case_type),
    ];
    for (label, value) in lines {
        let value = if value.is_empty() { "(not found)" } else { value.as_str() };
        output.push_str(&format!("{:<16}{}\n", format!("{}:", label), value));
    }

    if !result.diagnostics.is_empty() {
        output.push_str("\nDiagnostics:\n");
        for diagnostic in &result.diagnostics {
            output.push_str(&format!("  - {}\n", diagnostic));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use noticex_core::extract;

    #[test]
    fn test_text_format_marks_missing_fields() {
        let result = extract("Receipt Number: EAC123456789");
        let text = format_result(&result, OutputFormat::Text).unwrap();
        assert!(text.contains("Receipt number: EAC123456789"));
        assert!(text.contains("Name:           (not found)"));
        assert!(!text.contains("Diagnostics"));
    }

    #[test]
    fn test_csv_format_has_status_column() {
        let result = extract("Received Date: 02/30/2023");
        let csv = format_result(&result, OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("name,receiptNumber,receivedDate,validFromTo,caseType,status,diagnostics")
        );
        assert_eq!(
            lines.next(),
            Some(",,02/30/2023,,,warning,Invalid receivedDate: 02/30/2023")
        );
    }

    #[test]
    fn test_json_format_nests_record() {
        let result = extract("Form I-485");
        let json: serde_json::Value =
            serde_json::from_str(&format_result(&result, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["record"]["caseType"], "I485");
        assert_eq!(json["diagnostics"], serde_json::json!([]));
    }
}

//! Raw usage dataset parsing.
//!
//! The reporting endpoint answers either with a CSV download or with a JSON
//! collection, depending on the report and API version. Both shapes are
//! flattened into [`RawRow`]s without interpreting any column.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};
use usage_core::error::{ReportError, Result};
use usage_core::models::RawRow;

const BOM: char = '\u{feff}';

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a response body into raw rows, detecting JSON vs CSV by content.
///
/// An empty or whitespace-only body is an empty dataset, not an error.
pub fn parse_rows(body: &str) -> Result<Vec<RawRow>> {
    let body = body.trim_start_matches(BOM);
    let trimmed = body.trim_start();
    if trimmed.is_empty() {
        debug!("Usage dataset body is empty");
        return Ok(Vec::new());
    }

    let rows = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        parse_json_rows(trimmed)?
    } else {
        parse_csv_rows(body)?
    };

    debug!("Parsed {} raw rows from usage dataset", rows.len());
    Ok(rows)
}

/// Read and parse a dataset saved to disk.
pub fn read_rows_file(path: &Path) -> Result<Vec<RawRow>> {
    let body = std::fs::read_to_string(path)?;
    parse_rows(&body)
}

/// Parse a CSV document whose first record names the columns.
///
/// Rows may be shorter or longer than the header; cells beyond the header
/// are ignored and missing cells are simply absent from the row.
pub fn parse_csv_rows(body: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.trim_start_matches(BOM).as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_matches(BOM).trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (name.clone(), value))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Parse a JSON collection: either `{"value": [...]}` or a bare array.
///
/// Scalar members are kept as strings, with whole floats such as `50.0`
/// rendered as integers; `null`, arrays and nested objects are dropped.
/// Elements that are not objects are skipped with a warning.
pub fn parse_json_rows(body: &str) -> Result<Vec<RawRow>> {
    let document: Value = serde_json::from_str(body)?;

    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("value") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                return Err(ReportError::Config(
                    "usage response \"value\" member is not an array".to_string(),
                ))
            }
        },
        _ => {
            return Err(ReportError::Config(
                "usage response is neither a JSON object nor an array".to_string(),
            ))
        }
    };

    let mut rows: Vec<RawRow> = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(map) => rows.push(
                map.into_iter()
                    .filter_map(|(name, value)| scalar_to_string(value).map(|v| (name, v)))
                    .collect(),
            ),
            other => warn!(
                "Ignoring usage element {}: expected an object, found {}",
                index + 1,
                json_kind(&other)
            ),
        }
    }
    Ok(rows)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(number_to_string(&n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Whole floats such as `50.0` are written without the fraction so they
/// still parse as counts.
fn number_to_string(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // ── empty bodies ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_body_is_empty_dataset() {
        assert!(parse_rows("").unwrap().is_empty());
        assert!(parse_rows("  \n\t").unwrap().is_empty());
        assert!(parse_rows("\u{feff}").unwrap().is_empty());
    }

    // ── CSV ───────────────────────────────────────────────────────────────────

    #[test]
    fn test_csv_with_bom_and_spaced_headers() {
        let body = "\u{feff}Report Date,App ID,Request Count\n2025-08-01,555,12\n";
        let rows = parse_rows(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Report Date"), Some("2025-08-01"));
        assert_eq!(rows[0].get("App ID"), Some("555"));
        assert_eq!(rows[0].get("Request Count"), Some("12"));
    }

    #[test]
    fn test_csv_values_are_not_trimmed() {
        let rows = parse_rows("appId,serviceArea\n\"   \",\" Mail \"\n").unwrap();
        assert_eq!(rows[0].get("appId"), Some("   "));
        assert_eq!(rows[0].get("serviceArea"), Some(" Mail "));
    }

    #[test]
    fn test_csv_ragged_rows() {
        let rows = parse_rows("appId,requestCount,Date\na,1\nb,2,2025-01-01,extra\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Date"), None);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].get("Date"), Some("2025-01-01"));
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_csv_header_only() {
        assert!(parse_rows("appId,requestCount\n").unwrap().is_empty());
    }

    #[test]
    fn test_csv_quoted_commas() {
        let rows = parse_rows("AppId,ServiceArea\n1,\"Mail, Calendar\"\n").unwrap();
        assert_eq!(rows[0].get("ServiceArea"), Some("Mail, Calendar"));
    }

    // ── JSON ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_json_value_collection() {
        let body = r#"{
            "@odata.context": "https://graph.example/$metadata",
            "value": [
                {"appId": "123", "requestCount": 50, "reportDate": "2025-08-04"},
                {"appId": "456", "requestCount": "7", "isBeta": true,
                 "tags": ["x"], "tenantId": null}
            ]
        }"#;
        let rows = parse_rows(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("requestCount"), Some("50"));
        assert_eq!(rows[1].get("requestCount"), Some("7"));
        assert_eq!(rows[1].get("isBeta"), Some("true"));
        assert_eq!(rows[1].get("tags"), None);
        assert_eq!(rows[1].get("tenantId"), None);
    }

    #[test]
    fn test_json_whole_float_counts_render_as_integers() {
        let rows = parse_rows(r#"[{"a": 50.0, "b": 2.5, "c": -3.0, "d": 12}]"#).unwrap();
        assert_eq!(rows[0].get("a"), Some("50"));
        assert_eq!(rows[0].get("b"), Some("2.5"));
        assert_eq!(rows[0].get("c"), Some("-3"));
        assert_eq!(rows[0].get("d"), Some("12"));
    }

    #[test]
    fn test_json_bare_array_skips_non_objects() {
        let rows = parse_rows(r#"[{"AppId": "1"}, 42, "text"]"#).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("AppId"), Some("1"));
    }

    #[test]
    fn test_json_without_value_member_is_empty() {
        assert!(parse_rows(r#"{"@odata.context": "x"}"#).unwrap().is_empty());
        assert!(parse_rows(r#"{"value": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_json_value_not_array_is_error() {
        assert!(matches!(
            parse_rows(r#"{"value": {"appId": "1"}}"#),
            Err(ReportError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            parse_rows("{not json"),
            Err(ReportError::JsonParse(_))
        ));
    }

    // ── files ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_read_rows_file() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "AppId,RequestCount").unwrap();
        writeln!(file, "999,abc").unwrap();
        let rows = read_rows_file(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("RequestCount"), Some("abc"));
    }

    #[test]
    fn test_read_rows_file_missing() {
        let err = read_rows_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column headers of the normalized report, in output order.
pub const REPORT_COLUMNS: [&str; 6] = [
    "Date",
    "ServiceArea",
    "TenantId",
    "AppId",
    "AppName",
    "Usage",
];

/// One row of the usage dataset as delivered by the reporting endpoint.
///
/// Field names are not fixed: the same logical column can arrive as
/// `"AppId"`, `"App ID"` or `"appId"` depending on the feed, so the row is
/// kept as an open string-to-string mapping and interpreted later through
/// [`crate::columns::LogicalField`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Raw value of the field named exactly `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field names carried by this row, sorted for stable log output.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A single normalized line of the usage report.
///
/// Serialized field names match [`REPORT_COLUMNS`], so the same struct is
/// used for the CSV artifact in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportRecord {
    /// Report date exactly as the feed spelled it.
    pub date: Option<String>,
    /// Product area that generated the usage.
    pub service_area: Option<String>,
    /// Directory tenant the usage belongs to.
    pub tenant_id: Option<String>,
    /// Application identifier. Never empty.
    pub app_id: String,
    /// Display name from the directory, or `app_id` when unresolved.
    pub app_name: String,
    /// Request count; 0 when absent or unparsable.
    pub usage: u64,
}

/// Derived statistics over the records of a [`Report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Number of records in the report.
    pub total_records: usize,
    /// Number of distinct `app_id` values.
    pub distinct_apps: usize,
    /// Lexically smallest non-null date.
    pub min_date: Option<String>,
    /// Lexically largest non-null date.
    pub max_date: Option<String>,
}

impl ReportSummary {
    /// `(min, max)` when at least one record carried a date.
    pub fn date_range(&self) -> Option<(&str, &str)> {
        match (&self.min_date, &self.max_date) {
            (Some(min), Some(max)) => Some((min.as_str(), max.as_str())),
            _ => None,
        }
    }
}

/// The finished report: records in input row order plus their summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub records: Vec<ReportRecord>,
    pub summary: ReportSummary,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_from_pairs() {
        let row: RawRow = [("AppId", "123"), ("Request Count", "4")].into_iter().collect();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("AppId"), Some("123"));
        assert_eq!(row.get("appId"), None);
    }

    #[test]
    fn test_raw_row_insert_replaces() {
        let mut row = RawRow::new();
        assert!(row.is_empty());
        row.insert("Date", "2025-08-01");
        row.insert("Date", "2025-08-02");
        assert_eq!(row.get("Date"), Some("2025-08-02"));
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn test_raw_row_field_names_sorted() {
        let row: RawRow = [("b", "1"), ("A", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(row.field_names(), vec!["A", "a", "b"]);
    }

    #[test]
    fn test_report_record_serializes_with_column_names() {
        let record = ReportRecord {
            date: Some("2025-08-04".to_string()),
            service_area: None,
            tenant_id: Some("t1".to_string()),
            app_id: "123".to_string(),
            app_name: "MyApp".to_string(),
            usage: 50,
        };
        let json = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        for column in REPORT_COLUMNS {
            assert!(keys.contains(&column), "missing column {column}");
        }
        assert_eq!(json["Usage"], 50);
        assert!(json["ServiceArea"].is_null());
    }

    #[test]
    fn test_summary_date_range() {
        let summary = ReportSummary {
            total_records: 2,
            distinct_apps: 1,
            min_date: Some("2025-08-01".to_string()),
            max_date: Some("2025-08-04".to_string()),
        };
        assert_eq!(summary.date_range(), Some(("2025-08-01", "2025-08-04")));
        assert_eq!(ReportSummary::default().date_range(), None);
    }

    #[test]
    fn test_default_report_is_empty() {
        let report = Report::default();
        assert!(report.is_empty());
        assert_eq!(report.summary.total_records, 0);
        assert_eq!(report.summary.distinct_apps, 0);
    }
}

use crate::models::ReportSummary;

/// Placeholder shown for absent optional values.
pub const EMPTY_CELL: &str = "-";

/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use usage_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Display text for an optional field, using [`EMPTY_CELL`] when absent.
pub fn format_optional(value: Option<&str>) -> &str {
    value.unwrap_or(EMPTY_CELL)
}

/// Render the summary date range as `"<min> to <max>"`, or `"n/a"` when no
/// record carried a date.
///
/// # Examples
///
/// ```
/// use usage_core::formatting::format_date_range;
/// use usage_core::models::ReportSummary;
///
/// let summary = ReportSummary {
///     total_records: 2,
///     distinct_apps: 1,
///     min_date: Some("2025-08-01".to_string()),
///     max_date: Some("2025-08-04".to_string()),
/// };
/// assert_eq!(format_date_range(&summary), "2025-08-01 to 2025-08-04");
/// assert_eq!(format_date_range(&ReportSummary::default()), "n/a");
/// ```
pub fn format_date_range(summary: &ReportSummary) -> String {
    match summary.date_range() {
        Some((min, max)) => format!("{} to {}", min, max),
        None => "n/a".to_string(),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_count ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_count_small() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_format_count_exact_thousands() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_000_000), "1,000,000");
    }

    #[test]
    fn test_format_count_max() {
        assert_eq!(format_count(u64::MAX), "18,446,744,073,709,551,615");
    }

    // ── format_optional ──────────────────────────────────────────────────────

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some("Teams")), "Teams");
        assert_eq!(format_optional(None), "-");
    }

    // ── format_date_range ────────────────────────────────────────────────────

    #[test]
    fn test_format_date_range_single_day() {
        let summary = ReportSummary {
            total_records: 1,
            distinct_apps: 1,
            min_date: Some("2025-08-04".to_string()),
            max_date: Some("2025-08-04".to_string()),
        };
        assert_eq!(format_date_range(&summary), "2025-08-04 to 2025-08-04");
    }

    #[test]
    fn test_format_date_range_without_dates() {
        let summary = ReportSummary {
            total_records: 3,
            distinct_apps: 2,
            min_date: None,
            max_date: None,
        };
        assert_eq!(format_date_range(&summary), "n/a");
    }
}

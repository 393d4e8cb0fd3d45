//! Logical report fields and the synonym-based column resolver.
//!
//! The usage feed does not commit to one spelling per column, so each
//! [`LogicalField`] carries an ordered list of accepted raw field names and
//! the first usable match wins.

use crate::models::RawRow;

/// A column of the normalized report, independent of how the feed spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    Date,
    ServiceArea,
    TenantId,
    AppId,
    RequestCount,
}

impl LogicalField {
    /// All logical fields, in report column order.
    pub const ALL: [LogicalField; 5] = [
        LogicalField::Date,
        LogicalField::ServiceArea,
        LogicalField::TenantId,
        LogicalField::AppId,
        LogicalField::RequestCount,
    ];

    /// Accepted raw field names, highest priority first.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            LogicalField::Date => &["reportDate", "ReportDate", "Report Date", "Date"],
            LogicalField::ServiceArea => &["serviceArea", "ServiceArea", "Service Area"],
            LogicalField::TenantId => &["tenantId", "TenantId", "Tenant ID"],
            LogicalField::AppId => &["appId", "AppId", "App ID", "ApplicationId"],
            LogicalField::RequestCount => &[
                "requestCount",
                "RequestCount",
                "Request Count",
                "Usage",
                "Count",
            ],
        }
    }

    /// Resolve this field from `row` with the whitespace-aware policy.
    pub fn resolve(self, row: &RawRow) -> Option<&str> {
        resolve(row, self.synonyms())
    }
}

/// Return the first synonym value in `row` whose trimmed text is non-empty.
///
/// Whitespace-only values count as absent, so resolution moves on to the
/// next synonym. The value is returned untrimmed.
pub fn resolve<'a>(row: &'a RawRow, synonyms: &[&str]) -> Option<&'a str> {
    synonyms
        .iter()
        .filter_map(|name| row.get(name))
        .find(|value| !value.trim().is_empty())
}

/// Return the first synonym value in `row` that is non-empty.
///
/// Unlike [`resolve`], a whitespace-only value is accepted and stops the
/// search. Only the request-count column is resolved this way.
pub fn resolve_present<'a>(row: &'a RawRow, synonyms: &[&str]) -> Option<&'a str> {
    synonyms
        .iter()
        .filter_map(|name| row.get(name))
        .find(|value| !value.is_empty())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

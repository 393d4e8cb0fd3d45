//! Converts one raw usage row into a strictly typed [`ReportRecord`].

use usage_core::columns::{resolve_present, LogicalField};
use usage_core::directory::DirectoryLookup;
use usage_core::models::{RawRow, ReportRecord};

use crate::name_cache::NameCache;

/// Normalize `row`, or return `None` when it has no usable application id.
///
/// Display names are resolved through `cache`, so `lookup` is consulted at
/// most once per distinct id across all rows sharing the cache.
pub fn normalize(
    row: &RawRow,
    cache: &mut NameCache,
    lookup: &dyn DirectoryLookup,
) -> Option<ReportRecord> {
    let app_id = LogicalField::AppId.resolve(row)?.trim().to_string();

    let date = resolve_owned(row, LogicalField::Date);
    let service_area = resolve_owned(row, LogicalField::ServiceArea);
    let tenant_id = resolve_owned(row, LogicalField::TenantId);
    let usage = resolve_present(row, LogicalField::RequestCount.synonyms())
        .map(parse_usage)
        .unwrap_or(0);

    let app_name = cache.get_or_fetch(&app_id, |id| lookup.lookup(id));

    Some(ReportRecord {
        date,
        service_area,
        tenant_id,
        app_id,
        app_name,
        usage,
    })
}

/// Parse a request count. Anything that is not a non-negative integer is 0.
///
/// ```
/// use usage_data::normalizer::parse_usage;
///
/// assert_eq!(parse_usage("50"), 50);
/// assert_eq!(parse_usage(" 7 "), 7);
/// assert_eq!(parse_usage("abc"), 0);
/// assert_eq!(parse_usage("-3"), 0);
/// ```
pub fn parse_usage(raw: &str) -> u64 {
    raw.trim().parse::<u64>().unwrap_or(0)
}

fn resolve_owned(row: &RawRow, field: LogicalField) -> Option<String> {
    field.resolve(row).map(str::to_string)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

//! Report assembly: normalizes every row of a run and derives the summary.

use std::collections::HashSet;

use tracing::{debug, info, warn};
use usage_core::directory::DirectoryLookup;
use usage_core::models::{RawRow, Report, ReportRecord, ReportSummary};

use crate::name_cache::NameCache;
use crate::normalizer::normalize;

// ── ReportAssembler ───────────────────────────────────────────────────────────

/// Stateless driver that turns a run's raw rows into a [`Report`].
pub struct ReportAssembler;

impl ReportAssembler {
    /// Normalize `rows` in order and summarize the surviving records.
    ///
    /// Rows without an application id are dropped with a warning. One
    /// [`NameCache`] lives for the duration of the call, so `lookup` sees
    /// each distinct application id once.
    pub fn assemble(rows: &[RawRow], lookup: &dyn DirectoryLookup) -> Report {
        let mut cache = NameCache::new();
        let mut records: Vec<ReportRecord> = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;

        for (index, row) in rows.iter().enumerate() {
            match normalize(row, &mut cache, lookup) {
                Some(record) => records.push(record),
                None => {
                    skipped += 1;
                    warn!(
                        "Skipping row {}: no application id (fields: {})",
                        index + 1,
                        describe_fields(row)
                    );
                }
            }
        }

        let summary = Self::summarize(&records);

        debug!(
            "Resolved {} distinct application names with {} directory lookups",
            cache.len(),
            cache.fetch_count()
        );
        info!(
            "Assembled {} records ({} rows skipped, {} distinct applications)",
            summary.total_records, skipped, summary.distinct_apps
        );

        Report { records, summary }
    }

    /// Compute count, distinct-application count and the date range.
    ///
    /// Dates are compared as plain strings, never parsed as calendar dates.
    pub fn summarize(records: &[ReportRecord]) -> ReportSummary {
        let distinct: HashSet<&str> = records.iter().map(|r| r.app_id.as_str()).collect();
        let dates = || records.iter().filter_map(|r| r.date.as_deref());

        ReportSummary {
            total_records: records.len(),
            distinct_apps: distinct.len(),
            min_date: dates().min().map(str::to_string),
            max_date: dates().max().map(str::to_string),
        }
    }
}

fn describe_fields(row: &RawRow) -> String {
    if row.is_empty() {
        "none".to_string()
    } else {
        row.field_names().join(", ")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

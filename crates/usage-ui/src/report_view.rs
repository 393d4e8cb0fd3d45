//! Console rendering of a finished [`Report`].

use chrono::{DateTime, Utc};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use usage_core::formatting::{self, EMPTY_CELL};
use usage_core::models::{Report, ReportRecord, ReportSummary, REPORT_COLUMNS};

/// Index of the `Usage` column in [`REPORT_COLUMNS`].
const USAGE_COLUMN: usize = 5;

/// Render the whole console report: title, table (or a no-data notice) and
/// the summary block.
pub fn render_report(report: &Report, days: u32, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Application usage for the last {} days (generated {})\n\n",
        days,
        generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    if report.is_empty() {
        out.push_str(&format!("No usage data found for the last {} days.\n", days));
    } else {
        out.push_str(&render_table(&report.records).to_string());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_summary(&report.summary));
    out
}

/// Build the six-column record table.
pub fn render_table(records: &[ReportRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(REPORT_COLUMNS.iter().map(|c| header_cell(c)));
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(USAGE_COLUMN) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for record in records {
        table.add_row(vec![
            optional_cell(record.date.as_deref()),
            optional_cell(record.service_area.as_deref()),
            optional_cell(record.tenant_id.as_deref()),
            Cell::new(&record.app_id),
            name_cell(record),
            Cell::new(formatting::format_count(record.usage)),
        ]);
    }
    table
}

/// The trailing summary block, one statistic per line.
pub fn render_summary(summary: &ReportSummary) -> String {
    format!(
        "Total records: {}\nDistinct applications: {}\nDate range: {}\n",
        summary.total_records,
        summary.distinct_apps,
        formatting::format_date_range(summary)
    )
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => Cell::new(EMPTY_CELL).add_attribute(Attribute::Dim),
    }
}

/// Unresolved names (equal to the id) are dimmed.
fn name_cell(record: &ReportRecord) -> Cell {
    let cell = Cell::new(&record.app_name);
    if record.app_name == record.app_id {
        cell.add_attribute(Attribute::Dim)
    } else {
        cell
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

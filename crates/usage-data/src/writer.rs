//! CSV serialization of a finished [`Report`].

use std::io::{Read, Write};
use std::path::Path;

use tracing::info;
use usage_core::error::{ReportError, Result};
use usage_core::models::{Report, ReportRecord, REPORT_COLUMNS};

/// Write `report` as CSV to `out`.
///
/// The six-column header is always written, even for an empty report.
/// Text fields are quoted; `Usage` is written bare.
pub fn write_csv<W: Write>(report: &Report, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(out);

    writer.write_record(REPORT_COLUMNS)?;
    for record in &report.records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `report` to `path`, replacing any existing file.
///
/// The CSV is rendered in memory first and then moved into place through a
/// sibling temp file, so a failure never leaves a partial artifact behind.
pub fn write_csv_file(report: &Report, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    write_csv(report, &mut buffer)?;

    let output_error = |source: std::io::Error| ReportError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(output_error)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ReportError::Config(format!("{} is not a file path", path.display())))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    std::fs::write(&tmp, &buffer).map_err(output_error)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(output_error(e));
    }

    info!(
        "Wrote {} records to {}",
        report.records.len(),
        path.display()
    );
    Ok(())
}

/// Read records back from a CSV produced by [`write_csv`].
pub fn read_csv<R: Read>(input: R) -> Result<Vec<ReportRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);
    let mut records = Vec::new();
    for record in reader.deserialize::<ReportRecord>() {
        records.push(record?);
    }
    Ok(records)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

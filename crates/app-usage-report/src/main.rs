mod bootstrap;

use anyhow::{Context, Result};
use chrono::Utc;
use usage_core::directory::IdentityLookup;
use usage_core::models::{RawRow, Report};
use usage_core::settings::{OutputMode, Settings};
use usage_data::assembler::ReportAssembler;
use usage_data::{reader, writer};
use usage_graph::client::GraphClient;
use usage_graph::directory::GraphDirectory;
use usage_graph::usage::fetch_usage_rows;
use usage_ui::report_view::render_report;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("App Usage Report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Lookback: {} days, output: {}",
        settings.days,
        match settings.output_mode() {
            OutputMode::File(path) => path.display().to_string(),
            OutputMode::Console => "console".to_string(),
        }
    );

    run(&settings)
}

/// Fetch, normalize and emit one report according to `settings`.
fn run(settings: &Settings) -> Result<()> {
    let report = build_report(settings)?;

    match settings.output_mode() {
        OutputMode::File(path) => {
            writer::write_csv_file(&report, &path)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            println!(
                "Report with {} records written to {}",
                report.summary.total_records,
                path.display()
            );
        }
        OutputMode::Console => {
            print!("{}", render_report(&report, settings.days, Utc::now()));
        }
    }

    Ok(())
}

fn build_report(settings: &Settings) -> Result<Report> {
    let (rows, client): (Vec<RawRow>, Option<GraphClient>) = match &settings.input {
        Some(path) => {
            let rows = reader::read_rows_file(path)
                .with_context(|| format!("failed to read usage dataset {}", path.display()))?;
            let client = if settings.needs_api() {
                Some(connect(settings)?)
            } else {
                None
            };
            (rows, client)
        }
        None => {
            // Resolve everything that can fail on configuration before any request.
            let report_url = settings.report_url()?;
            let client = connect(settings)?;
            let rows =
                fetch_usage_rows(&client, &report_url).context("failed to retrieve usage report")?;
            (rows, Some(client))
        }
    };

    let report = match (&client, settings.skip_name_resolution) {
        (Some(client), false) => ReportAssembler::assemble(&rows, &GraphDirectory::new(client)),
        _ => {
            tracing::info!("Skipping directory name resolution");
            ReportAssembler::assemble(&rows, &IdentityLookup)
        }
    };

    Ok(report)
}

fn connect(settings: &Settings) -> Result<GraphClient> {
    let token = settings.require_token()?;
    Ok(GraphClient::new(&settings.graph_url, token, settings.timeout_secs)?)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

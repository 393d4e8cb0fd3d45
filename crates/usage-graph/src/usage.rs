use tracing::{info, warn};
use usage_core::error::Result;
use usage_core::models::RawRow;
use usage_data::reader::parse_rows;

use crate::client::GraphClient;

/// Download the usage dataset at `report_url` and split it into raw rows.
///
/// A 404 or an empty body means the tenant has no usage for the window and
/// yields an empty dataset. Any other failure is returned to the caller.
pub fn fetch_usage_rows(client: &GraphClient, report_url: &str) -> Result<Vec<RawRow>> {
    info!("Requesting usage report from {}", report_url);

    let Some(body) = client.get_text(report_url)? else {
        warn!("Usage report not found at {}; treating as empty", report_url);
        return Ok(Vec::new());
    };

    let rows = parse_rows(&body)?;
    if rows.is_empty() {
        info!("Usage report contains no rows");
    } else {
        info!("Retrieved {} usage rows", rows.len());
    }
    Ok(rows)
}

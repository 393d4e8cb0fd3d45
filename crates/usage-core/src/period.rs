use crate::error::{ReportError, Result};
use tracing::warn;

/// Lookback windows the reporting endpoint is documented to accept.
pub const PUBLISHED_WINDOWS: [u32; 4] = [7, 30, 90, 180];

/// Default lookback window in days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Map a lookback window in days to the endpoint's period token.
///
/// ```
/// use usage_core::period::period_token;
///
/// assert_eq!(period_token(30).unwrap(), "D30");
/// assert_eq!(period_token(7).unwrap(), "D7");
/// ```
pub fn period_token(days: u32) -> Result<String> {
    if days == 0 {
        return Err(ReportError::InvalidLookback(days));
    }
    if !PUBLISHED_WINDOWS.contains(&days) {
        warn!(
            "Lookback window of {} days is not one of {:?}; the endpoint may reject it",
            days, PUBLISHED_WINDOWS
        );
    }
    Ok(format!("D{}", days))
}

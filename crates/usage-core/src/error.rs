use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while building an application usage report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The report artifact could not be written to disk.
    #[error("Failed to write report to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// No access token was supplied for an operation that talks to the API.
    #[error("No access token provided (use --access-token or APP_USAGE_ACCESS_TOKEN)")]
    MissingToken,

    /// The HTTP transport failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The API answered with a non-success status code.
    #[error("Request to {url} failed with status {status}: {body}")]
    HttpStatus { status: u16, url: String, body: String },

    /// The lookback window cannot be mapped to a period token.
    #[error("Invalid lookback window: {0} days")]
    InvalidLookback(u32),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;

use clap::Parser;
use std::path::PathBuf;

use crate::error::{ReportError, Result};
use crate::period::{self, DEFAULT_LOOKBACK_DAYS};

/// Placeholder in [`Settings::report_path`] replaced by the period token.
pub const PERIOD_PLACEHOLDER: &str = "{period}";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Per-application API usage report with display names from the directory
#[derive(Parser, Debug, Clone)]
#[command(
    name = "app-usage-report",
    about = "Per-application API usage report with display names from the directory",
    version
)]
pub struct Settings {
    /// Write the report as CSV to this path instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Lookback window in days
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_LOOKBACK_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=365)
    )]
    pub days: u32,

    /// Base URL of the Graph API
    #[arg(long, env = "APP_USAGE_GRAPH_URL", default_value = "https://graph.microsoft.com/beta")]
    pub graph_url: String,

    /// Usage report path relative to the base URL; `{period}` is substituted
    #[arg(
        long,
        env = "APP_USAGE_REPORT_PATH",
        default_value = "reports/getApiUsage(period='{period}')"
    )]
    pub report_path: String,

    /// Bearer token for the Graph API
    #[arg(long, env = "APP_USAGE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Read the raw usage dataset from a local CSV or JSON file
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Do not query the directory; application names fall back to their ids
    #[arg(long)]
    pub skip_name_resolution: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path (logs go to stderr otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Where the finished report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// CSV artifact at the given path.
    File(PathBuf),
    /// Human-readable table on stdout.
    Console,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    pub fn output_mode(&self) -> OutputMode {
        match &self.output {
            Some(path) => OutputMode::File(path.clone()),
            None => OutputMode::Console,
        }
    }

    /// Period token for the configured lookback window, e.g. `"D30"`.
    pub fn period_token(&self) -> Result<String> {
        period::period_token(self.days)
    }

    /// Full URL of the usage report for the configured lookback window.
    pub fn report_url(&self) -> Result<String> {
        let path = self.report_path.trim().trim_start_matches('/');
        if path.is_empty() {
            return Err(ReportError::Config("report path is empty".to_string()));
        }
        let base = self.graph_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ReportError::Config("Graph base URL is empty".to_string()));
        }
        let token = self.period_token()?;
        Ok(format!(
            "{}/{}",
            base,
            path.replace(PERIOD_PLACEHOLDER, &token)
        ))
    }

    /// Whether this run has to talk to the API at all.
    pub fn needs_api(&self) -> bool {
        self.input.is_none() || !self.skip_name_resolution
    }

    /// The access token, or [`ReportError::MissingToken`] when none is set.
    pub fn require_token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ReportError::MissingToken)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

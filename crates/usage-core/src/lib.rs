//! Core types for the application usage report.
//!
//! Holds the raw and normalized data model, the logical-field synonym table
//! and the column resolver built on it, the directory lookup seam, period
//! tokens, the error type, CLI settings and number formatting helpers.

pub mod columns;
pub mod directory;
pub mod error;
pub mod formatting;
pub mod models;
pub mod period;
pub mod settings;

pub use error::{ReportError, Result};

//! Normalization and enrichment pipeline for the application usage report.
//!
//! Reads loosely-shaped usage rows, normalizes each into a
//! [`usage_core::models::ReportRecord`] with a directory-resolved display
//! name, assembles the final report and writes it out as CSV.

pub mod assembler;
pub mod name_cache;
pub mod normalizer;
pub mod reader;
pub mod writer;

pub use usage_core as core;

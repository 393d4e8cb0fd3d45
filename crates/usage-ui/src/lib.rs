//! Console presentation for the application usage report.
//!
//! Renders the normalized records as a [`comfy_table`] table followed by the
//! summary block.

pub mod report_view;

pub use usage_core as core;

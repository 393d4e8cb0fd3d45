//! Microsoft Graph adapters for the application usage report.
//!
//! Wraps the blocking HTTP transport, downloads the usage dataset and
//! implements [`usage_core::directory::DirectoryLookup`] against the
//! `applications` and `servicePrincipals` collections.

pub mod client;
pub mod directory;
pub mod usage;

#[cfg(test)]
mod stub_server;

pub use usage_core as core;

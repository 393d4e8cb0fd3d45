//! The directory lookup seam between the normalization core and the identity
//! service.

/// Resolves an application identifier to a human-readable display name.
///
/// Implementations must never fail: when nothing matches, or the directory
/// cannot be reached, they return `app_id` unchanged so that a single bad
/// identifier cannot abort a report.
pub trait DirectoryLookup {
    fn lookup(&self, app_id: &str) -> String;
}

impl<F> DirectoryLookup for F
where
    F: Fn(&str) -> String,
{
    fn lookup(&self, app_id: &str) -> String {
        self(app_id)
    }
}

/// Lookup that never consults a directory and echoes the identifier back.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLookup;

impl DirectoryLookup for IdentityLookup {
    fn lookup(&self, app_id: &str) -> String {
        app_id.to_string()
    }
}

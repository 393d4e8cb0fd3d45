//! Two-stage display name resolution against the identity directory.

use serde_json::Value;
use tracing::{debug, warn};
use usage_core::directory::DirectoryLookup;
use usage_core::error::Result;

use crate::client::GraphClient;

/// Directory collections consulted for a display name, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorySource {
    /// Applications registered in the tenant.
    Application,
    /// Service principals, covering first-party and multi-tenant apps.
    ServicePrincipal,
}

impl DirectorySource {
    pub const FALLBACK_ORDER: [DirectorySource; 2] =
        [DirectorySource::Application, DirectorySource::ServicePrincipal];

    /// Graph collection name.
    pub fn collection(self) -> &'static str {
        match self {
            DirectorySource::Application => "applications",
            DirectorySource::ServicePrincipal => "servicePrincipals",
        }
    }
}

/// [`DirectoryLookup`] backed by the Graph `applications` and
/// `servicePrincipals` collections.
pub struct GraphDirectory<'a> {
    client: &'a GraphClient,
}

impl<'a> GraphDirectory<'a> {
    pub fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }

    /// Query one collection for the display name of `app_id`.
    fn find_display_name(&self, source: DirectorySource, app_id: &str) -> Result<Option<String>> {
        let url = self.client.url_for(source.collection());
        let filter = app_id_filter(app_id);
        let response = self
            .client
            .get_json(&url, &[("$filter", filter.as_str()), ("$select", "displayName")])?;
        Ok(first_display_name(&response))
    }
}

impl DirectoryLookup for GraphDirectory<'_> {
    fn lookup(&self, app_id: &str) -> String {
        for source in DirectorySource::FALLBACK_ORDER {
            match self.find_display_name(source, app_id) {
                Ok(Some(name)) => {
                    debug!("Resolved {} via {}: {}", app_id, source.collection(), name);
                    return name;
                }
                Ok(None) => debug!("No {} match for {}", source.collection(), app_id),
                Err(e) => warn!(
                    "Directory lookup in {} failed for {}: {}",
                    source.collection(),
                    app_id,
                    e
                ),
            }
        }
        app_id.to_string()
    }
}

/// OData filter selecting objects whose `appId` equals `app_id`.
///
/// Single quotes are doubled, the OData escape for string literals.
pub fn app_id_filter(app_id: &str) -> String {
    format!("appId eq '{}'", app_id.replace('\'', "''"))
}

/// First non-blank `displayName` in a collection response's `value` array.
pub fn first_display_name(response: &Value) -> Option<String> {
    response
        .get("value")?
        .as_array()?
        .iter()
        .filter_map(|item| item.get("displayName").and_then(Value::as_str))
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

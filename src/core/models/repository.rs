//! Repository model
//!
//! Identifying attributes of a hosted repository. Immutable once listed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A repository in a code-hosting workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Display name
    pub name: String,
    /// Unique short identifier, used as cache key and filter key
    pub slug: String,
    /// Fully-qualified name (e.g., "acme/payments-api")
    pub full_name: String,
    /// Clone links keyed by protocol ("https", "ssh")
    #[serde(default)]
    pub clone_links: BTreeMap<String, String>,
}

impl Repository {
    /// Create a repository without clone links
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            full_name: full_name.into(),
            clone_links: BTreeMap::new(),
        }
    }

    /// Add a clone link for a protocol
    #[must_use]
    pub fn with_clone_link(mut self, protocol: impl Into<String>, href: impl Into<String>) -> Self {
        self.clone_links.insert(protocol.into(), href.into());
        self
    }

    /// Get the clone link for a protocol
    #[must_use]
    pub fn clone_link(&self, protocol: &str) -> Option<&str> {
        self.clone_links.get(protocol).map(String::as_str)
    }
}

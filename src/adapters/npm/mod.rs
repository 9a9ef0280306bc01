//! npm registry lookups

use serde::Deserialize;

use crate::core::models::Version;

#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: String,
}

/// Client for the public npm registry
#[derive(Debug, Clone)]
pub struct NpmRegistry {
    http: reqwest::Client,
    base_url: String,
}

impl NpmRegistry {
    /// Create a client for `base_url` (e.g., `https://registry.npmjs.org`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL of the `latest` dist-tag manifest of `package`
    #[must_use]
    pub fn latest_url(&self, package: &str) -> String {
        format!("{}/{package}/latest", self.base_url)
    }

    /// Latest published version of `package`, or `None` if the lookup fails
    pub async fn latest_version(&self, package: &str) -> Option<Version> {
        let url = self.latest_url(package);
        let manifest = async {
            self.http
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<LatestManifest>()
                .await
        }
        .await;

        match manifest {
            Ok(manifest) => Version::parse(&manifest.version),
            Err(err) => {
                log::warn!("Failed to fetch latest {package} version from npm: {err}");
                None
            },
        }
    }
}

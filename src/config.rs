//! Configuration: user defaults and credentials
//!
//! [`Settings`] are read from `~/.repo-analyzer/config.toml`; a missing or
//! unparsable file falls back to defaults. [`Credentials`] come from the
//! environment (after loading `.env`, if present).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::services::DEFAULT_CONCURRENCY;
use crate::error::{AnalyzerError, Result};
use crate::paths;

/// Environment variable holding the API username
pub const USERNAME_VAR: &str = "BITBUCKET_USERNAME";

/// Environment variable holding the API app password
pub const PASSWORD_VAR: &str = "BITBUCKET_APP_PASSWORD";

/// User defaults for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum concurrent check invocations
    pub concurrency: usize,
    /// Where reports are written
    pub output_dir: PathBuf,
    /// Where repositories are cloned
    pub cache_dir: PathBuf,
    /// Base URL of the hosting API
    pub api_url: String,
    /// Base URL of the npm registry
    pub registry_url: String,
    /// Repositories per listing page
    pub page_len: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            output_dir: paths::output_dir(),
            cache_dir: paths::cache_dir(),
            api_url: "https://api.bitbucket.org/2.0".to_string(),
            registry_url: "https://registry.npmjs.org".to_string(),
            page_len: 50,
        }
    }
}

impl Settings {
    /// Load settings from the global config file, or defaults
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&paths::global_config())
    }

    /// Load settings from `path`, or defaults if it is missing or invalid
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path).map(|content| toml::from_str(&content)) {
            Ok(Ok(settings)) => settings,
            Ok(Err(err)) => {
                log::warn!("Ignoring invalid config {}: {err}", path.display());
                Self::default()
            },
            Err(err) => {
                log::warn!("Cannot read config {}: {err}", path.display());
                Self::default()
            },
        }
    }
}

/// API credentials, also used for https clones
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account username
    pub username: String,
    /// App password
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from the process environment, loading `.env` first
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`; blank values count as missing
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        match (get(USERNAME_VAR), get(PASSWORD_VAR)) {
            (Some(username), Some(password)) => Ok(Self::new(username, password)),
            _ => Err(AnalyzerError::config(format!(
                "please set {USERNAME_VAR} and {PASSWORD_VAR} as environment variables"
            ))),
        }
    }
}

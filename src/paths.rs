//! Centralized path definitions for repo-analyzer
//!
//! ## Layout
//!
//! ```text
//! ./output/                                   # Reports (per working directory)
//! └── <check>-results-<timestamp>.json
//!
//! <system temp>/bitbucket-repo-analyzer/      # Clone cache, shared across runs
//! └── <slug>/
//!
//! ~/.repo-analyzer/
//! └── config.toml                             # User defaults
//! ```

use std::path::PathBuf;

/// Default report directory, relative to the working directory
pub const OUTPUT_DIR: &str = "output";

/// Clone cache directory name under the system temp dir
const CACHE_DIR_NAME: &str = "bitbucket-repo-analyzer";

/// Global config directory name
const GLOBAL_DIR: &str = ".repo-analyzer";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Default report directory
#[must_use]
pub fn output_dir() -> PathBuf {
    PathBuf::from(OUTPUT_DIR)
}

/// Default clone cache directory
///
/// Returns `<system temp>/bitbucket-repo-analyzer/`.
#[must_use]
pub fn cache_dir() -> PathBuf {
    std::env::temp_dir().join(CACHE_DIR_NAME)
}

/// Get the global repo-analyzer directory.
///
/// Returns `~/.repo-analyzer/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.repo-analyzer/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}

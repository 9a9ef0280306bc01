//! Per-run context shared by all checks
//!
//! Created once per run and dropped with it. Holds the services every check
//! composes (clone cache, file tree) and lookups that should happen at most
//! once per run (latest React release).

use std::path::PathBuf;

use tokio::sync::OnceCell;

use crate::adapters::{CloneCache, FileTree, NpmRegistry};
use crate::config::{Credentials, Settings};
use crate::core::models::{CheckResult, Repository, Version};

/// Services and per-run caches handed to checks at construction
#[derive(Debug)]
pub struct CheckContext {
    /// Local checkout cache
    pub clones: CloneCache,
    /// Walker with the default excludes
    pub files: FileTree,
    npm: NpmRegistry,
    latest_react: OnceCell<Option<Version>>,
}

impl CheckContext {
    /// Create a context
    #[must_use]
    pub fn new(clones: CloneCache, files: FileTree, npm: NpmRegistry) -> Self {
        Self {
            clones,
            files,
            npm,
            latest_react: OnceCell::new(),
        }
    }

    /// Create a context from user settings
    #[must_use]
    pub fn from_settings(settings: &Settings, credentials: Option<Credentials>) -> Self {
        Self::new(
            CloneCache::new(&settings.cache_dir, credentials),
            FileTree::default(),
            NpmRegistry::new(&settings.registry_url),
        )
    }

    /// Pin the latest React version instead of asking the registry
    #[must_use]
    pub fn with_latest_react(mut self, version: Option<Version>) -> Self {
        self.latest_react = OnceCell::new_with(Some(version));
        self
    }

    /// Latest published React version, fetched at most once per run
    pub async fn latest_react(&self) -> Option<Version> {
        *self
            .latest_react
            .get_or_init(|| self.npm.latest_version("react"))
            .await
    }

    /// Local checkout of `repo`, or the message to report if cloning failed
    pub async fn checkout(&self, repo: &Repository) -> Result<PathBuf, CheckResult> {
        self.clones.ensure_cloned(repo).await.map_err(|err| {
            log::warn!("Failed to clone {}: {err}", repo.slug);
            CheckResult::message(format!("Failed to clone {}: {err}", repo.slug))
        })
    }
}

/// Run blocking repository scanning off the async workers
///
/// A scan that panics is reported as a message for the repository rather
/// than taking down the batch.
pub async fn scan_blocking<F>(slug: &str, scan: F) -> CheckResult
where
    F: FnOnce() -> CheckResult + Send + 'static,
{
    tokio::task::spawn_blocking(scan).await.unwrap_or_else(|err| {
        log::error!("Scan of {slug} did not complete: {err}");
        CheckResult::message(format!("Failed to scan {slug}: {err}"))
    })
}

//! Git clone cache
//!
//! Repositories are shallow-cloned once into `<cache>/<slug>` and reused by
//! every check, across runs. Concurrent checks may race on the same slug:
//! each clone lands in a private staging directory and is renamed into
//! place, and a clone that loses the rename to an existing checkout simply
//! discards itself.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use git2::build::RepoBuilder;
use git2::FetchOptions;
use reqwest::Url;
use thiserror::Error;

use crate::config::Credentials;
use crate::core::models::Repository;

static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Errors while populating the clone cache
#[derive(Debug, Error)]
pub enum CloneError {
    /// The repository has no https clone link
    #[error("no https clone link")]
    NoHttpsLink,

    /// The clone link could not be turned into a fetchable URL
    #[error("invalid clone URL: {0}")]
    InvalidUrl(String),

    /// libgit2 failed
    #[error("{}", .0.message())]
    Git(#[from] git2::Error),

    /// Filesystem error around the cache directory
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking clone task did not complete
    #[error("clone task interrupted: {0}")]
    Interrupted(String),
}

/// On-disk cache of shallow clones keyed by slug
#[derive(Debug, Clone)]
pub struct CloneCache {
    root: PathBuf,
    credentials: Option<Credentials>,
}

impl CloneCache {
    /// Create a cache rooted at `root`
    ///
    /// `credentials` are injected into https clone URLs when present.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, credentials: Option<Credentials>) -> Self {
        Self {
            root: root.into(),
            credentials,
        }
    }

    /// The cache directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where `repo` is (or will be) checked out
    #[must_use]
    pub fn path_for(&self, repo: &Repository) -> PathBuf {
        self.root.join(&repo.slug)
    }

    /// Clone URL for `href` with any embedded user info replaced by the
    /// configured credentials
    ///
    /// Non-http(s) URLs (e.g. `file://`) are returned unchanged.
    pub fn authenticated_url(&self, href: &str) -> Result<String, CloneError> {
        let mut url = Url::parse(href).map_err(|e| CloneError::InvalidUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Ok(url.into());
        }

        let invalid = |_| CloneError::InvalidUrl(format!("cannot set credentials on {href}"));
        url.set_password(None).map_err(invalid)?;
        url.set_username("").map_err(invalid)?;

        if let Some(credentials) = &self.credentials {
            url.set_username(&credentials.username).map_err(invalid)?;
            url.set_password(Some(&credentials.password)).map_err(invalid)?;
        }

        Ok(url.into())
    }

    /// Make sure `repo` is checked out locally and return its path
    pub async fn ensure_cloned(&self, repo: &Repository) -> Result<PathBuf, CloneError> {
        let target = self.path_for(repo);
        if target.exists() {
            return Ok(target);
        }

        let href = repo.clone_link("https").ok_or(CloneError::NoHttpsLink)?;
        let url = self.authenticated_url(href)?;
        let staging = self.root.join(format!(
            ".{}.partial-{}-{}",
            repo.slug,
            std::process::id(),
            STAGING_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        log::debug!("Cloning {} into {}", repo.slug, target.display());
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || {
            fs::create_dir_all(&root)?;
            shallow_clone(&url, &staging, &target)?;
            Ok(target)
        })
        .await
        .map_err(|e| CloneError::Interrupted(e.to_string()))?
    }
}

fn shallow_clone(url: &str, staging: &Path, target: &Path) -> Result<(), CloneError> {
    let mut fetch = FetchOptions::new();
    fetch.depth(1);

    if let Err(err) = RepoBuilder::new().fetch_options(fetch).clone(url, staging) {
        let _ = fs::remove_dir_all(staging);
        return Err(err.into());
    }

    match fs::rename(staging, target) {
        Ok(()) => Ok(()),
        // Another check finished the same clone first
        Err(_) if target.exists() => {
            let _ = fs::remove_dir_all(staging);
            Ok(())
        },
        Err(err) => {
            let _ = fs::remove_dir_all(staging);
            Err(err.into())
        },
    }
}

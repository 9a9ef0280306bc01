//! Shared test fixtures and helpers
//!
//! In-memory stand-ins for the ports, plus a pre-seeded clone cache so
//! checks can run without network access.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use repo_analyzer::adapters::{CloneCache, FileTree, NpmRegistry};
use repo_analyzer::checks::CheckContext;
use repo_analyzer::core::models::{CheckOptions, CheckResult, Payload, Repository, Version};
use repo_analyzer::core::ports::{Check, ListError, Progress, ReportStore, RepositoryLister};
use repo_analyzer::error::{AnalyzerError, Result};

/// A repository with an https clone link
pub fn repo(slug: &str) -> Repository {
    Repository::new(slug, slug, format!("acme/{slug}"))
        .with_clone_link("https", format!("https://bitbucket.org/acme/{slug}.git"))
}

/// Repositories for each slug, in order
pub fn repos(slugs: &[&str]) -> Vec<Repository> {
    slugs.iter().map(|slug| repo(slug)).collect()
}

/// Lister returning a fixed list, or a fixed failure
pub struct StaticLister {
    repositories: Vec<Repository>,
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl StaticLister {
    pub fn new(repositories: Vec<Repository>) -> Self {
        Self {
            repositories,
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            repositories: Vec::new(),
            fail_with: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of listing requests made
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepositoryLister for StaticLister {
    async fn list(&self, _org: &str) -> std::result::Result<Vec<Repository>, ListError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(ListError::Api(message.clone())),
            None => Ok(self.repositories.clone()),
        }
    }
}

/// A report captured in memory
#[derive(Debug, Clone)]
pub struct SavedReport {
    pub check_name: String,
    pub summary: Vec<String>,
    pub results: Vec<String>,
}

/// Report store that keeps reports in memory, or refuses to write
#[derive(Default)]
pub struct MemoryReports {
    saved: Mutex<Vec<SavedReport>>,
    broken: bool,
}

impl MemoryReports {
    pub fn broken() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            broken: true,
        }
    }

    pub fn saved(&self) -> Vec<SavedReport> {
        self.saved.lock().unwrap().clone()
    }
}

impl ReportStore for MemoryReports {
    fn save(&self, check_name: &str, summary: &[String], results: &[CheckResult]) -> Result<PathBuf> {
        let path = PathBuf::from(format!("memory/{check_name}.json"));
        if self.broken {
            return Err(AnalyzerError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        self.saved.lock().unwrap().push(SavedReport {
            check_name: check_name.to_string(),
            summary: summary.to_vec(),
            results: results.iter().map(|r| r.display_form().to_string()).collect(),
        });
        Ok(path)
    }
}

/// Check with per-slug delays that records the peak number of concurrent
/// invocations
///
/// Slugs listed in `silent` produce no result.
pub struct DelayCheck {
    delays_ms: Vec<u64>,
    silent: Vec<String>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl DelayCheck {
    pub fn new(delays_ms: &[u64]) -> Self {
        Self {
            delays_ms: delays_ms.to_vec(),
            silent: Vec::new(),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn silent_for(mut self, slugs: &[&str]) -> Self {
        self.silent = slugs.iter().map(ToString::to_string).collect();
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Check for DelayCheck {
    fn name(&self) -> &'static str {
        "aws-sdk"
    }

    fn description(&self) -> &'static str {
        "instrumented stand-in"
    }

    async fn run(&self, repo: &Repository, _options: CheckOptions) -> Option<CheckResult> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays_ms[call % self.delays_ms.len()];
        tokio::time::sleep(Duration::from_millis(delay)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.silent.contains(&repo.slug) {
            return None;
        }
        let uses_v3 = call % 2 == 0;
        Some(CheckResult::finding(
            &repo.slug,
            Payload::AwsSdk {
                uses_v2: true,
                uses_v3,
            },
            format!("{}: checked", repo.slug),
        ))
    }
}

/// Progress sink recording every tick
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub started: Option<usize>,
    pub ticks: Vec<(usize, usize)>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn start(&mut self, total: usize) {
        self.started = Some(total);
    }

    fn advance(&mut self, completed: usize, total: usize) {
        self.ticks.push((completed, total));
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

/// Clone cache directory with checkouts already in place
pub struct SeededCache {
    dir: TempDir,
}

impl SeededCache {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file into the checkout of `slug`
    pub fn add_file(&self, slug: &str, rel: &str, content: &str) {
        let full_path = self.dir.path().join(slug).join(rel);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Check context over this cache; the npm registry is unreachable
    pub fn context(&self, latest_react: Option<Version>) -> Arc<CheckContext> {
        Arc::new(
            CheckContext::new(
                CloneCache::new(self.dir.path(), None),
                FileTree::default(),
                NpmRegistry::new("http://127.0.0.1:9"),
            )
            .with_latest_react(latest_react),
        )
    }
}

impl Default for SeededCache {
    fn default() -> Self {
        Self::new()
    }
}

//! Check port
//!
//! A check analyzes one repository. Checks run concurrently, one invocation
//! per repository, and must never fail the batch: clone errors, unreadable
//! manifests and the like are reported through the returned result.

use async_trait::async_trait;

use super::super::models::{CheckOptions, CheckResult, Repository};

/// A pluggable per-repository analysis
#[async_trait]
pub trait Check: Send + Sync {
    /// Registry name (e.g., "aws-sdk")
    fn name(&self) -> &'static str;

    /// One-line description shown by `repo-analyzer checks`
    fn description(&self) -> &'static str;

    /// Run the check against one repository
    ///
    /// Returns `None` when there is nothing to report for this repository.
    async fn run(&self, repo: &Repository, options: CheckOptions) -> Option<CheckResult>;
}

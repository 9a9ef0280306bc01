//! Bounded dispatcher - runs a check against many repositories
//!
//! Keeps at most `limit` invocations in flight. Whenever one settles the next
//! pending repository starts immediately, so the pool stays saturated while
//! work remains.
//!
//! A check is expected to report failure in its result. An invocation that
//! panics anyway stops new work from starting; invocations already running
//! are allowed to settle, then the run fails with
//! [`AnalyzerError::CheckFault`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::{JoinError, JoinSet};

use crate::core::models::{CheckOptions, CheckResult, Repository};
use crate::core::ports::{Check, Progress};
use crate::error::{AnalyzerError, Result};

/// Default number of concurrent check invocations
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Runs a check over a repository set with a concurrency cap
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    limit: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl Dispatcher {
    /// Create a dispatcher; a limit of zero is treated as one
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    /// The concurrency cap
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Run `check` against every repository
    ///
    /// Results come back in completion order. Invocations returning `None`
    /// contribute nothing. Progress is advanced exactly once per repository.
    pub async fn dispatch(
        &self,
        repositories: Vec<Repository>,
        check: Arc<dyn Check>,
        options: &CheckOptions,
        progress: &mut dyn Progress,
    ) -> Result<Vec<CheckResult>> {
        let total = repositories.len();
        let mut pending = repositories.into_iter();
        let mut running: JoinSet<Option<CheckResult>> = JoinSet::new();
        let mut slugs = HashMap::new();
        let mut results = Vec::new();
        let mut completed = 0;
        let mut fault: Option<AnalyzerError> = None;

        progress.start(total);

        while running.len() < self.limit {
            let Some(repo) = pending.next() else { break };
            spawn_invocation(&mut running, &mut slugs, repo, &check, options);
        }

        while let Some(joined) = running.join_next_with_id().await {
            completed += 1;
            progress.advance(completed, total);

            match joined {
                Ok((id, outcome)) => {
                    let slug = slugs.remove(&id).unwrap_or_default();
                    log::debug!("Check {} finished on {slug}", check.name());
                    if let Some(result) = outcome {
                        results.push(result);
                    }
                },
                Err(err) => {
                    let slug = slugs.remove(&err.id()).unwrap_or_default();
                    log::error!("Check {} faulted on {slug}: {err}", check.name());
                    fault.get_or_insert_with(|| AnalyzerError::CheckFault {
                        slug,
                        message: fault_message(err),
                    });
                },
            }

            if fault.is_none() {
                if let Some(repo) = pending.next() {
                    spawn_invocation(&mut running, &mut slugs, repo, &check, options);
                }
            }
        }

        progress.finish();

        match fault {
            Some(err) => Err(err),
            None => Ok(results),
        }
    }
}

fn spawn_invocation(
    running: &mut JoinSet<Option<CheckResult>>,
    slugs: &mut HashMap<tokio::task::Id, String>,
    repo: Repository,
    check: &Arc<dyn Check>,
    options: &CheckOptions,
) {
    let check = Arc::clone(check);
    let options = options.clone();
    let slug = repo.slug.clone();
    let handle = running.spawn(async move { check.run(&repo, options).await });
    slugs.insert(handle.id(), slug);
}

fn fault_message(err: JoinError) -> String {
    if err.is_panic() {
        let payload = err.into_panic();
        payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "check panicked".to_string())
    } else {
        err.to_string()
    }
}

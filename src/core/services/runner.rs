//! Run orchestration - list, filter, dispatch, summarize, persist
//!
//! Every failure here is fatal for the run. Failures for a single
//! repository never reach this layer; checks report them in their results.

use std::path::PathBuf;
use std::sync::Arc;

use super::aggregator::SummaryTable;
use super::dispatcher::Dispatcher;
use super::filter::{Selection, apply_allow_list};
use crate::core::models::{CheckOptions, CheckResult, RunSummary};
use crate::core::ports::{Check, Progress, ReportStore, RepositoryLister};
use crate::error::Result;

/// Everything one run needs to know
pub struct RunRequest<'a> {
    /// The check to apply
    pub check: Arc<dyn Check>,
    /// Organization whose repositories are listed
    pub org: &'a str,
    /// Explicit slugs; wins over `options.repos_file`
    pub slugs: Option<&'a [String]>,
    /// Options handed to every invocation
    pub options: CheckOptions,
    /// Concurrency cap
    pub concurrency: usize,
}

impl std::fmt::Debug for RunRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunRequest")
            .field("check", &self.check.name())
            .field("org", &self.org)
            .field("slugs", &self.slugs)
            .field("options", &self.options)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

/// What a finished run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Repositories dispatched after filtering
    pub analyzed: usize,
    /// Collected results, in completion order
    pub results: Vec<CheckResult>,
    /// Check-specific summary lines
    pub summary: RunSummary,
    /// Where the report went; `None` when there was nothing to analyze
    pub report: Option<PathBuf>,
}

/// Drives one check over an organization
pub struct Runner<'a> {
    lister: &'a dyn RepositoryLister,
    reports: &'a dyn ReportStore,
    summaries: SummaryTable,
}

impl std::fmt::Debug for Runner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("summaries", &self.summaries)
            .finish_non_exhaustive()
    }
}

impl<'a> Runner<'a> {
    /// Create a runner with the built-in summaries
    #[must_use]
    pub fn new(lister: &'a dyn RepositoryLister, reports: &'a dyn ReportStore) -> Self {
        Self {
            lister,
            reports,
            summaries: SummaryTable::default(),
        }
    }

    /// Replace the summary table
    #[must_use]
    pub fn with_summaries(mut self, summaries: SummaryTable) -> Self {
        self.summaries = summaries;
        self
    }

    /// Execute a run
    ///
    /// An empty repository set after filtering ends the run early without
    /// writing a report.
    pub async fn run(
        &self,
        request: RunRequest<'_>,
        progress: &mut dyn Progress,
    ) -> Result<RunOutcome> {
        let check_name = request.check.name();
        log::info!(
            "Running \"{check_name}\" check for Bitbucket org \"{}\"",
            request.org
        );

        // A bad repos file fails before the listing is fetched
        let allow = Selection {
            slugs: request.slugs,
            repos_file: request.options.repos_file.as_deref(),
        }
        .allow_list()?;

        let listed = self.lister.list(request.org).await?;
        log::debug!("Listed {} repositories", listed.len());

        let repositories = apply_allow_list(listed, allow.as_ref());

        if repositories.is_empty() {
            log::info!("No repositories found");
            return Ok(RunOutcome::default());
        }

        let analyzed = repositories.len();
        let results = Dispatcher::new(request.concurrency)
            .dispatch(repositories, request.check, &request.options, progress)
            .await?;

        let summary = self.summaries.summarize(check_name, &results);

        let report = match self.reports.save(check_name, &summary, &results) {
            Ok(path) => path,
            Err(err) => {
                log::error!("Failed to write report: {err}");
                let lines = summary
                    .iter()
                    .map(String::as_str)
                    .chain(results.iter().map(CheckResult::display_form));
                for line in lines {
                    log::error!("  {line}");
                }
                return Err(err);
            },
        };

        Ok(RunOutcome {
            analyzed,
            results,
            summary,
            report: Some(report),
        })
    }
}

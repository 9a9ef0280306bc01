//! Run a check across an organization

use std::sync::Arc;

use repo_analyzer::adapters::{BitbucketClient, ReportWriter, TerminalProgress};
use repo_analyzer::checks::{CheckContext, CheckRegistry};
use repo_analyzer::config::{Credentials, Settings};
use repo_analyzer::core::models::CheckOptions;
use repo_analyzer::core::ports::{NoProgress, Progress};
use repo_analyzer::core::services::{RunRequest, Runner};
use repo_analyzer::output::{CheckRunResult, OutputMode};

use crate::cli::app::CheckArgs;

/// Run the named check and report the outcome
pub async fn check(args: CheckArgs, mode: OutputMode) -> anyhow::Result<()> {
    // Nothing runs without credentials, not even name validation
    let credentials = Credentials::from_env()?;
    let settings = Settings::load();

    let ctx = Arc::new(CheckContext::from_settings(&settings, Some(credentials.clone())));
    let registry = CheckRegistry::builtin(&ctx);
    let check = registry.get(&args.name)?;

    let lister = BitbucketClient::new(&settings.api_url, credentials, settings.page_len);
    let writer = ReportWriter::new(args.output_dir.unwrap_or(settings.output_dir));

    let request = RunRequest {
        check,
        org: &args.org,
        slugs: args.repos.as_deref(),
        options: CheckOptions {
            deep_scan: args.deep,
            repos_file: args.repos_file,
            keyword: args.keyword,
        },
        concurrency: args.concurrency.unwrap_or(settings.concurrency),
    };

    // JSON output stays clean of the indicator
    let mut terminal = TerminalProgress::new();
    let mut silent = NoProgress;
    let progress: &mut dyn Progress = match mode {
        OutputMode::Human => &mut terminal,
        OutputMode::Json => &mut silent,
    };

    let outcome = Runner::new(&lister, &writer).run(request, progress).await?;

    CheckRunResult::new(&args.name, &args.org, &outcome).render(mode);
    Ok(())
}

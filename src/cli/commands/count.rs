//! Count an organization's repositories

use repo_analyzer::adapters::BitbucketClient;
use repo_analyzer::config::{Credentials, Settings};
use repo_analyzer::core::ports::RepositoryLister;
use repo_analyzer::output::{CountResult, OutputMode};

/// Print how many repositories `org` has
pub async fn count(org: &str, mode: OutputMode) -> anyhow::Result<()> {
    let credentials = Credentials::from_env()?;
    let settings = Settings::load();

    let lister = BitbucketClient::new(&settings.api_url, credentials, settings.page_len);
    let repositories = lister.list(org).await?;

    CountResult {
        org: org.to_string(),
        total: repositories.len(),
    }
    .render(mode);
    Ok(())
}

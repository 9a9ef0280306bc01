//! Bitbucket Cloud repository lister
//!
//! Implements `RepositoryLister` against the Bitbucket REST API, following
//! `next` links until the listing is exhausted.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Credentials;
use crate::core::models::Repository;
use crate::core::ports::{ListError, RepositoryLister};

/// One page of `GET /repositories/{workspace}`
#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    values: Vec<ApiRepository>,
    next: Option<String>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiRepository {
    name: String,
    slug: String,
    full_name: String,
    #[serde(default)]
    links: ApiLinks,
}

#[derive(Debug, Default, Deserialize)]
struct ApiLinks {
    #[serde(default)]
    clone: Vec<ApiCloneLink>,
}

#[derive(Debug, Deserialize)]
struct ApiCloneLink {
    name: String,
    href: String,
}

impl From<ApiRepository> for Repository {
    fn from(api: ApiRepository) -> Self {
        api.links.clone.into_iter().fold(
            Self::new(api.name, api.slug, api.full_name),
            |repo, link| repo.with_clone_link(link.name, link.href),
        )
    }
}

/// Paginated Bitbucket API client
#[derive(Debug, Clone)]
pub struct BitbucketClient {
    http: reqwest::Client,
    api_url: String,
    credentials: Credentials,
    page_len: u32,
}

impl BitbucketClient {
    /// Create a client for `api_url` (e.g., `https://api.bitbucket.org/2.0`)
    #[must_use]
    pub fn new(api_url: impl Into<String>, credentials: Credentials, page_len: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            credentials,
            page_len: page_len.max(1),
        }
    }

    /// URL of the first listing page for `org`
    #[must_use]
    pub fn first_page_url(&self, org: &str) -> String {
        format!("{}/repositories/{org}?pagelen={}", self.api_url, self.page_len)
    }

    async fn fetch_page(&self, url: &str) -> Result<Page, ListError> {
        let response = self
            .http
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await
            .map_err(|e| ListError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ListError::Transport(e.to_string()))?;

        parse_page(status.as_u16(), &body)
    }
}

/// Decode one listing page, turning API error bodies into errors
fn parse_page(status: u16, body: &str) -> Result<Page, ListError> {
    let page: Option<Page> = serde_json::from_str(body).ok();

    match page {
        Some(Page {
            error: Some(error), ..
        }) => Err(ListError::Api(error.message)),
        Some(page) if (200..300).contains(&status) => Ok(page),
        _ if !(200..300).contains(&status) => Err(ListError::Api(format!("HTTP {status}"))),
        _ => Err(ListError::Decode(format!(
            "unexpected listing body: {}",
            body.chars().take(120).collect::<String>()
        ))),
    }
}

#[async_trait]
impl RepositoryLister for BitbucketClient {
    async fn list(&self, org: &str) -> Result<Vec<Repository>, ListError> {
        let mut repos = Vec::new();
        let mut next = Some(self.first_page_url(org));
        let mut page_number = 1;

        while let Some(url) = next {
            log::debug!("Fetching repository page {page_number} for {org}");
            let page = self.fetch_page(&url).await?;
            repos.extend(page.values.into_iter().map(Repository::from));
            next = page.next;
            page_number += 1;
        }

        log::debug!("Listed {} repositories for {org}", repos.len());
        Ok(repos)
    }
}

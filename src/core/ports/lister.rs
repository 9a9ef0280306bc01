//! Repository lister port
//!
//! Defines the interface for fetching the repositories of an organization.

use async_trait::async_trait;
use thiserror::Error;

use super::super::models::Repository;
use crate::error::AnalyzerError;

/// Errors from a repository listing service
#[derive(Debug, Error)]
pub enum ListError {
    /// The request could not be sent or the connection failed
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with an error
    #[error("API error: {0}")]
    Api(String),

    /// The response body could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<ListError> for AnalyzerError {
    fn from(err: ListError) -> Self {
        Self::RemoteService(err.to_string())
    }
}

/// Source of repositories for an organization
///
/// Implementations fetch every page before returning; a partial listing is
/// reported as an error, never returned.
#[async_trait]
pub trait RepositoryLister: Send + Sync {
    /// List all repositories of `org`
    async fn list(&self, org: &str) -> Result<Vec<Repository>, ListError>;
}

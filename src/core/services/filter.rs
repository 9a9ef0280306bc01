//! Filter stage - narrows the repository list to an allow-list
//!
//! An explicit slug list wins over a repos file. Without either, every
//! repository passes. Input order is preserved.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::core::models::Repository;
use crate::error::{AnalyzerError, Result};

/// Which repositories a run should cover
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection<'a> {
    /// Explicit slugs (`--repos=a,b`)
    pub slugs: Option<&'a [String]>,
    /// Line-delimited allow-list file (`--reposFile=path`)
    pub repos_file: Option<&'a Path>,
}

/// Parse a line-delimited allow-list: one slug per line, trimmed, blanks dropped
#[must_use]
pub fn parse_allow_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Read an allow-list file
pub fn load_allow_list(path: &Path) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        AnalyzerError::config(format!("cannot read repos file {}: {e}", path.display()))
    })?;
    Ok(parse_allow_list(&content))
}

impl Selection<'_> {
    /// Resolve to a slug allow-list, reading the repos file if one is named
    ///
    /// `None` means every repository passes.
    pub fn allow_list(self) -> Result<Option<HashSet<String>>> {
        match (self.slugs, self.repos_file) {
            (Some(slugs), _) => Ok(Some(slugs.iter().map(|s| s.trim().to_string()).collect())),
            (None, Some(path)) => load_allow_list(path).map(Some),
            (None, None) => Ok(None),
        }
    }
}

/// Apply a selection to a repository list
pub fn filter_repositories(
    repositories: Vec<Repository>,
    selection: Selection<'_>,
) -> Result<Vec<Repository>> {
    Ok(apply_allow_list(repositories, selection.allow_list()?.as_ref()))
}

/// Keep the repositories whose slug is allowed
///
/// Repositories with an empty or duplicate slug are dropped so every
/// repository handed to the dispatcher has a unique, non-empty slug.
#[must_use]
pub fn apply_allow_list(
    repositories: Vec<Repository>,
    allow: Option<&HashSet<String>>,
) -> Vec<Repository> {
    let mut seen = HashSet::new();
    let filtered: Vec<Repository> = repositories
        .into_iter()
        .filter(|repo| {
            if repo.slug.is_empty() {
                log::warn!("Skipping repository {:?} with an empty slug", repo.full_name);
                return false;
            }
            allow.is_none_or(|allowed| allowed.contains(&repo.slug))
        })
        .filter(|repo| {
            let first = seen.insert(repo.slug.clone());
            if !first {
                log::warn!("Skipping duplicate repository slug {}", repo.slug);
            }
            first
        })
        .collect();

    if allow.is_some() {
        log::info!("Filtering to {} specific repos", filtered.len());
    }

    filtered
}

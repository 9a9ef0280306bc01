//! Keyword search check
//!
//! Case-insensitive substring search over text and source files. Build
//! output and dependency directories are skipped.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::context::{CheckContext, scan_blocking};
use crate::adapters::FileTree;
use crate::core::models::{CheckOptions, CheckResult, Payload, Repository};
use crate::core::ports::Check;

/// Directories never searched
pub const EXCLUDES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    "coverage",
    ".turbo",
];

/// File extensions searched (compared case-insensitively)
pub const EXTENSIONS: &[&str] = &[
    "js", "ts", "jsx", "tsx", "json", "md", "txt", "env", "yml", "yaml", "html", "css", "scss",
];

/// Whether a file name carries a searchable extension
///
/// Dotfiles count too, so `.env` is searched.
#[must_use]
pub fn is_searchable(file_name: &str) -> bool {
    file_name.rsplit_once('.').is_some_and(|(_, ext)| {
        EXTENSIONS
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    })
}

/// Relative paths of searchable files containing `keyword` (already lowercased)
///
/// Files that are not valid UTF-8 or cannot be read are skipped.
#[must_use]
pub fn search(root: &Path, keyword: &str, files: &FileTree) -> Vec<String> {
    files
        .walk(root)
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_searchable)
        })
        .filter(|path| match fs::read_to_string(path) {
            Ok(content) => content.to_lowercase().contains(keyword),
            Err(err) => {
                log::debug!("Skipping {}: {err}", path.display());
                false
            },
        })
        .map(|path| {
            path.strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

fn inspect(slug: &str, root: &Path, keyword: String, files: &FileTree) -> CheckResult {
    let matches = search(root, &keyword, files);
    if matches.is_empty() {
        return CheckResult::message(format!("{slug}: no matches for \"{keyword}\""));
    }

    let raw = format!(
        "{slug}: found {} match(es) for \"{keyword}\": {}",
        matches.len(),
        matches.join(", ")
    );
    CheckResult::finding(slug, Payload::Keyword { keyword, matches }, raw)
}

/// Finds files mentioning a keyword
#[derive(Debug)]
pub struct KeywordCheck {
    ctx: Arc<CheckContext>,
    files: FileTree,
}

impl KeywordCheck {
    /// Create the check
    #[must_use]
    pub fn new(ctx: Arc<CheckContext>) -> Self {
        Self {
            ctx,
            files: FileTree::new(EXCLUDES),
        }
    }
}

#[async_trait]
impl Check for KeywordCheck {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn description(&self) -> &'static str {
        "Find text and source files containing --keyword (case-insensitive)"
    }

    async fn run(&self, repo: &Repository, options: CheckOptions) -> Option<CheckResult> {
        let Some(keyword) = options.keyword().map(str::to_lowercase) else {
            return Some(CheckResult::message("No keyword provided for check"));
        };

        let root = match self.ctx.checkout(repo).await {
            Ok(root) => root,
            Err(message) => return Some(message),
        };

        let slug = repo.slug.clone();
        let files = self.files.clone();
        Some(scan_blocking(&repo.slug, move || inspect(&slug, &root, keyword, &files)).await)
    }
}

//! Secret scanning check
//!
//! Flags files whose name is commonly a credential store and files whose
//! content matches a known secret shape. One hit at most per file.

use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use super::context::{CheckContext, scan_blocking};
use crate::adapters::FileTree;
use crate::core::models::{CheckOptions, CheckResult, Payload, Repository};
use crate::core::ports::Check;

/// File names that are sensitive regardless of content
pub const RISKY_FILE_NAMES: &[&str] = &[".env", ".env.local", ".env.production", ".pem", "id_rsa"];

/// Files larger than this are not read
pub const MAX_SCAN_BYTES: u64 = 1024 * 1024;

const PATTERN_SOURCES: &[(&str, &str)] = &[
    ("API key assignment", r"(?i)API[_-]?KEY\s*="),
    ("secret assignment", r"(?i)SECRET\s*="),
    ("bearer token", r"(?i)Bearer\s+[a-z0-9\-_.]+"),
    ("private key header", r"-----BEGIN (RSA|PRIVATE|API) KEY-----"),
];

static PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    PATTERN_SOURCES
        .iter()
        .filter_map(|(label, source)| Regex::new(source).ok().map(|re| (*label, re)))
        .collect()
});

/// Whether a file name alone marks the file as sensitive
#[must_use]
pub fn is_risky_name(file_name: &str) -> bool {
    RISKY_FILE_NAMES.contains(&file_name)
        || Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pem"))
}

/// Label of the first secret pattern found in `content`
#[must_use]
pub fn first_pattern(content: &str) -> Option<&'static str> {
    PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(content))
        .map(|(label, _)| *label)
}

fn read_small(path: &Path) -> Option<String> {
    let len = fs::metadata(path).ok()?.len();
    if len > MAX_SCAN_BYTES {
        log::debug!("Skipping {} ({len} bytes)", path.display());
        return None;
    }
    // Binary files fail UTF-8 decoding and are skipped
    fs::read_to_string(path).ok()
}

/// One description per suspicious file under `root`
#[must_use]
pub fn scan(root: &Path, files: &FileTree) -> Vec<String> {
    let mut hits = Vec::new();

    for path in files.walk(root) {
        let rel = path.strip_prefix(root).unwrap_or(&path).to_string_lossy().into_owned();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

        if is_risky_name(name) {
            hits.push(format!("Sensitive file: {rel}"));
            continue;
        }

        if let Some(label) = read_small(&path).as_deref().and_then(first_pattern) {
            hits.push(format!("{rel} matches {label}"));
        }
    }

    hits
}

fn inspect(slug: &str, root: &Path, files: &FileTree) -> CheckResult {
    let hits = scan(root, files);
    if hits.is_empty() {
        return CheckResult::message(format!("{slug}: no secrets found"));
    }

    let raw = format!(
        "{slug}: potential secrets found in {} file(s): {}",
        hits.len(),
        hits.join("; ")
    );
    CheckResult::finding(slug, Payload::Secrets { hits }, raw)
}

/// Flags likely committed credentials
#[derive(Debug)]
pub struct SecretsCheck {
    ctx: Arc<CheckContext>,
}

impl SecretsCheck {
    /// Create the check
    #[must_use]
    pub const fn new(ctx: Arc<CheckContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Check for SecretsCheck {
    fn name(&self) -> &'static str {
        "secrets"
    }

    fn description(&self) -> &'static str {
        "Flag sensitive file names and secret-shaped content"
    }

    async fn run(&self, repo: &Repository, _options: CheckOptions) -> Option<CheckResult> {
        let root = match self.ctx.checkout(repo).await {
            Ok(root) => root,
            Err(message) => return Some(message),
        };

        let slug = repo.slug.clone();
        let files = self.ctx.files.clone();
        Some(scan_blocking(&repo.slug, move || inspect(&slug, &root, &files)).await)
    }
}

//! AWS SDK usage check
//!
//! Reports whether a repository's `package.json` declares the v2 SDK
//! (`aws-sdk`), v3 modular packages (`@aws-sdk/*`), both, or neither.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::context::{CheckContext, scan_blocking};
use super::manifest::{self, PackageManifest};
use crate::adapters::FileTree;
use crate::core::models::{CheckOptions, CheckResult, Payload, Repository};
use crate::core::ports::Check;

/// Conventional manifest locations, in lookup order
const CANDIDATES: &[&str] = &[
    "package.json",
    "lambda/package.json",
    "backend/package.json",
    "functions/package.json",
];

/// Detects AWS SDK v2 / v3 dependencies
#[derive(Debug)]
pub struct AwsSdkCheck {
    ctx: Arc<CheckContext>,
}

impl AwsSdkCheck {
    /// Create the check
    #[must_use]
    pub const fn new(ctx: Arc<CheckContext>) -> Self {
        Self { ctx }
    }
}

/// `(uses_v2, uses_v3)` for a manifest
#[must_use]
pub fn classify(manifest: &PackageManifest) -> (bool, bool) {
    let deps = manifest.all_dependencies();
    let uses_v2 = deps.contains_key("aws-sdk");
    let uses_v3 = deps.keys().any(|name| name.starts_with("@aws-sdk/"));
    (uses_v2, uses_v3)
}

/// Canonical rendering of an AWS SDK finding
#[must_use]
pub fn render(slug: &str, uses_v2: bool, uses_v3: bool) -> String {
    let badges: Vec<&str> = [(uses_v2, "AWS SDK v2"), (uses_v3, "AWS SDK v3")]
        .into_iter()
        .filter_map(|(used, label)| used.then_some(label))
        .collect();

    if badges.is_empty() {
        format!("{slug}: not using AWS SDK")
    } else {
        format!("{slug}: {}", badges.join(" | "))
    }
}

fn inspect(slug: &str, root: &Path, deep: bool, files: &FileTree) -> CheckResult {
    let Some(path) = manifest::locate(root, deep, CANDIDATES, files) else {
        return CheckResult::message(format!("{slug} has no package.json"));
    };

    let manifest = match PackageManifest::read(&path) {
        Ok(manifest) => manifest,
        Err(err) => return CheckResult::message(format!("{slug} has a broken package.json: {err}")),
    };

    let (uses_v2, uses_v3) = classify(&manifest);
    CheckResult::finding(
        slug,
        Payload::AwsSdk { uses_v2, uses_v3 },
        render(slug, uses_v2, uses_v3),
    )
}

#[async_trait]
impl Check for AwsSdkCheck {
    fn name(&self) -> &'static str {
        "aws-sdk"
    }

    fn description(&self) -> &'static str {
        "Detect AWS SDK v2 and v3 dependencies in package.json"
    }

    async fn run(&self, repo: &Repository, options: CheckOptions) -> Option<CheckResult> {
        let root = match self.ctx.checkout(repo).await {
            Ok(root) => root,
            Err(message) => return Some(message),
        };

        let slug = repo.slug.clone();
        let files = self.ctx.files.clone();
        Some(scan_blocking(&repo.slug, move || inspect(&slug, &root, options.deep_scan, &files)).await)
    }
}

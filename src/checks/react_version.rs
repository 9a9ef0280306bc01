//! React version check
//!
//! Reads the declared `react` range, compares its lowest version with the
//! latest release on npm and classifies its support tier by major version.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::context::{CheckContext, scan_blocking};
use super::manifest::{self, PACKAGE_JSON, PackageManifest};
use crate::adapters::FileTree;
use crate::core::models::{CheckOptions, CheckResult, Payload, Repository, SupportTier, Version};
use crate::core::ports::Check;

/// Support tier of a React range, by the major of its lowest version
#[must_use]
pub fn support_tier(range: &str) -> SupportTier {
    match Version::min_of_range(range).map(|v| v.major) {
        Some(18..) => SupportTier::Active,
        Some(17) => SupportTier::Deprecated,
        Some(16) => SupportTier::Legacy,
        Some(_) => SupportTier::Unsupported,
        None => SupportTier::Unknown,
    }
}

/// React-related dependencies found in a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Declared {
    react: Option<String>,
    react_dom: Option<String>,
    react_native: Option<String>,
}

impl Declared {
    fn from_manifest(manifest: &PackageManifest) -> Self {
        Self {
            react: manifest.version_of("react").map(String::from),
            react_dom: manifest.version_of("react-dom").map(String::from),
            react_native: manifest.version_of("react-native").map(String::from),
        }
    }

    const fn uses_react(&self) -> bool {
        self.react.is_some() || self.react_dom.is_some() || self.react_native.is_some()
    }
}

fn read_declared(
    slug: &str,
    root: &Path,
    deep: bool,
    files: &FileTree,
) -> Result<Declared, CheckResult> {
    let Some(path) = manifest::locate(root, deep, &[PACKAGE_JSON], files) else {
        return Err(CheckResult::message(format!("{slug} has no package.json")));
    };

    let manifest = PackageManifest::read(&path)
        .map_err(|err| CheckResult::message(format!("{slug} has a broken package.json: {err}")))?;

    let declared = Declared::from_manifest(&manifest);
    if declared.uses_react() {
        Ok(declared)
    } else {
        Err(CheckResult::message(format!("{slug} is not using React")))
    }
}

fn build_result(slug: &str, declared: &Declared, latest: Option<Version>) -> CheckResult {
    let mut labels = Vec::new();
    let mut outdated = false;
    let mut support = SupportTier::Unknown;

    if let Some(range) = &declared.react {
        labels.push(format!("react: {range}"));
        if let (Some(latest), Some(current)) = (latest, Version::min_of_range(range)) {
            outdated = current < latest;
            support = support_tier(range);
            if outdated {
                labels.push(format!("outdated (latest is {latest})"));
            }
            labels.push(format!("support: {support}"));
        }
    }
    if let Some(range) = &declared.react_dom {
        labels.push(format!("react-dom: {range}"));
    }
    if let Some(range) = &declared.react_native {
        labels.push(format!("react-native: {range}"));
    }

    CheckResult::finding(
        slug,
        Payload::React {
            version: declared.react.clone(),
            outdated,
            support,
        },
        format!("{slug}: {}", labels.join(" | ")),
    )
}

/// Reports React versions, staleness and support tier
#[derive(Debug)]
pub struct ReactVersionCheck {
    ctx: Arc<CheckContext>,
}

impl ReactVersionCheck {
    /// Create the check
    #[must_use]
    pub const fn new(ctx: Arc<CheckContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Check for ReactVersionCheck {
    fn name(&self) -> &'static str {
        "react-version"
    }

    fn description(&self) -> &'static str {
        "Report React versions, whether they trail the latest release, and support status"
    }

    async fn run(&self, repo: &Repository, options: CheckOptions) -> Option<CheckResult> {
        let root = match self.ctx.checkout(repo).await {
            Ok(root) => root,
            Err(message) => return Some(message),
        };

        // Fetched once per run and shared by every repository
        let latest = self.ctx.latest_react().await;
        let slug = repo.slug.clone();
        let files = self.ctx.files.clone();
        let deep = options.deep_scan;
        Some(
            scan_blocking(&repo.slug, move || match read_declared(&slug, &root, deep, &files) {
                Ok(declared) => build_result(&slug, &declared, latest),
                Err(message) => message,
            })
            .await,
        )
    }
}

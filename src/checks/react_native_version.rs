//! React Native version check

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::context::{CheckContext, scan_blocking};
use super::manifest::{PACKAGE_JSON, PackageManifest};
use crate::adapters::FileTree;
use crate::core::models::{CheckOptions, CheckResult, Payload, Repository, SupportTier, Version};
use crate::core::ports::Check;

const PACKAGE: &str = "react-native";

/// Support tier of a React Native range
///
/// React Native still ships `0.x` releases, so the minor version carries
/// the support window.
#[must_use]
pub fn support_tier(range: &str) -> SupportTier {
    match Version::min_of_range(range) {
        Some(Version { major: 0, minor, .. }) if minor < 70 => SupportTier::Legacy,
        Some(Version { major: 0, minor, .. }) if minor < 72 => SupportTier::Deprecated,
        Some(_) => SupportTier::Active,
        None => SupportTier::Unknown,
    }
}

/// First manifest, shallowest first, that declares `react-native`
fn find_declared(root: &Path, files: &FileTree) -> Option<String> {
    files
        .find_all(root, PACKAGE_JSON)
        .iter()
        .filter_map(|path| match PackageManifest::read(path) {
            Ok(manifest) => Some(manifest),
            Err(err) => {
                log::debug!("Skipping {}: {err}", path.display());
                None
            },
        })
        .find_map(|manifest| manifest.version_of(PACKAGE).map(String::from))
}

fn inspect(slug: &str, root: &Path, files: &FileTree) -> CheckResult {
    let Some(version) = find_declared(root, files) else {
        return CheckResult::message(format!("{slug} is not using React Native"));
    };

    let support = support_tier(&version);
    let raw = format!("{slug}: react-native: {version} | support: {support}");
    CheckResult::finding(slug, Payload::ReactNative { version, support }, raw)
}

/// Reports the React Native version and its support tier
#[derive(Debug)]
pub struct ReactNativeVersionCheck {
    ctx: Arc<CheckContext>,
}

impl ReactNativeVersionCheck {
    /// Create the check
    #[must_use]
    pub const fn new(ctx: Arc<CheckContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Check for ReactNativeVersionCheck {
    fn name(&self) -> &'static str {
        "react-native-version"
    }

    fn description(&self) -> &'static str {
        "Report the React Native version and its support status"
    }

    // Monorepos nest apps, so every manifest is searched regardless of deep scan
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

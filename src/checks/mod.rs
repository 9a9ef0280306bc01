//! Built-in checks and the registry that names them
//!
//! Each check is an independent [`Check`] implementation. Checks share a
//! [`CheckContext`] for cloning, walking and registry lookups.

mod aws_sdk;
mod context;
mod keyword;
mod manifest;
mod react_native_version;
mod react_version;
mod secrets;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use aws_sdk::AwsSdkCheck;
pub use context::{CheckContext, scan_blocking};
pub use keyword::KeywordCheck;
pub use manifest::{ManifestError, PackageManifest};
pub use react_native_version::ReactNativeVersionCheck;
pub use react_version::ReactVersionCheck;
pub use secrets::SecretsCheck;

use crate::core::ports::Check;
use crate::error::{AnalyzerError, Result};

/// Checks by name
#[derive(Default)]
pub struct CheckRegistry {
    checks: BTreeMap<&'static str, Arc<dyn Check>>,
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("checks", &self.names())
            .finish()
    }
}

impl CheckRegistry {
    /// Registry with every built-in check sharing `ctx`
    #[must_use]
    pub fn builtin(ctx: &Arc<CheckContext>) -> Self {
        let mut registry = Self::default();
        registry.register(Arc::new(AwsSdkCheck::new(Arc::clone(ctx))));
        registry.register(Arc::new(ReactVersionCheck::new(Arc::clone(ctx))));
        registry.register(Arc::new(ReactNativeVersionCheck::new(Arc::clone(ctx))));
        registry.register(Arc::new(KeywordCheck::new(Arc::clone(ctx))));
        registry.register(Arc::new(SecretsCheck::new(Arc::clone(ctx))));
        registry
    }

    /// Add a check, replacing any check with the same name
    pub fn register(&mut self, check: Arc<dyn Check>) {
        self.checks.insert(check.name(), check);
    }

    /// Look up a check by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn Check>> {
        self.checks
            .get(name)
            .cloned()
            .ok_or_else(|| AnalyzerError::UnknownCheck {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.checks.keys().copied().collect()
    }

    /// Registered checks, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Check>> {
        self.checks.values()
    }
}

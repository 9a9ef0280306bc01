//! `package.json` reading shared by the dependency checks

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::adapters::FileTree;

/// Manifest file name
pub const PACKAGE_JSON: &str = "package.json";

/// Errors reading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The file could not be read
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON of the expected shape
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// The dependency sections of a `package.json`
#[derive(Debug, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, Value>,
}

impl PackageManifest {
    /// Parse manifest JSON
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse a manifest file
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Runtime and dev dependencies merged; dev entries win on conflict
    ///
    /// Entries whose spec is not a string are skipped.
    #[must_use]
    pub fn all_dependencies(&self) -> BTreeMap<&str, &str> {
        self.dependencies
            .iter()
            .chain(&self.dev_dependencies)
            .filter_map(|(name, spec)| spec.as_str().map(|s| (name.as_str(), s)))
            .collect()
    }

    /// Declared version range of `name`, from either section
    #[must_use]
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.dev_dependencies
            .get(name)
            .or_else(|| self.dependencies.get(name))
            .and_then(Value::as_str)
    }
}

/// Locate the manifest to inspect
///
/// A deep scan takes the shallowest `package.json` anywhere in the tree;
/// otherwise the first existing path among `candidates` (relative to `root`).
#[must_use]
pub fn locate(root: &Path, deep: bool, candidates: &[&str], files: &FileTree) -> Option<PathBuf> {
    if deep {
        files.find_first(root, PACKAGE_JSON)
    } else {
        candidates.iter().map(|c| root.join(c)).find(|p| p.is_file())
    }
}

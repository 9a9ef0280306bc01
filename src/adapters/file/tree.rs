//! File tree walking shared by the checks

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Directories skipped by every walk unless a caller overrides them
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git"];

/// Recursive file listing with excluded directory names
#[derive(Debug, Clone)]
pub struct FileTree {
    exclude_dirs: Vec<String>,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDES)
    }
}

impl FileTree {
    /// Create a walker that never descends into the named directories
    #[must_use]
    pub fn new(exclude_dirs: &[&str]) -> Self {
        Self {
            exclude_dirs: exclude_dirs.iter().map(ToString::to_string).collect(),
        }
    }

    /// All regular files under `root`, sorted
    ///
    /// Unreadable entries are skipped.
    #[must_use]
    pub fn walk(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| {
                // Don't filter the root directory itself
                if entry.path() == root || !entry.file_type().is_dir() {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !self.exclude_dirs.iter().any(|ex| ex == name))
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::debug!("Skipping unreadable entry: {err}");
                    None
                },
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .collect();

        // Sort for deterministic output
        files.sort();
        files
    }

    /// The shallowest file under `root` named `file_name`, ties broken by path
    #[must_use]
    pub fn find_first(&self, root: &Path, file_name: &str) -> Option<PathBuf> {
        self.walk(root)
            .into_iter()
            .filter(|p| p.file_name().is_some_and(|n| n == file_name))
            .min_by(|a, b| {
                a.components()
                    .count()
                    .cmp(&b.components().count())
                    .then_with(|| a.cmp(b))
            })
    }

    /// Every file under `root` named `file_name`, shallowest first
    #[must_use]
    pub fn find_all(&self, root: &Path, file_name: &str) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = self
            .walk(root)
            .into_iter()
            .filter(|p| p.file_name().is_some_and(|n| n == file_name))
            .collect();
        found.sort_by_key(|p| p.components().count());
        found
    }
}

//! Options passed to every check invocation

use std::path::PathBuf;

/// Configuration bag handed to each check by value
///
/// Checks read only the options they understand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Search the whole repository tree instead of conventional paths
    pub deep_scan: bool,
    /// Line-delimited slug allow-list
    pub repos_file: Option<PathBuf>,
    /// Search term for the keyword check
    pub keyword: Option<String>,
}

impl CheckOptions {
    /// The keyword, if one was given and is not blank
    #[must_use]
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

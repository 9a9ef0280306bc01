//! Run-level error taxonomy
//!
//! Every variant here is fatal for a run. Per-repository failures are never
//! errors: checks encode them inside their [`CheckResult`](crate::core::models::CheckResult).

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort a run
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Bad or missing configuration (filter file, credentials, arguments)
    #[error("configuration error: {0}")]
    Config(String),

    /// The requested check is not registered
    #[error("unknown check: {name} (available: {available})")]
    UnknownCheck {
        /// The requested check name
        name: String,
        /// Comma-separated registered names
        available: String,
    },

    /// The repository listing service failed
    #[error("remote service error: {0}")]
    RemoteService(String),

    /// Reading or writing a local file failed
    #[error("io error at {}: {source}", path.display())]
    Io {
        /// The path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A check invocation panicked instead of reporting failure in its result
    #[error("check faulted on {slug}: {message}")]
    CheckFault {
        /// Slug of the repository being checked
        slug: String,
        /// Panic payload or join error text
        message: String,
    },
}

impl AnalyzerError {
    /// Build a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Build an I/O error for a path
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for run-level results
pub type Result<T> = std::result::Result<T, AnalyzerError>;

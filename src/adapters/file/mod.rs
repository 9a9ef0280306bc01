//! Local filesystem adapters
//!
//! - [`tree`] - Recursive file listing shared by the checks
//! - [`report`] - Timestamped JSON report persistence

pub mod report;
pub mod tree;

pub use report::{Report, ReportWriter, file_timestamp};
pub use tree::{DEFAULT_EXCLUDES, FileTree};

//! Report persistence port

use std::path::PathBuf;

use super::super::models::CheckResult;
use crate::error::Result;

/// Destination for the artifact of a finished run
pub trait ReportStore: Send + Sync {
    /// Persist a run's summary and results, returning where they went
    fn save(&self, check_name: &str, summary: &[String], results: &[CheckResult]) -> Result<PathBuf>;
}

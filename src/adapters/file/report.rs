//! Report writer
//!
//! Persists `{summary, results}` as pretty JSON under the output directory,
//! named `<check>-results-<timestamp>.json`. The timestamp is UTC ISO-8601
//! with millisecond precision, with ':' and '.' replaced by '-'.
//!
//! Two runs of the same check within the same millisecond get the same path;
//! the later write replaces the earlier one.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::CheckResult;
use crate::core::ports::ReportStore;
use crate::error::{AnalyzerError, Result};

/// Persisted run artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Summary lines
    pub summary: Vec<String>,
    /// Display form of every collected result
    pub results: Vec<String>,
}

impl Report {
    /// Build a report from a summary and raw results
    #[must_use]
    pub fn new(summary: &[String], results: &[CheckResult]) -> Self {
        Self {
            summary: summary.to_vec(),
            results: results.iter().map(|r| r.display_form().to_string()).collect(),
        }
    }
}

/// Filesystem-safe form of a UTC timestamp
#[must_use]
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true).replace([':', '.'], "-")
}

/// Writes reports into a directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer for `output_dir` (created on first write)
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The directory reports are written to
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the report for `check_name` written at `at`
    #[must_use]
    pub fn report_path(&self, check_name: &str, at: DateTime<Utc>) -> PathBuf {
        self.output_dir
            .join(format!("{check_name}-results-{}.json", file_timestamp(at)))
    }

    /// Write a report stamped with the current time
    pub fn write(
        &self,
        check_name: &str,
        summary: &[String],
        results: &[CheckResult],
    ) -> Result<PathBuf> {
        self.write_at(check_name, summary, results, Utc::now())
    }

    /// Write a report stamped with `at`
    pub fn write_at(
        &self,
        check_name: &str,
        summary: &[String],
        results: &[CheckResult],
        at: DateTime<Utc>,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| AnalyzerError::io(&self.output_dir, e))?;

        let path = self.report_path(check_name, at);
        let content = serde_json::to_string_pretty(&Report::new(summary, results))
            .map_err(|e| AnalyzerError::io(&path, std::io::Error::other(e)))?;
        fs::write(&path, content).map_err(|e| AnalyzerError::io(&path, e))?;

        log::debug!("Wrote report {}", path.display());
        Ok(path)
    }
}

impl ReportStore for ReportWriter {
    fn save(&self, check_name: &str, summary: &[String], results: &[CheckResult]) -> Result<PathBuf> {
        self.write(check_name, summary, results)
    }
}

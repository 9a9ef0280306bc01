//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use serde::Serialize;

use crate::core::services::RunOutcome;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a `check` run
#[derive(Debug, Serialize)]
pub struct CheckRunResult {
    /// Check that was run
    pub check: String,
    /// Organization analyzed
    pub org: String,
    /// Repositories dispatched
    pub analyzed: usize,
    /// Summary lines
    pub summary: Vec<String>,
    /// Display form of every collected result
    pub results: Vec<String>,
    /// Report path, absent when nothing was analyzed
    pub report: Option<String>,
}

impl CheckRunResult {
    /// Build from a finished run
    #[must_use]
    pub fn new(check: &str, org: &str, outcome: &RunOutcome) -> Self {
        Self {
            check: check.to_string(),
            org: org.to_string(),
            analyzed: outcome.analyzed,
            summary: outcome.summary.clone(),
            results: outcome
                .results
                .iter()
                .map(|r| r.display_form().to_string())
                .collect(),
            report: outcome
                .report
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let Some(report) = &self.report else {
            println!("No repositories found.");
            return;
        };

        println!("\nSummary:");
        for line in &self.summary {
            println!("  {line}");
        }
        println!("\nDone! {} repositories analyzed.", self.analyzed);
        println!("Results saved to {report}");
    }
}

/// Result of a `count` command
#[derive(Debug, Serialize)]
pub struct CountResult {
    /// Organization counted
    pub org: String,
    /// Number of repositories
    pub total: usize,
}

impl CountResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("Total repositories in \"{}\": {}", self.org, self.total);
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// A registered check
#[derive(Debug, Serialize)]
pub struct CheckInfo {
    /// Registry name
    pub name: String,
    /// One-line description
    pub description: String,
}

/// Result of a `checks` command
#[derive(Debug, Serialize)]
pub struct CheckListResult {
    /// Registered checks, sorted by name
    pub checks: Vec<CheckInfo>,
}

impl CheckListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                let width = self.checks.iter().map(|c| c.name.len()).max().unwrap_or(0);
                println!("Available checks:");
                for check in &self.checks {
                    println!("  {:width$}  {}", check.name, check.description);
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

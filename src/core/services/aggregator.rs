//! Result aggregator - per-check summaries
//!
//! A table keyed by check name maps to pure summary functions. Each function
//! reads only the payloads it understands; anything else (messages, payloads
//! of another check) lands in an "other" bucket. Classification within a
//! check is first-match-wins down a fixed priority list.

use std::collections::BTreeMap;

use crate::core::models::{CheckResult, Payload, RunSummary, SupportTier};

/// A summary function: results in, summary lines out
pub type SummaryFn = fn(&[CheckResult]) -> RunSummary;

/// Summary functions keyed by check name
#[derive(Debug, Clone)]
pub struct SummaryTable {
    entries: BTreeMap<&'static str, SummaryFn>,
}

impl Default for SummaryTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register("aws-sdk", summarize_aws_sdk);
        table.register("react-version", summarize_react);
        table.register("react-native-version", summarize_react_native);
        table.register("keyword", summarize_keyword);
        table.register("secrets", summarize_secrets);
        table
    }
}

impl SummaryTable {
    /// A table with no entries; every check gets the generic summary
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register (or replace) the summary function for a check
    pub fn register(&mut self, check_name: &'static str, summary: SummaryFn) {
        self.entries.insert(check_name, summary);
    }

    /// Summarize the results of one run
    #[must_use]
    pub fn summarize(&self, check_name: &str, results: &[CheckResult]) -> RunSummary {
        self.entries.get(check_name).map_or_else(
            || {
                vec![format!(
                    "Completed {check_name} check: {} result(s) collected",
                    results.len()
                )]
            },
            |summarize| summarize(results),
        )
    }
}

/// Summarize with the built-in table
#[must_use]
pub fn summarize(check_name: &str, results: &[CheckResult]) -> RunSummary {
    SummaryTable::default().summarize(check_name, results)
}

fn total_line(results: &[CheckResult]) -> String {
    format!("Total: {}", results.len())
}

fn summarize_aws_sdk(results: &[CheckResult]) -> RunSummary {
    let (mut mixed, mut v2, mut v3, mut none, mut other) = (0, 0, 0, 0, 0);

    for result in results {
        match result.payload() {
            Some(Payload::AwsSdk {
                uses_v2: true,
                uses_v3: true,
            }) => mixed += 1,
            Some(Payload::AwsSdk { uses_v2: true, .. }) => v2 += 1,
            Some(Payload::AwsSdk { uses_v3: true, .. }) => v3 += 1,
            Some(Payload::AwsSdk { .. }) => none += 1,
            _ => other += 1,
        }
    }

    vec![
        total_line(results),
        format!("Mixed v2 + v3: {mixed}"),
        format!("AWS SDK v2 only: {v2}"),
        format!("AWS SDK v3 only: {v3}"),
        format!("Not using AWS SDK: {none}"),
        format!("Other (no manifest, errors): {other}"),
    ]
}

fn tier_lines(label: &str, tiers: &BTreeMap<SupportTier, usize>) -> Vec<String> {
    SupportTier::ALL
        .iter()
        .map(|tier| {
            format!(
                "{label} {}: {}",
                tier.label(),
                tiers.get(tier).copied().unwrap_or_default()
            )
        })
        .collect()
}

fn summarize_react(results: &[CheckResult]) -> RunSummary {
    let mut tiers = BTreeMap::new();
    let (mut outdated, mut other) = (0, 0);

    for result in results {
        match result.payload() {
            Some(Payload::React {
                version: Some(_),
                outdated: is_outdated,
                support,
            }) => {
                *tiers.entry(*support).or_insert(0) += 1;
                if *is_outdated {
                    outdated += 1;
                }
            },
            Some(Payload::React { version: None, .. }) => {
                *tiers.entry(SupportTier::Unknown).or_insert(0) += 1;
            },
            _ => other += 1,
        }
    }

    let mut lines = vec![total_line(results)];
    lines.extend(tier_lines("React", &tiers));
    lines.push(format!("Outdated React: {outdated}"));
    lines.push(format!("Other (not using React, errors): {other}"));
    lines
}

fn summarize_react_native(results: &[CheckResult]) -> RunSummary {
    let mut tiers = BTreeMap::new();
    let mut other = 0;

    for result in results {
        match result.payload() {
            Some(Payload::ReactNative { support, .. }) => {
                *tiers.entry(*support).or_insert(0) += 1;
            },
            _ => other += 1,
        }
    }

    let mut lines = vec![total_line(results)];
    lines.extend(tier_lines("React Native", &tiers));
    lines.push(format!("Other (not using React Native, errors): {other}"));
    lines
}

fn summarize_keyword(results: &[CheckResult]) -> RunSummary {
    let (mut repos_with_matches, mut files, mut other) = (0, 0, 0);
    let mut keyword = None;

    for result in results {
        match result.payload() {
            Some(Payload::Keyword {
                keyword: k,
                matches,
            }) if !matches.is_empty() => {
                repos_with_matches += 1;
                files += matches.len();
                keyword.get_or_insert(k.as_str());
            },
            _ => other += 1,
        }
    }

    let heading = keyword.map_or_else(
        || "Repositories with matches".to_string(),
        |k| format!("Repositories with matches for \"{k}\""),
    );

    vec![
        total_line(results),
        format!("{heading}: {repos_with_matches}"),
        format!("Matching files: {files}"),
        format!("Other (no matches, errors): {other}"),
    ]
}

fn summarize_secrets(results: &[CheckResult]) -> RunSummary {
    let (mut flagged, mut hits, mut other) = (0, 0, 0);

    for result in results {
        match result.payload() {
            Some(Payload::Secrets { hits: found }) if !found.is_empty() => {
                flagged += 1;
                hits += found.len();
            },
            _ => other += 1,
        }
    }

    vec![
        total_line(results),
        format!("Repositories with potential secrets: {flagged}"),
        format!("Suspicious files: {hits}"),
        format!("Other (clean, errors): {other}"),
    ]
}

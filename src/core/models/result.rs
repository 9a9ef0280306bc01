//! Per-repository check results
//!
//! A check either produces a plain message (nothing structured to report, or
//! an operational failure such as a failed clone) or a structured finding
//! with a check-specific payload. Both have a single-line display form.

use serde::Serialize;

use super::support::SupportTier;

/// Outcome of running one check against one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CheckResult {
    /// Free-form text, e.g. `"payments-api has no package.json"`
    Message {
        /// The text shown to the user
        text: String,
    },
    /// Structured result with a canonical rendering
    Finding(Finding),
}

/// Structured result of a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Slug of the repository this finding belongs to
    pub slug: String,
    /// Check-specific data
    pub payload: Payload,
    /// Canonical single-line rendering
    pub raw: String,
}

/// Check-specific structured data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "check", rename_all = "kebab-case")]
pub enum Payload {
    /// AWS SDK major versions in use
    AwsSdk {
        /// `aws-sdk` (v2) is declared
        uses_v2: bool,
        /// Any `@aws-sdk/*` (v3) package is declared
        uses_v3: bool,
    },
    /// React usage and support status
    React {
        /// Declared `react` range, if any
        version: Option<String>,
        /// Lowest version of the range is behind the registry's latest
        outdated: bool,
        /// Support tier of the declared range
        support: SupportTier,
    },
    /// React Native usage and support status
    ReactNative {
        /// Declared `react-native` range
        version: String,
        /// Support tier of the declared range
        support: SupportTier,
    },
    /// Files containing a keyword
    Keyword {
        /// The (lowercased) keyword searched for
        keyword: String,
        /// Matching paths relative to the repository root
        matches: Vec<String>,
    },
    /// Potential secrets
    Secrets {
        /// One entry per suspicious file
        hits: Vec<String>,
    },
}

impl CheckResult {
    /// Create a message result
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }

    /// Create a finding result
    #[must_use]
    pub fn finding(slug: impl Into<String>, payload: Payload, raw: impl Into<String>) -> Self {
        Self::Finding(Finding {
            slug: slug.into(),
            payload,
            raw: raw.into(),
        })
    }

    /// The single-line form used for display and for the report
    #[must_use]
    pub fn display_form(&self) -> &str {
        match self {
            Self::Message { text } => text,
            Self::Finding(finding) => &finding.raw,
        }
    }

    /// The structured payload, if this is a finding
    #[must_use]
    pub const fn payload(&self) -> Option<&Payload> {
        match self {
            Self::Message { .. } => None,
            Self::Finding(finding) => Some(&finding.payload),
        }
    }

    /// Slug of the repository, if this is a finding
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Message { .. } => None,
            Self::Finding(finding) => Some(&finding.slug),
        }
    }
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_form())
    }
}

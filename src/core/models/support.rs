//! Support tiers for versioned dependencies
//!
//! A check classifies a dependency version once; the aggregator compares
//! tiers exactly instead of parsing status text.

use serde::{Deserialize, Serialize};

/// Upstream support status of a dependency version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportTier {
    /// Actively supported upstream
    Active,
    /// Still works, no new features
    Deprecated,
    /// Should be migrated
    Legacy,
    /// Predates any supported release line
    Unsupported,
    /// Version could not be determined
    #[default]
    Unknown,
}

impl SupportTier {
    /// All tiers in summary order
    pub const ALL: [Self; 5] = [
        Self::Active,
        Self::Deprecated,
        Self::Legacy,
        Self::Unsupported,
        Self::Unknown,
    ];

    /// Human-readable label used in renderings and summaries
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "active support",
            Self::Deprecated => "deprecated",
            Self::Legacy => "legacy",
            Self::Unsupported => "unsupported",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SupportTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SupportTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" | "active support" => Ok(Self::Active),
            "deprecated" => Ok(Self::Deprecated),
            "legacy" => Ok(Self::Legacy),
            "unsupported" => Ok(Self::Unsupported),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!(
                "Invalid support tier: {s}. Use: active, deprecated, legacy, unsupported, unknown"
            )),
        }
    }
}

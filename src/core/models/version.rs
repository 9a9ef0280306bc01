//! Minimal npm version-range handling
//!
//! Only what the dependency checks need: the lowest version a declared range
//! can resolve to, compared by `(major, minor, patch)`. Prerelease tags and
//! build metadata are ignored.

use serde::Serialize;

/// A `major.minor.patch` version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version {
    /// Major component
    pub major: u64,
    /// Minor component
    pub minor: u64,
    /// Patch component
    pub patch: u64,
}

impl Version {
    /// Create a version from its components
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse an exact version such as `18.2.0` or `v0.72.4`
    ///
    /// Missing or wildcard components (`18`, `18.x`) count as zero.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches(['v', '=']);
        let mut parts = s.split(['.', '-', '+']);

        let major = parse_component(parts.next()?)?;
        let minor = parts.next().map_or(Some(0), parse_component)?;
        let patch = parts.next().map_or(Some(0), parse_component)?;

        Some(Self::new(major, minor, patch))
    }

    /// Lowest version satisfying an npm range (`^18.2.0`, `~0.71.3`, `>=16 <18`, `17.x || 18.x`)
    ///
    /// Upper bounds (`<`, `<=`) do not raise the minimum, so `<18` resolves
    /// to `0.0.0`. A strict lower bound moves past the named version: `>17.0.0`
    /// is `17.0.1` and `>17` is `18.0.0`.
    ///
    /// Returns `None` for ranges with no numeric bound, such as `*`,
    /// `latest`, git URLs or `workspace:` specifiers.
    #[must_use]
    pub fn min_of_range(range: &str) -> Option<Self> {
        range.split("||").filter_map(min_of_comparators).min()
    }

    /// Smallest version strictly above `self` at the precision written
    const fn bump(self, components: usize) -> Self {
        match components {
            0 | 1 => Self::new(self.major + 1, 0, 0),
            2 => Self::new(self.major, self.minor + 1, 0),
            _ => Self::new(self.major, self.minor, self.patch + 1),
        }
    }
}

/// Lowest version of one space-separated comparator set
fn min_of_comparators(alternative: &str) -> Option<Version> {
    let alternative = alternative.trim();
    if alternative.contains(':')
        || alternative.contains('/')
        || !alternative.contains(|c: char| c.is_ascii_digit())
    {
        return None;
    }

    let mut lower: Option<Version> = None;
    let mut tokens = alternative.split_whitespace();
    while let Some(token) = tokens.next() {
        // Hyphen range: the upper end follows
        if token == "-" {
            break;
        }
        let op_len = token
            .find(|c: char| !matches!(c, '<' | '>' | '=' | '^' | '~'))
            .unwrap_or(token.len());
        let (op, rest) = token.split_at(op_len);
        // `>= 16.8.0` separates the operator from its version
        let text = if rest.is_empty() { tokens.next().unwrap_or_default() } else { rest };
        let Some(version) = Version::parse(text) else {
            continue;
        };
        let bound = match op {
            "<" | "<=" => continue,
            ">" => version.bump(written_components(text)),
            _ => version,
        };
        lower = Some(lower.map_or(bound, |current| current.max(bound)));
    }

    Some(lower.unwrap_or(Version::new(0, 0, 0)))
}

/// Number of numeric components written in a version (`17.x` has one)
fn written_components(text: &str) -> usize {
    text.trim_start_matches(['v', '='])
        .split(['-', '+'])
        .next()
        .unwrap_or_default()
        .split('.')
        .take_while(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        .count()
}

fn parse_component(part: &str) -> Option<u64> {
    match part {
        "x" | "X" | "*" => Some(0),
        _ => {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        },
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

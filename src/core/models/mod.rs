//! Domain models for repo-analyzer
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Repository`] - A hosted repository, identified by its slug
//! - [`CheckOptions`] - Options every check invocation receives
//! - [`CheckResult`] - Message or structured finding for one repository
//! - [`SupportTier`] - Upstream support status of a dependency version
//! - [`Version`] - Lowest version of an npm range

mod options;
mod repository;
mod result;
mod support;
mod version;

pub use options::CheckOptions;
pub use repository::Repository;
pub use result::{CheckResult, Finding, Payload};
pub use support::SupportTier;
pub use version::Version;

/// Ordered, human-readable summary lines for one run
pub type RunSummary = Vec<String>;

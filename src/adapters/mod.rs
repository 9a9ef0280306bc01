//! Adapter implementations for port traits and shared I/O services
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `bitbucket/` - Paginated repository listing (`RepositoryLister`)
//! - `git/` - Shallow clone cache keyed by slug
//! - `file/` - File tree walking and report persistence
//! - `npm/` - Latest-version lookups against the npm registry
//! - `terminal/` - In-place progress indicator (`Progress`)

pub mod bitbucket;
pub mod file;
pub mod git;
pub mod npm;
pub mod terminal;

pub use bitbucket::BitbucketClient;
pub use file::{FileTree, ReportWriter};
pub use git::{CloneCache, CloneError};
pub use npm::NpmRegistry;
pub use terminal::TerminalProgress;

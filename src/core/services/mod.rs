//! Orchestration services
//!
//! Pure logic over domain models plus the run pipeline that composes them.
//! All I/O goes through the port traits.
//!
//! - [`filter`] - Narrow a repository list to an allow-list
//! - [`dispatcher`] - Bounded-concurrency check dispatch
//! - [`aggregator`] - Per-check summaries
//! - [`runner`] - List, filter, dispatch, summarize, persist

pub mod aggregator;
pub mod dispatcher;
pub mod filter;
pub mod runner;

pub use aggregator::{SummaryFn, SummaryTable, summarize};
pub use dispatcher::{DEFAULT_CONCURRENCY, Dispatcher};
pub use filter::{
    Selection, apply_allow_list, filter_repositories, load_allow_list, parse_allow_list,
};
pub use runner::{RunOutcome, RunRequest, Runner};

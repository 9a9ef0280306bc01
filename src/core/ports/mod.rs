//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the orchestration core and
//! the outside world (hosting API, check implementations, terminal, report
//! storage).
//!
//! Implementations live in the `adapters` and `checks` modules.

mod check;
mod lister;
mod progress;
mod report;

pub use check::Check;
pub use lister::{ListError, RepositoryLister};
pub use progress::{NoProgress, Progress};
pub use report::ReportStore;

//! Command implementations

mod check;
mod checks;
mod count;

pub use check::check;
pub use checks::checks;
pub use count::count;

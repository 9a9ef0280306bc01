//! Terminal progress indicator
//!
//! A single status line on stderr, redrawn in place with a carriage return:
//!
//! ```text
//! Progress |████████████████░░░░░░░░░░░░░░░░░░░░░░░░| 4/10 Repos
//! ```

use std::io::Write;

use colored::Colorize;

use crate::core::ports::Progress;

/// Number of cells in the bar
pub const BAR_WIDTH: usize = 40;

/// Render the bar for `completed` out of `total`
///
/// The filled share is `completed / total` of `width`, rounded half up.
#[must_use]
pub fn render_bar(completed: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        ((completed.min(total) * width * 2 + total) / (total * 2)).min(width)
    };
    format!("Progress |{}{}|", "█".repeat(filled), "░".repeat(width - filled))
}

/// Render the full status line
#[must_use]
pub fn render_line(completed: usize, total: usize) -> String {
    format!("{} {completed}/{total} Repos", render_bar(completed, total, BAR_WIDTH))
}

/// Progress written to stderr, overwriting itself
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalProgress {
    drawn: bool,
}

impl TerminalProgress {
    /// Create an indicator that has not drawn anything yet
    #[must_use]
    pub const fn new() -> Self {
        Self { drawn: false }
    }
}

impl Progress for TerminalProgress {
    fn advance(&mut self, completed: usize, total: usize) {
        let line = render_line(completed, total);
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{}", line.cyan());
        let _ = stderr.flush();
        self.drawn = true;
    }

    fn finish(&mut self) {
        // Leave the final state on screen and move past it
        if self.drawn {
            eprintln!();
        }
    }
}

//! Progress reporting port
//!
//! The dispatcher calls these from its coordinating task only, so an
//! implementation never sees two updates at once.

/// Receiver of dispatch progress
pub trait Progress: Send {
    /// Called once before the first invocation starts
    fn start(&mut self, total: usize) {
        let _ = total;
    }

    /// Called after each invocation settles
    fn advance(&mut self, completed: usize, total: usize);

    /// Called once after every invocation has settled
    fn finish(&mut self) {}
}

/// Progress sink that discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn advance(&mut self, _completed: usize, _total: usize) {}
}

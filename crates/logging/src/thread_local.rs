//! crates/logging/src/thread_local.rs
//! Per-thread ambient log mask and the thread context capability.

use std::cell::Cell;
use std::thread;

use super::levels::{Level, LogMask};

/// Ambient mask a thread starts with.
pub const DEFAULT_THREAD_MASK: LogMask = LogMask::up_to(Level::Info);

thread_local! {
    static THREAD_MASK: Cell<LogMask> = const { Cell::new(DEFAULT_THREAD_MASK) };
}

/// Sets the ambient mask of the calling thread, returning the previous one.
///
/// The ambient mask filters records printed without a log object.
pub fn set_thread_mask(mask: LogMask) -> LogMask {
    THREAD_MASK.with(|cell| cell.replace(mask))
}

/// Returns the ambient mask of the calling thread.
pub fn thread_mask() -> LogMask {
    THREAD_MASK.with(Cell::get)
}

/// Capability answering questions about the calling thread.
///
/// The dispatch engine asks it for the ambient mask when a record has no log
/// object, and for the thread name written into every header.
pub trait ThreadContext: Send + Sync {
    /// Ambient mask of the calling thread.
    fn current_thread_mask(&self) -> LogMask;

    /// Display name of the calling thread.
    fn current_thread_name(&self) -> String;
}

/// [`ThreadContext`] backed by [`std::thread`] and the thread-local mask
/// managed through [`set_thread_mask`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StdThreadContext;

impl ThreadContext for StdThreadContext {
    fn current_thread_mask(&self) -> LogMask {
        thread_mask()
    }

    fn current_thread_name(&self) -> String {
        thread::current()
            .name()
            .unwrap_or("unnamed")
            .to_owned()
    }
}

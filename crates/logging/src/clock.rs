//! crates/logging/src/clock.rs
//! Time source used to stamp dispatched records.

use std::fmt;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Point in time split into whole seconds and sub-second nanoseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    /// Whole seconds.
    pub seconds: u64,
    /// Nanoseconds within the current second.
    pub nanoseconds: u32,
}

impl Timestamp {
    /// Creates a timestamp.
    #[must_use]
    pub const fn new(seconds: u64, nanoseconds: u32) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }

    /// Milliseconds within the current second.
    #[must_use]
    pub const fn millis(self) -> u32 {
        self.nanoseconds / 1_000_000
    }
}

/// Renders as `<seconds>.<milliseconds>` with three millisecond digits.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.seconds, self.millis())
    }
}

/// Source of record timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

/// Wall clock measured from the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A clock set before 1970 reads as the epoch.
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp::new(elapsed.as_secs(), elapsed.subsec_nanos())
    }
}

/// Monotonic clock measured from its construction, similar to uptime on
/// an embedded target.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Starts a clock reading zero now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        let elapsed = self.origin.elapsed();
        Timestamp::new(elapsed.as_secs(), elapsed.subsec_nanos())
    }
}

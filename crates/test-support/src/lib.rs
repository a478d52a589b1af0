//! Test doubles shared by the workspace's integration tests.
//!
//! [`RecordingChannel`] keeps the exact sequence of control signals and
//! writes a channel received, [`FixedClock`] and [`FixedThreadContext`] make
//! record headers deterministic. [`TickingClock`] advances on every read.

use std::fmt::{self, Write as _};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use logging::{Clock, ControlSignal, LogChannel, LogMask, ThreadContext, Timestamp};
use tempfile::TempDir;

/// One call observed by a [`RecordingChannel`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ChannelEvent {
    /// `control(LogBegin)`.
    Begin,
    /// One `write_fmt` call, already formatted.
    Write(String),
    /// `control(LogEnd)`.
    End,
}

/// A channel that records every call and can be told to fail writes.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    events: Mutex<Vec<ChannelEvent>>,
    failing: AtomicBool,
}

impl RecordingChannel {
    /// Creates an empty recording channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a channel whose writes fail (control signals still succeed).
    pub fn failing() -> Self {
        let channel = Self::default();
        channel.failing.store(true, Ordering::Relaxed);
        channel
    }

    /// Every observed call, in order.
    pub fn events(&self) -> Vec<ChannelEvent> {
        self.lock().clone()
    }

    /// Concatenation of all writes.
    pub fn contents(&self) -> String {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                ChannelEvent::Write(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Completed records, each the concatenation of its writes.
    pub fn records(&self) -> Vec<String> {
        let mut records = Vec::new();
        let mut current = None::<String>;
        for event in self.lock().iter() {
            match event {
                ChannelEvent::Begin => current = Some(String::new()),
                ChannelEvent::Write(text) => {
                    if let Some(record) = current.as_mut() {
                        record.push_str(text);
                    }
                }
                ChannelEvent::End => records.extend(current.take()),
            }
        }
        records
    }

    /// Number of `LogBegin` signals received.
    pub fn begins(&self) -> usize {
        self.count(&ChannelEvent::Begin)
    }

    /// Number of `LogEnd` signals received.
    pub fn ends(&self) -> usize {
        self.count(&ChannelEvent::End)
    }

    fn count(&self, wanted: &ChannelEvent) -> usize {
        self.lock().iter().filter(|event| *event == wanted).count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChannelEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogChannel for RecordingChannel {
    fn write_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(io::Error::other("recording channel set to fail"));
        }
        let mut text = String::new();
        text.write_fmt(args)
            .map_err(|_| io::Error::other("formatting failed"))?;
        self.lock().push(ChannelEvent::Write(text));
        Ok(())
    }

    fn control(&self, signal: ControlSignal) -> io::Result<()> {
        self.lock().push(match signal {
            ControlSignal::LogBegin => ChannelEvent::Begin,
            ControlSignal::LogEnd => ChannelEvent::End,
        });
        Ok(())
    }
}

/// A clock frozen at one instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub Timestamp);

impl FixedClock {
    /// Freezes the clock at `seconds.millis`.
    pub const fn at(seconds: u64, millis: u32) -> Self {
        Self(Timestamp::new(seconds, millis * 1_000_000))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// A clock that moves forward one second and one millisecond on every read.
///
/// The `n`th call (starting at zero) returns `n.00n`, so two reads never
/// agree; [`calls`](Self::calls) reports how often the clock was read.
#[derive(Debug, Default)]
pub struct TickingClock {
    ticks: AtomicU64,
}

impl TickingClock {
    /// Creates a clock that has not been read yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times [`Clock::now`] was called.
    pub fn calls(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl Clock for TickingClock {
    fn now(&self) -> Timestamp {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        let millis = u32::try_from(tick % 1000).unwrap_or_default();
        Timestamp::new(tick, millis * 1_000_000)
    }
}

/// A thread context reporting the same name and ambient mask everywhere.
#[derive(Clone, Debug)]
pub struct FixedThreadContext {
    /// Name written into record headers.
    pub name: String,
    /// Mask used for records printed without an object.
    pub mask: LogMask,
}

impl FixedThreadContext {
    /// Creates a context named `name` with ambient `mask`.
    pub fn new(name: impl Into<String>, mask: LogMask) -> Self {
        Self {
            name: name.into(),
            mask,
        }
    }
}

impl ThreadContext for FixedThreadContext {
    fn current_thread_mask(&self) -> LogMask {
        self.mask
    }

    fn current_thread_name(&self) -> String {
        self.name.clone()
    }
}

/// A scratch directory removed on drop.
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Creates a fresh directory under the system temp root.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Path of `name` inside the directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

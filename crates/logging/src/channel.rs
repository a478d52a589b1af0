//! crates/logging/src/channel.rs
//! Output channel capability consumed by log handlers.

use std::fmt;
use std::io::{self, Write};

/// Control signal bracketing a single log record on a channel.
///
/// Every delivered record is framed as `LogBegin`, one or more writes, then
/// `LogEnd`. Channels that need to treat a record atomically (framing,
/// colouring, one syslog call per record) hook these signals.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlSignal {
    /// A new record starts.
    LogBegin,
    /// The current record is complete.
    LogEnd,
}

/// Write-and-control-able output stream a [`LogHandler`](crate::LogHandler)
/// delivers records to.
///
/// Methods take `&self`: channels are shared between the caller that created
/// them and the registry, so implementations keep their own interior
/// mutability. The dispatch engine already serializes all calls behind the
/// logger lock.
pub trait LogChannel: Send + Sync {
    /// Writes formatted output.
    fn write_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()>;

    /// Handles a record framing signal. The default ignores it.
    fn control(&self, signal: ControlSignal) -> io::Result<()> {
        let _ = signal;
        Ok(())
    }
}

/// Channel writing to the process's standard output.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutChannel;

impl LogChannel for StdoutChannel {
    fn write_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        io::stdout().lock().write_fmt(args)
    }

    fn control(&self, signal: ControlSignal) -> io::Result<()> {
        match signal {
            ControlSignal::LogBegin => Ok(()),
            ControlSignal::LogEnd => io::stdout().flush(),
        }
    }
}

/// Channel writing to the process's standard error.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrChannel;

impl LogChannel for StderrChannel {
    fn write_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        io::stderr().lock().write_fmt(args)
    }
}

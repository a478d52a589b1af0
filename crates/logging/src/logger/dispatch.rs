//! crates/logging/src/logger/dispatch.rs
//! Filtering and fan-out of a single record to every live handler.

use std::fmt;
use std::io;

use tracing::warn;

use super::Logger;
use crate::channel::{ControlSignal, LogChannel};
use crate::clock::Timestamp;
use crate::handler::LogHandler;
use crate::levels::Level;
use crate::object::LogObject;

/// Source name written for records printed without a log object.
pub const DEFAULT_SOURCE_NAME: &str = "default";

/// `<seconds>.<milliseconds>:<level>:<thread>:<source>: `
struct RecordHeader<'a> {
    timestamp: Timestamp,
    level: Level,
    thread: &'a str,
    source: &'a str,
}

impl fmt::Display for RecordHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}: ",
            self.timestamp, self.level, self.thread, self.source
        )
    }
}

impl Logger {
    /// Prints a record to every handler with a channel.
    ///
    /// The record is filtered against `object`'s mask, or against the
    /// calling thread's ambient mask when `object` is `None` (the header then
    /// names the source `"default"`). A filtered record costs one bit test:
    /// no lock is taken and nothing is formatted.
    ///
    /// A record that passes is written under the logger lock with a single
    /// timestamp shared by all handlers, most recently added handler first and
    /// the default handler last. Each delivery is bracketed by
    /// [`ControlSignal::LogBegin`] and [`ControlSignal::LogEnd`]. No newline is
    /// appended to `args`.
    ///
    /// Returns the number of handlers with a channel that were written to.
    /// A failing channel is reported through `tracing` and still counts; the
    /// remaining handlers are written regardless.
    pub fn print(
        &self,
        object: Option<&LogObject>,
        level: Level,
        args: fmt::Arguments<'_>,
    ) -> usize {
        let (mask, source) = match object {
            Some(object) => (object.mask(), object.name()),
            None => (self.context.current_thread_mask(), DEFAULT_SOURCE_NAME),
        };

        if !mask.contains(level) {
            return 0;
        }

        let thread = self.context.current_thread_name();
        let registries = self.registries();
        let header = RecordHeader {
            timestamp: self.clock.now(),
            level,
            thread: &thread,
            source,
        };

        // Newest handler first, the default handler last.
        let mut handlers = registries.handlers.iter();
        let default = handlers.next();

        let mut count = 0;
        for channel in handlers.chain(default).filter_map(LogHandler::channel) {
            if let Err(error) = deliver(channel.as_ref(), &header, args) {
                warn!(%error, source, %level, "log channel write failed");
            }
            count += 1;
        }

        count
    }
}

fn deliver(
    channel: &dyn LogChannel,
    header: &RecordHeader<'_>,
    args: fmt::Arguments<'_>,
) -> io::Result<()> {
    channel.control(ControlSignal::LogBegin)?;
    let written = write!(channel, "{header}").and_then(|()| channel.write_fmt(args));
    // The record is closed even when a write failed so framing stays balanced.
    let closed = channel.control(ControlSignal::LogEnd);
    written.and(closed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_has_fixed_shape() {
        let header = RecordHeader {
            timestamp: Timestamp::new(1234, 56_000_000),
            level: Level::Warning,
            thread: "main",
            source: "net",
        };
        assert_eq!(header.to_string(), "1234.056:warning:main:net: ");
    }
}

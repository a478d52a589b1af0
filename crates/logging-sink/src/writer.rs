use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use logging::{ControlSignal, LogChannel};

use crate::guard::LineModeGuard;
use crate::line_mode::LineMode;

/// A [`LogChannel`] writing into any [`io::Write`] implementor.
///
/// The writer is flushed when each record ends, so buffered writers such as
/// [`BufWriter`] still deliver whole records promptly.
///
/// ```
/// use std::sync::Arc;
/// use logging::{ChannelTarget, LogHandler, Logger, LoggerConfig, log_error};
/// use logging_sink::WriterChannel;
///
/// let logger = Logger::new(LoggerConfig::default().with_default_channel(ChannelTarget::Disabled))?;
/// let channel = Arc::new(WriterChannel::new(Vec::new()));
/// let handler = LogHandler::new(channel.clone());
/// logger.add_handler(&handler)?;
///
/// log_error!(logger, Some(logger.default_object()), "disk full\n");
/// assert!(channel.with_writer(|buf| buf.ends_with(b":log: disk full\n")));
/// # Ok::<(), logging::Error>(())
/// ```
pub struct WriterChannel<W> {
    writer: Mutex<W>,
    append_newline: AtomicBool,
}

impl<W> WriterChannel<W> {
    /// Wraps `writer`, leaving records as formatted.
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::default())
    }

    /// Wraps `writer` using an explicit [`LineMode`].
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            append_newline: AtomicBool::new(line_mode.append_newline()),
        }
    }

    /// Returns the current line mode.
    #[must_use]
    pub fn line_mode(&self) -> LineMode {
        LineMode::from(self.append_newline.load(Ordering::Acquire))
    }

    /// Replaces the line mode for subsequent records.
    pub fn set_line_mode(&self, line_mode: LineMode) {
        self.append_newline
            .store(line_mode.append_newline(), Ordering::Release);
    }

    /// Switches to `line_mode` until the returned guard is dropped.
    pub fn scoped_line_mode(&self, line_mode: LineMode) -> LineModeGuard<'_, W> {
        let previous = self.line_mode();
        self.set_line_mode(line_mode);
        LineModeGuard::new(self, previous)
    }

    /// Runs `f` with exclusive access to the writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.lock())
    }

    /// Consumes the channel and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WriterChannel<BufWriter<File>> {
    /// Opens `path` for appending, creating it when missing.
    pub fn append_to_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W> LogChannel for WriterChannel<W>
where
    W: Write + Send,
{
    fn write_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.lock().write_fmt(args)
    }

    fn control(&self, signal: ControlSignal) -> io::Result<()> {
        match signal {
            ControlSignal::LogBegin => Ok(()),
            ControlSignal::LogEnd => {
                let mut writer = self.lock();
                if self.line_mode().append_newline() {
                    writer.write_all(b"\n")?;
                }
                writer.flush()
            }
        }
    }
}

impl<W> fmt::Debug for WriterChannel<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterChannel")
            .field("line_mode", &self.line_mode())
            .finish_non_exhaustive()
    }
}

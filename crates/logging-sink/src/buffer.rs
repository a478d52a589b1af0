use std::fmt::{self, Write as _};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logging::LogChannel;

/// An in-memory channel whose clones share one buffer.
///
/// Keep a clone to read back what the registry wrote:
///
/// ```
/// use std::sync::Arc;
/// use logging::{ChannelTarget, LogHandler, Logger, LoggerConfig, log_info};
/// use logging_sink::BufferChannel;
///
/// let logger = Logger::new(LoggerConfig::default().with_default_channel(ChannelTarget::Disabled))?;
/// let buffer = BufferChannel::new();
/// logger.add_handler(&LogHandler::new(Arc::new(buffer.clone())))?;
///
/// log_info!(logger, Some(logger.default_object()), "ready\n");
/// assert!(buffer.contents().ends_with(":log: ready\n"));
/// # Ok::<(), logging::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct BufferChannel {
    buffer: Arc<Mutex<String>>,
}

impl BufferChannel {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        self.lock().clone()
    }

    /// Takes the buffered text, leaving the buffer empty.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.lock())
    }

    /// Number of buffered bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogChannel for BufferChannel {
    fn write_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.lock()
            .write_fmt(args)
            .map_err(|_| io::Error::other("formatting a log record failed"))
    }
}

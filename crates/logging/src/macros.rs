//! crates/logging/src/macros.rs
//! Formatting front end for [`Logger::print`](crate::Logger::print).
//!
//! The macros build `format_args!` lazily, so a record filtered out by its
//! mask is never formatted.

/// Prints a record at an explicit level.
///
/// `$object` is an `Option<&LogObject>`; `None` filters with the calling
/// thread's ambient mask. Evaluates to the number of handlers written.
///
/// # Example
/// ```
/// use logging::{log_print, ChannelTarget, Level, Logger, LoggerConfig};
///
/// let logger = Logger::new(LoggerConfig::default().with_default_channel(ChannelTarget::Disabled))?;
/// let written = log_print!(logger, None, Level::Debug, "{} bytes\n", 12);
/// assert_eq!(written, 0);
/// # Ok::<(), logging::Error>(())
/// ```
#[macro_export]
macro_rules! log_print {
    ($logger:expr, $object:expr, $level:expr, $($arg:tt)+) => {
        $logger.print($object, $level, ::std::format_args!($($arg)+))
    };
}

/// Prints a fatal record.
///
/// # Example
/// ```ignore
/// log_fatal!(logger, Some(&net), "link lost\n");
/// ```
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $object:expr, $($arg:tt)+) => {
        $crate::log_print!($logger, $object, $crate::Level::Fatal, $($arg)+)
    };
}

/// Prints an error record.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $object:expr, $($arg:tt)+) => {
        $crate::log_print!($logger, $object, $crate::Level::Error, $($arg)+)
    };
}

/// Prints a warning record.
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $object:expr, $($arg:tt)+) => {
        $crate::log_print!($logger, $object, $crate::Level::Warning, $($arg)+)
    };
}

/// Prints an info record.
///
/// # Example
/// ```ignore
/// log_info!(logger, None, "listening on {}\n", port);
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $object:expr, $($arg:tt)+) => {
        $crate::log_print!($logger, $object, $crate::Level::Info, $($arg)+)
    };
}

/// Prints a debug record.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $object:expr, $($arg:tt)+) => {
        $crate::log_print!($logger, $object, $crate::Level::Debug, $($arg)+)
    };
}

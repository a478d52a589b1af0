#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides ready-made [`logging::LogChannel`] implementations
//! for attaching handlers to a [`logging::Logger`]:
//!
//! - [`WriterChannel`] streams records into any [`std::io::Write`]
//!   implementor, including append-mode files.
//! - [`BufferChannel`] keeps records in a shared in-memory buffer.
//! - `syslog::SyslogChannel` (Unix only) forwards each record to syslog(3).
//!
//! # Design
//!
//! Channels take `&self` because the registry shares them behind `Arc`; each
//! one guards its own state with a mutex. A record arrives as a
//! `LogBegin`, one or more writes, and a `LogEnd`. Channels that need whole
//! records (syslog, newline termination) act on `LogEnd`.
//!
//! # Errors
//!
//! Write failures surface as [`std::io::Error`]; the registry reports them
//! and moves on to the next handler.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging::{ChannelTarget, Level, LogHandler, LogMask, LogObject, Logger, LoggerConfig, log_debug};
//! use logging_sink::{LineMode, WriterChannel};
//!
//! let logger = Logger::new(LoggerConfig::default().with_default_channel(ChannelTarget::Disabled))?;
//! let channel = Arc::new(WriterChannel::with_line_mode(Vec::new(), LineMode::WithNewline));
//! logger.add_handler(&LogHandler::new(channel.clone()))?;
//!
//! let fs = LogObject::new("fs", LogMask::ALL)?;
//! logger.add_object(&fs)?;
//! log_debug!(logger, Some(&fs), "mounted {}", "/data");
//!
//! assert!(channel.with_writer(|out| out.ends_with(b":fs: mounted /data\n")));
//! # Ok::<(), logging::Error>(())
//! ```

mod buffer;
mod guard;
mod line_mode;
mod writer;

/// Syslog channel backed by libc syslog(3).
#[cfg(unix)]
#[allow(unsafe_code)]
pub mod syslog;

pub use buffer::BufferChannel;
pub use guard::LineModeGuard;
pub use line_mode::LineMode;
pub use writer::WriterChannel;

#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # embedlog
//!
//! A process-wide registry of named log sources, each with its own severity
//! mask, fanning formatted records out to pluggable output channels.
//!
//! This crate re-exports the registry from [`logging`] and the channel
//! implementations from [`logging_sink`] under one name.
//!
//! ```
//! use std::sync::Arc;
//! use embedlog::{ChannelTarget, Level, LogHandler, LogMask, LogObject, Logger, LoggerConfig};
//! use embedlog::sink::BufferChannel;
//!
//! let logger = Logger::new(LoggerConfig::default().with_default_channel(ChannelTarget::Disabled))?;
//! let buffer = BufferChannel::new();
//! logger.add_handler(&LogHandler::new(Arc::new(buffer.clone())))?;
//!
//! let net = LogObject::new("net", LogMask::up_to(Level::Warning))?;
//! logger.add_object(&net)?;
//!
//! embedlog::log_info!(logger, Some(&net), "suppressed\n");
//! embedlog::log_warning!(logger, Some(&net), "link down\n");
//! assert_eq!(buffer.contents().lines().count(), 1);
//! # Ok::<(), embedlog::Error>(())
//! ```

pub use logging::*;

/// Output channel implementations.
pub mod sink {
    pub use logging_sink::*;
}

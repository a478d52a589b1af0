#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is a registry of named log sources ("objects") and output sinks
//! ("handlers"). Every object carries its own severity mask; a record printed
//! through an object that passes the mask is written, with a timestamped
//! header, to every registered handler's channel.
//!
//! # Design
//!
//! [`Logger`] owns two singly-linked lists stored in index arenas, each
//! headed by a sentinel that is always present: the default handler (standard
//! output) and the default object (named `"log"`, enabled up to
//! [`Level::Info`]). New nodes are linked right after the sentinel, so the
//! most recently added handler receives records first.
//!
//! [`LogObject`] and [`LogHandler`] are reference-counted handles owned by the
//! caller; the registry keeps a clone while the node is registered. The
//! thread's ambient mask and name come from an injected [`ThreadContext`],
//! timestamps from an injected [`Clock`].
//!
//! A process-wide logger is available through [`init`] for code that cannot
//! pass a [`Logger`] around.
//!
//! # Invariants
//!
//! - Masks only ever hold the five defined level bits.
//! - A node is a member of at most one registry at a time.
//! - Sentinels are never removed; removing an unknown node terminates with
//!   [`Error::NotFound`].
//! - One record is written to all handlers under a single lock acquisition
//!   with a single timestamp, so records never interleave.
//! - Filtering happens before the lock is taken.
//!
//! # Errors
//!
//! Registry operations return [`Error`]; administrative commands return
//! [`CommandError`], whose [`code`](CommandError::code) is the negative status
//! expected by a command shell. Printing never fails.
//!
//! # Examples
//!
//! ```
//! use logging::{ChannelTarget, Level, LogMask, LogObject, Logger, LoggerConfig, log_warning};
//!
//! let logger = Logger::new(LoggerConfig::default().with_default_channel(ChannelTarget::Stdout))?;
//! let net = LogObject::new("net", LogMask::up_to(Level::Warning))?;
//! logger.add_object(&net)?;
//!
//! let written = log_warning!(logger, Some(&net), "retrying in {} ms\n", 250);
//! assert_eq!(written, 1);
//!
//! logger.remove_object(&net)?;
//! # Ok::<(), logging::Error>(())
//! ```

mod arena;
mod channel;
mod clock;
mod commands;
mod config;
mod error;
mod global;
mod handler;
mod levels;
mod logger;
mod macros;
mod object;
mod thread_local;
#[cfg(feature = "tracing-bridge")]
mod tracing_bridge;

pub use channel::{ControlSignal, LogChannel, StderrChannel, StdoutChannel};
pub use clock::{Clock, MonotonicClock, SystemClock, Timestamp};
pub use commands::{
    COMMANDS, CommandCallback, CommandError, CommandRegistrar, LIST_PATH, PRINT_PATH,
    SET_LOG_MASK_PATH,
};
pub use config::{
    ChannelTarget, ClockKind, DEFAULT_OBJECT_MASK, DEFAULT_OBJECT_NAME, LoggerConfig,
    ObjectConfig,
};
pub use error::{Error, Result};
pub use global::{global, init, init_with, is_initialized};
pub use handler::LogHandler;
pub use levels::{Level, LogMask};
pub use logger::{DEFAULT_SOURCE_NAME, Logger, LoggerBuilder};
pub use object::LogObject;
pub use thread_local::{
    DEFAULT_THREAD_MASK, StdThreadContext, ThreadContext, set_thread_mask, thread_mask,
};
#[cfg(feature = "tracing-bridge")]
pub use tracing_bridge::RegistryLayer;

/// Admin command callbacks, for shells that bind them individually.
pub mod command {
    pub use crate::commands::{list, print, set_log_mask};
}

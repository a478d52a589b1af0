//! crates/logging/src/handler.rs
//! Output sinks records fan out to.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::channel::LogChannel;
use crate::error::{Error, Result};

struct HandlerState {
    channel: RwLock<Option<Arc<dyn LogChannel>>>,
    registered: AtomicBool,
}

/// Handle to an output sink.
///
/// A handler wraps a shared [`LogChannel`]. Handlers without a channel are
/// allowed; the dispatch engine skips them and does not count them as
/// delivered.
#[derive(Clone)]
pub struct LogHandler {
    state: Arc<HandlerState>,
}

impl LogHandler {
    /// Creates an unregistered handler writing to `channel`.
    pub fn new(channel: Arc<dyn LogChannel>) -> Self {
        Self::with_channel(Some(channel))
    }

    /// Creates a handler with no channel.
    pub fn detached() -> Self {
        Self::with_channel(None)
    }

    pub(crate) fn with_channel(channel: Option<Arc<dyn LogChannel>>) -> Self {
        Self {
            state: Arc::new(HandlerState {
                channel: RwLock::new(channel),
                registered: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the channel, if any.
    #[must_use]
    pub fn channel(&self) -> Option<Arc<dyn LogChannel>> {
        self.state
            .channel
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swaps the channel, returning the previous one.
    pub(crate) fn replace_channel(
        &self,
        channel: Option<Arc<dyn LogChannel>>,
    ) -> Option<Arc<dyn LogChannel>> {
        let mut slot = self
            .state
            .channel
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, channel)
    }

    /// Reports whether the handler is currently linked into a registry.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.state.registered.load(Ordering::Acquire)
    }

    /// Two handles are the same handler when they share state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    pub(crate) fn claim(&self) -> Result<()> {
        self.state
            .registered
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(drop)
            .map_err(|_| Error::invalid_argument("log handler is already registered"))
    }

    pub(crate) fn release(&self) {
        self.state.registered.store(false, Ordering::Release);
    }
}

impl fmt::Debug for LogHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandler")
            .field("has_channel", &self.channel().is_some())
            .field("registered", &self.is_registered())
            .finish()
    }
}

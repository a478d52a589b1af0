//! crates/logging/src/object.rs
//! Named log sources carrying their own severity mask.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::error::{Error, Result};
use crate::levels::{Level, LogMask};

#[derive(Debug)]
struct ObjectState {
    name: Cow<'static, str>,
    mask: AtomicU8,
    registered: AtomicBool,
}

/// Handle to a named log source.
///
/// Clones share the same source: changing the mask through one clone is seen
/// by every other clone and by the registry. The mask lives in an atomic so
/// the level check in [`Logger::print`](crate::Logger::print) needs no lock.
///
/// ```
/// use logging::{Level, LogMask, LogObject};
///
/// let net = LogObject::new("net", LogMask::up_to(Level::Warning)).unwrap();
/// assert!(net.is_enabled_for(Level::Error));
/// assert!(!net.is_enabled_for(Level::Info));
///
/// net.set_mask(LogMask::ALL);
/// assert!(net.is_enabled_for(Level::Debug));
/// ```
#[derive(Clone)]
pub struct LogObject {
    state: Arc<ObjectState>,
}

impl LogObject {
    /// Creates an unregistered log object.
    ///
    /// Static names are borrowed, not copied. Names need not be unique but
    /// must not be empty.
    pub fn new(name: impl Into<Cow<'static, str>>, mask: LogMask) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("log object name must not be empty"));
        }

        Ok(Self::with_name(name, mask))
    }

    pub(crate) fn with_name(name: Cow<'static, str>, mask: LogMask) -> Self {
        Self {
            state: Arc::new(ObjectState {
                name,
                mask: AtomicU8::new(mask.bits()),
                registered: AtomicBool::new(false),
            }),
        }
    }

    /// Name written into the header of records printed through this object.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// Returns the current mask.
    #[must_use]
    pub fn mask(&self) -> LogMask {
        LogMask::from_bits_truncate(self.state.mask.load(Ordering::Relaxed))
    }

    /// Replaces the mask. Bits outside the defined levels are discarded.
    pub fn set_mask(&self, mask: impl Into<LogMask>) {
        self.state.mask.store(mask.into().bits(), Ordering::Relaxed);
    }

    /// Reports whether records at `level` pass this object's filter.
    #[must_use]
    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.mask().contains(level)
    }

    /// Reports whether the object is currently linked into a registry.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.state.registered.load(Ordering::Acquire)
    }

    /// Two handles are the same object when they share state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Marks the object as registered; fails if it already was.
    pub(crate) fn claim(&self) -> Result<()> {
        self.state
            .registered
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(drop)
            .map_err(|_| {
                Error::invalid_argument(format!(
                    "log object '{}' is already registered",
                    self.name()
                ))
            })
    }

    pub(crate) fn release(&self) {
        self.state.registered.store(false, Ordering::Release);
    }
}

impl fmt::Debug for LogObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogObject")
            .field("name", &self.name())
            .field("mask", &self.mask())
            .field("registered", &self.is_registered())
            .finish()
    }
}

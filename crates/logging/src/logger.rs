//! crates/logging/src/logger.rs
//! The registry pair (handlers and objects) behind one shared lock.

mod dispatch;

use std::borrow::Cow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::arena::{self, LinkedArena};
use crate::channel::{LogChannel, StderrChannel, StdoutChannel};
use crate::clock::{Clock, MonotonicClock, SystemClock};
use crate::config::{ChannelTarget, ClockKind, LoggerConfig};
use crate::error::{Error, Result};
use crate::handler::LogHandler;
use crate::levels::{Level, LogMask};
use crate::object::LogObject;
use crate::thread_local::{StdThreadContext, ThreadContext};

pub use dispatch::DEFAULT_SOURCE_NAME;

struct Registries {
    handlers: LinkedArena<LogHandler>,
    objects: LinkedArena<LogObject>,
}

/// Registry of log objects and handlers plus the dispatch engine.
///
/// One mutex guards both registries and the whole fan-out of a record, so
/// the output of a single [`print`](Self::print) call is never interleaved
/// with another thread's record on any channel. Level filtering happens
/// before the lock is taken.
///
/// The first node of each registry is a sentinel that cannot be removed:
/// the default handler (standard output unless configured otherwise) and the
/// default object (named `"log"`, enabled up to [`Level::Info`]).
///
/// ```
/// use logging::{ChannelTarget, Level, LogMask, LogObject, Logger, LoggerConfig};
///
/// let logger = Logger::new(
///     LoggerConfig::default().with_default_channel(ChannelTarget::Disabled),
/// )?;
/// let net = LogObject::new("net", LogMask::up_to(Level::Warning))?;
/// logger.add_object(&net)?;
///
/// // Filtered: info is above the object's mask.
/// assert_eq!(logger.print(Some(&net), Level::Info, format_args!("dropped\n")), 0);
/// // Passes the filter but the only handler has no channel.
/// assert_eq!(logger.print(Some(&net), Level::Warning, format_args!("kept\n")), 0);
/// # Ok::<(), logging::Error>(())
/// ```
pub struct Logger {
    registries: Mutex<Registries>,
    default_object: LogObject,
    context: Arc<dyn ThreadContext>,
    clock: Arc<dyn Clock>,
}

impl Logger {
    /// Builds a logger from `config` with the standard thread context.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Returns a builder for injecting capabilities.
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    fn registries(&self) -> MutexGuard<'_, Registries> {
        // A panicking channel cannot leave the lists half-linked.
        self.registries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `handler` directly after the default handler.
    ///
    /// The most recently added handler receives records first. Adding a
    /// handler that is already registered fails with
    /// [`Error::InvalidArgument`].
    pub fn add_handler(&self, handler: &LogHandler) -> Result<()> {
        handler.claim()?;
        let mut registries = self.registries();
        registries.handlers.push_after_head(handler.clone());
        debug!(handlers = registries.handlers.len(), "log handler added");
        Ok(())
    }

    /// Unregisters `handler`.
    ///
    /// Returns [`Error::NotFound`] when the handler is not in this registry.
    /// The default handler can never be removed.
    pub fn remove_handler(&self, handler: &LogHandler) -> Result<()> {
        let mut registries = self.registries();
        match registries.handlers.remove_first(|h| h.ptr_eq(handler)) {
            Some(removed) => {
                removed.release();
                debug!(handlers = registries.handlers.len(), "log handler removed");
                Ok(())
            }
            None => Err(Error::not_found("log handler is not registered")),
        }
    }

    /// Replaces the default handler's channel; `None` silences it.
    ///
    /// The default handler keeps its identity, so handles obtained from
    /// [`default_handler`](Self::default_handler) see the new channel.
    pub fn set_default_handler_output_channel(&self, channel: Option<Arc<dyn LogChannel>>) {
        let silenced = channel.is_none();
        self.registries().handlers.head().replace_channel(channel);
        debug!(silenced, "default log channel replaced");
    }

    /// Returns the default handler.
    pub fn default_handler(&self) -> LogHandler {
        self.registries().handlers.head().clone()
    }

    /// Number of handlers, the default one included.
    pub fn handler_count(&self) -> usize {
        self.registries().handlers.len()
    }

    /// Registers `object` directly after the default object.
    pub fn add_object(&self, object: &LogObject) -> Result<()> {
        object.claim()?;
        let mut registries = self.registries();
        registries.objects.push_after_head(object.clone());
        debug!(name = object.name(), "log object added");
        Ok(())
    }

    /// Unregisters `object`.
    ///
    /// Returns [`Error::NotFound`] when the object is not in this registry.
    /// The default object can never be removed.
    pub fn remove_object(&self, object: &LogObject) -> Result<()> {
        let mut registries = self.registries();
        match registries.objects.remove_first(|o| o.ptr_eq(object)) {
            Some(removed) => {
                removed.release();
                debug!(name = removed.name(), "log object removed");
                Ok(())
            }
            None => Err(Error::not_found(format!(
                "log object '{}' is not registered",
                object.name()
            ))),
        }
    }

    /// Returns the default object.
    pub fn default_object(&self) -> &LogObject {
        &self.default_object
    }

    /// Number of objects, the default one included.
    pub fn object_count(&self) -> usize {
        self.registries().objects.len()
    }

    /// Returns the first registered object called `name`.
    pub fn find_object(&self, name: &str) -> Option<LogObject> {
        self.registries()
            .objects
            .iter()
            .find(|object| object.name() == name)
            .cloned()
    }

    /// Snapshot of every registered object's name and mask, default first.
    pub fn list_objects(&self) -> Vec<(String, LogMask)> {
        self.with_objects(|objects| {
            objects
                .map(|object| (object.name().to_owned(), object.mask()))
                .collect()
        })
    }

    /// Sets the mask of every registered object called `name`.
    ///
    /// Names are not unique, so several objects may change. Returns how many
    /// did, or [`Error::NotFound`] when none matched.
    pub fn set_mask_by_name(&self, name: &str, mask: LogMask) -> Result<usize> {
        let updated = self.with_objects(|objects| {
            objects
                .filter(|object| object.name() == name)
                .inspect(|object| object.set_mask(mask))
                .count()
        });

        if updated == 0 {
            return Err(Error::not_found(format!("no log object with name '{name}'")));
        }

        debug!(name, %mask, updated, "log mask changed");
        Ok(updated)
    }

    /// Reports whether a record at `level` would pass the filter.
    ///
    /// Without an object the calling thread's ambient mask decides.
    pub fn is_enabled_for(&self, object: Option<&LogObject>, level: Level) -> bool {
        match object {
            Some(object) => object.is_enabled_for(level),
            None => self.context.current_thread_mask().contains(level),
        }
    }

    /// Runs `f` over the object registry while holding the lock.
    pub(crate) fn with_objects<R>(&self, f: impl FnOnce(arena::Iter<'_, LogObject>) -> R) -> R {
        let registries = self.registries();
        f(registries.objects.iter())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("default_object", &self.default_object)
            .field("handlers", &self.handler_count())
            .field("objects", &self.object_count())
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Logger`] with injected capabilities.
#[derive(Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    context: Option<Arc<dyn ThreadContext>>,
    clock: Option<Arc<dyn Clock>>,
    default_channel: Option<Arc<dyn LogChannel>>,
}

impl LoggerBuilder {
    /// Uses `config` for defaults and preset objects.
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the thread context (ambient mask and thread names).
    pub fn thread_context(mut self, context: Arc<dyn ThreadContext>) -> Self {
        self.context = Some(context);
        self
    }

    /// Overrides the clock selected by the configuration.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Overrides the default handler's channel selected by the configuration.
    pub fn default_channel(mut self, channel: Arc<dyn LogChannel>) -> Self {
        self.default_channel = Some(channel);
        self
    }

    /// Builds the logger, registering the configured preset objects.
    pub fn build(self) -> Result<Logger> {
        let Self {
            config,
            context,
            clock,
            default_channel,
        } = self;

        let default_channel = default_channel.or_else(|| match config.default_channel {
            ChannelTarget::Stdout => Some(Arc::new(StdoutChannel) as Arc<dyn LogChannel>),
            ChannelTarget::Stderr => Some(Arc::new(StderrChannel) as Arc<dyn LogChannel>),
            ChannelTarget::Disabled => None,
        });
        let clock = clock.unwrap_or_else(|| match config.clock {
            ClockKind::System => Arc::new(SystemClock) as Arc<dyn Clock>,
            ClockKind::Monotonic => Arc::new(MonotonicClock::new()) as Arc<dyn Clock>,
        });

        let default_object = LogObject::new(config.default_object_name, config.default_mask)?;
        let default_handler = LogHandler::with_channel(default_channel);
        default_object.claim()?;
        default_handler.claim()?;

        let logger = Logger {
            registries: Mutex::new(Registries {
                handlers: LinkedArena::new(default_handler),
                objects: LinkedArena::new(default_object.clone()),
            }),
            default_object,
            context: context.unwrap_or_else(|| Arc::new(StdThreadContext)),
            clock,
        };

        for preset in config.objects {
            let object = LogObject::new(Cow::Owned(preset.name), preset.mask)?;
            logger.add_object(&object)?;
        }

        Ok(logger)
    }
}

//! crates/logging/src/tracing_bridge.rs
//! Bridge from the tracing crate into the log registry.
//!
//! [`RegistryLayer`] is a `tracing-subscriber` layer that turns tracing
//! events into records printed through a [`Logger`]. An event's target picks
//! the log object: the registered object whose name equals the full target
//! or its last `::` segment, falling back to the default object. Levels map
//! as `ERROR → error`, `WARN → warning`, `INFO → info`, `DEBUG | TRACE → debug`.
//!
//! ```rust,ignore
//! use logging::RegistryLayer;
//! use tracing_subscriber::prelude::*;
//!
//! let logger = logging::init()?;
//! tracing_subscriber::registry()
//!     .with(RegistryLayer::new(logger))
//!     .init();
//!
//! tracing::warn!(target: "app::net", peer = %addr, "link down");
//! ```

use std::fmt::{self, Write as _};
use std::ops::Deref;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::levels::Level;
use crate::logger::Logger;

/// Targets whose events are never forwarded.
///
/// The registry and its channels emit their own diagnostics while holding the
/// logger lock; forwarding those would re-enter the lock.
const IGNORED_TARGETS: [&str; 2] = ["logging", "logging_sink"];

/// A tracing layer printing events through a [`Logger`].
///
/// `L` is anything dereferencing to a logger, typically the `&'static Logger`
/// returned by [`init`](crate::init) or an `Arc<Logger>`.
pub struct RegistryLayer<L> {
    logger: L,
}

impl<L> RegistryLayer<L>
where
    L: Deref<Target = Logger>,
{
    /// Creates a layer forwarding to `logger`.
    #[must_use]
    pub const fn new(logger: L) -> Self {
        Self { logger }
    }

    /// Maps a tracing level to a log level.
    #[must_use]
    pub fn map_level(level: tracing::Level) -> Level {
        match level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::INFO => Level::Info,
            _ => Level::Debug,
        }
    }

    fn is_ignored(target: &str) -> bool {
        IGNORED_TARGETS.iter().any(|ignored| {
            target
                .strip_prefix(ignored)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
        })
    }
}

impl<S, L> Layer<S> for RegistryLayer<L>
where
    S: Subscriber,
    L: Deref<Target = Logger> + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        if Self::is_ignored(target) {
            return;
        }

        let level = Self::map_level(*metadata.level());
        let leaf = target.rsplit("::").next().unwrap_or(target);
        let object = self
            .logger
            .find_object(target)
            .or_else(|| self.logger.find_object(leaf));
        let object = object.as_ref().unwrap_or_else(|| self.logger.default_object());

        // Cheap check before walking the event's fields.
        if !object.is_enabled_for(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.logger
            .print(Some(object), level, format_args!("{}\n", visitor.text));
    }
}

/// Collects the `message` field followed by ` key=value` for other fields.
#[derive(Default)]
struct MessageVisitor {
    text: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.text.insert_str(0, value);
        } else {
            let _ = write!(self.text, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.text.insert_str(0, &format!("{value:?}"));
        } else {
            let _ = write!(self.text, " {}={value:?}", field.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::prelude::*;

    use super::*;
    use crate::channel::LogChannel;
    use crate::config::{ChannelTarget, LoggerConfig};
    use crate::levels::LogMask;
    use crate::object::LogObject;

    #[derive(Default)]
    struct Capture(Mutex<String>);

    impl LogChannel for Capture {
        fn write_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
            self.0
                .lock()
                .unwrap()
                .write_fmt(args)
                .map_err(|_| io::Error::other("format failed"))
        }
    }

    fn setup() -> (Arc<Logger>, Arc<Capture>) {
        let capture = Arc::new(Capture::default());
        let logger = Logger::builder()
            .config(LoggerConfig::default().with_default_channel(ChannelTarget::Disabled))
            .default_channel(capture.clone())
            .build()
            .unwrap();
        (Arc::new(logger), capture)
    }

    #[test]
    fn level_mapping() {
        type Bridge = RegistryLayer<Arc<Logger>>;
        assert_eq!(Bridge::map_level(tracing::Level::ERROR), Level::Error);
        assert_eq!(Bridge::map_level(tracing::Level::WARN), Level::Warning);
        assert_eq!(Bridge::map_level(tracing::Level::INFO), Level::Info);
        assert_eq!(Bridge::map_level(tracing::Level::DEBUG), Level::Debug);
        assert_eq!(Bridge::map_level(tracing::Level::TRACE), Level::Debug);
    }

    #[test]
    fn own_targets_are_ignored() {
        type Bridge = RegistryLayer<Arc<Logger>>;
        assert!(Bridge::is_ignored("logging"));
        assert!(Bridge::is_ignored("logging::logger::dispatch"));
        assert!(Bridge::is_ignored("logging_sink::syslog"));
        assert!(!Bridge::is_ignored("logging_demo"));
        assert!(!Bridge::is_ignored("app::net"));
    }

    #[test]
    fn events_reach_the_matching_object() {
        let (logger, capture) = setup();
        let net = LogObject::new("net", LogMask::ALL).unwrap();
        logger.add_object(&net).unwrap();

        let subscriber =
            tracing_subscriber::registry().with(RegistryLayer::new(Arc::clone(&logger)));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "app::net", peer = 7, "link down");
        });

        let output = capture.0.lock().unwrap().clone();
        assert!(output.contains(":warning:"), "{output}");
        assert!(output.ends_with(":net: link down peer=7\n"), "{output}");
    }

    #[test]
    fn unknown_targets_use_the_default_object() {
        let (logger, capture) = setup();

        let subscriber =
            tracing_subscriber::registry().with(RegistryLayer::new(Arc::clone(&logger)));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "elsewhere", "hello");
            tracing::debug!(target: "elsewhere", "filtered by the default mask");
        });

        let output = capture.0.lock().unwrap().clone();
        assert!(output.contains(":info:"), "{output}");
        assert!(output.ends_with(":log: hello\n"), "{output}");
        assert_eq!(output.lines().count(), 1);
    }
}

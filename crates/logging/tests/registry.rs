//! Integration tests for handler and object registration.

use std::sync::{Arc, Mutex};

use logging::{
    ChannelTarget, Error, Level, LogHandler, LogMask, LogObject, Logger, LoggerConfig, log_info,
};
use test_support::{FixedClock, FixedThreadContext, RecordingChannel};

fn logger() -> Logger {
    Logger::builder()
        .config(LoggerConfig::default().with_default_channel(ChannelTarget::Disabled))
        .clock(Arc::new(FixedClock::at(0, 0)))
        .thread_context(Arc::new(FixedThreadContext::new("t", LogMask::ALL)))
        .build()
        .expect("logger builds")
}

type Order = Arc<Mutex<Vec<&'static str>>>;

/// Adds a handler that records `tag` into `order` whenever a record begins.
fn tagged(logger: &Logger, tag: &'static str, order: &Order) -> LogHandler {
    struct Tag {
        tag: &'static str,
        order: Order,
    }

    impl logging::LogChannel for Tag {
        fn write_fmt(&self, _args: std::fmt::Arguments<'_>) -> std::io::Result<()> {
            Ok(())
        }

        fn control(&self, signal: logging::ControlSignal) -> std::io::Result<()> {
            if signal == logging::ControlSignal::LogBegin {
                self.order.lock().unwrap().push(self.tag);
            }
            Ok(())
        }
    }

    let handler = LogHandler::new(Arc::new(Tag {
        tag,
        order: Arc::clone(order),
    }));
    logger.add_handler(&handler).unwrap();
    handler
}

// ============================================================================
// Handlers
// ============================================================================

/// The newest handler is written first.
#[test]
fn newest_handler_receives_records_first() {
    let logger = logger();
    let order = Order::default();
    let _first = tagged(&logger, "first", &order);
    let _second = tagged(&logger, "second", &order);

    assert_eq!(log_info!(logger, None, "x"), 2);
    assert_eq!(*order.lock().unwrap(), ["second", "first"]);
}

/// Removing a handler stops its output and restores the count.
#[test]
fn removed_handler_receives_nothing() {
    let logger = logger();
    let channel = Arc::new(RecordingChannel::new());
    let handler = LogHandler::new(channel.clone());
    logger.add_handler(&handler).unwrap();
    assert!(handler.is_registered());

    logger.remove_handler(&handler).unwrap();
    assert!(!handler.is_registered());
    assert_eq!(logger.handler_count(), 1);
    assert_eq!(log_info!(logger, None, "x"), 0);
    assert!(channel.events().is_empty());
}

/// Removing a handler that was never added reports `NotFound` and leaves
/// the registry untouched.
#[test]
fn removing_unknown_handler_is_not_found() {
    let logger = logger();
    let stranger = LogHandler::new(Arc::new(RecordingChannel::new()));

    let error = logger.remove_handler(&stranger).unwrap_err();
    assert!(matches!(error, Error::NotFound(_)));
    assert_eq!(error.code(), -2);
    assert_eq!(logger.handler_count(), 1);
}

/// The default handler is never removable.
#[test]
fn default_handler_cannot_be_removed() {
    let logger = logger();
    let default = logger.default_handler();
    assert!(logger.remove_handler(&default).is_err());
    assert_eq!(logger.handler_count(), 1);
}

/// Swapping the default channel keeps the default handler itself, so earlier
/// handles stay registered and observe the new channel.
#[test]
fn default_handler_survives_channel_swap() {
    let logger = logger();
    let before = logger.default_handler();
    assert!(before.channel().is_none());

    let channel = Arc::new(RecordingChannel::new());
    logger.set_default_handler_output_channel(Some(channel.clone()));

    assert!(before.ptr_eq(&logger.default_handler()));
    assert!(before.is_registered());
    assert!(before.channel().is_some());
    assert_eq!(log_info!(logger, None, "after swap"), 1);
    assert_eq!(channel.records(), ["0.000:info:t:default: after swap"]);

    logger.set_default_handler_output_channel(None);
    assert!(before.channel().is_none());
    assert!(matches!(logger.add_handler(&before), Err(Error::InvalidArgument(_))));
}

/// A handler belongs to at most one registry.
#[test]
fn double_add_is_rejected() {
    let logger = logger();
    let other = self::logger();
    let handler = LogHandler::new(Arc::new(RecordingChannel::new()));
    logger.add_handler(&handler).unwrap();

    assert!(matches!(logger.add_handler(&handler), Err(Error::InvalidArgument(_))));
    assert!(matches!(other.add_handler(&handler), Err(Error::InvalidArgument(_))));
    assert_eq!(logger.handler_count(), 2);

    logger.remove_handler(&handler).unwrap();
    other.add_handler(&handler).unwrap();
}

// ============================================================================
// Objects
// ============================================================================

/// Objects are listed default first, then newest first.
#[test]
fn objects_are_listed_in_registry_order() {
    let logger = logger();
    let net = LogObject::new("net", LogMask::up_to(Level::Warning)).unwrap();
    let fs = LogObject::new("fs", LogMask::ALL).unwrap();
    logger.add_object(&net).unwrap();
    logger.add_object(&fs).unwrap();

    let listed = logger.list_objects();
    let names: Vec<_> = listed.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["log", "fs", "net"]);
    assert_eq!(listed[2].1, LogMask::up_to(Level::Warning));
}

/// Names are not unique; setting a mask by name updates every match.
#[test]
fn set_mask_by_name_updates_all_matches() {
    let logger = logger();
    let a = LogObject::new("io", LogMask::empty()).unwrap();
    let b = LogObject::new("io", LogMask::empty()).unwrap();
    logger.add_object(&a).unwrap();
    logger.add_object(&b).unwrap();

    assert_eq!(logger.set_mask_by_name("io", LogMask::ALL).unwrap(), 2);
    assert_eq!(a.mask(), LogMask::ALL);
    assert_eq!(b.mask(), LogMask::ALL);
    assert!(matches!(
        logger.set_mask_by_name("missing", LogMask::ALL),
        Err(Error::NotFound(_))
    ));
}

/// Removing an object that was never added terminates with `NotFound`.
#[test]
fn removing_unknown_object_is_not_found() {
    let logger = logger();
    let stranger = LogObject::new("stranger", LogMask::ALL).unwrap();
    assert!(matches!(logger.remove_object(&stranger), Err(Error::NotFound(_))));
    assert!(logger.remove_object(logger.default_object()).is_err());
    assert_eq!(logger.object_count(), 1);
}

/// Removal unlinks the object from name lookups.
#[test]
fn removed_object_disappears_from_lookups() {
    let logger = logger();
    let net = LogObject::new("net", LogMask::ALL).unwrap();
    logger.add_object(&net).unwrap();
    assert!(logger.find_object("net").is_some_and(|found| found.ptr_eq(&net)));

    logger.remove_object(&net).unwrap();
    assert!(logger.find_object("net").is_none());
    assert_eq!(logger.object_count(), 1);
}

/// Objects named in the configuration are registered at construction.
#[test]
fn configured_objects_are_preregistered() {
    let config = LoggerConfig::default()
        .with_default_channel(ChannelTarget::Disabled)
        .with_default_mask(LogMask::ALL)
        .with_object("net", LogMask::up_to(Level::Error));
    let logger = Logger::new(config).unwrap();

    assert_eq!(logger.object_count(), 2);
    assert_eq!(logger.default_object().mask(), LogMask::ALL);
    let net = logger.find_object("net").expect("preset object");
    assert_eq!(net.mask(), LogMask::up_to(Level::Error));
    assert!(net.is_registered());
}

/// Empty object names are rejected.
#[test]
fn empty_object_name_is_invalid() {
    assert!(matches!(
        LogObject::new("", LogMask::ALL),
        Err(Error::InvalidArgument(_))
    ));
}

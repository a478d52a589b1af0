//! Records written through a logger into append-mode files.

use std::sync::Arc;

use logging::{ChannelTarget, Level, LogHandler, LogMask, LogObject, Logger, LoggerConfig};
use logging_sink::{LineMode, WriterChannel};
use test_support::{FixedClock, FixedThreadContext, ScratchDir};

fn logger() -> Logger {
    Logger::builder()
        .config(LoggerConfig::default().with_default_channel(ChannelTarget::Disabled))
        .clock(Arc::new(FixedClock::at(7, 5)))
        .thread_context(Arc::new(FixedThreadContext::new("io", LogMask::ALL)))
        .build()
        .expect("logger builds")
}

#[test]
fn records_land_in_the_file_in_order() {
    let scratch = ScratchDir::new().unwrap();
    let path = scratch.file("app.log");
    let logger = logger();

    let channel = WriterChannel::append_to_file(&path).unwrap();
    channel.set_line_mode(LineMode::WithNewline);
    let handler = LogHandler::new(Arc::new(channel));
    logger.add_handler(&handler).unwrap();

    let db = LogObject::new("db", LogMask::up_to(Level::Warning)).unwrap();
    logger.add_object(&db).unwrap();

    logging::log_error!(logger, Some(&db), "connection refused");
    logging::log_debug!(logger, Some(&db), "not written");
    logging::log_warning!(logger, Some(&db), "retry {}", 2);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "7.005:error:io:db: connection refused\n\
         7.005:warning:io:db: retry 2\n"
    );
}

#[test]
fn reopening_appends_after_existing_records() {
    let scratch = ScratchDir::new().unwrap();
    let path = scratch.file("app.log");

    for round in 0..2 {
        let logger = logger();
        let handler = LogHandler::new(Arc::new(WriterChannel::append_to_file(&path).unwrap()));
        logger.add_handler(&handler).unwrap();
        logging::log_info!(logger, None, "round {round}\n");
    }

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.ends_with(":default: round 1\n"));
}

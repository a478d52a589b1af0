//! crates/logging/src/global.rs
//! Process-wide logger for callers that cannot thread a [`Logger`] through.

use std::sync::OnceLock;

use tracing::debug;

use crate::commands::CommandRegistrar;
use crate::config::LoggerConfig;
use crate::error::Result;
use crate::logger::Logger;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Initializes the process-wide logger with the default configuration.
///
/// Idempotent: the first call builds the logger, later calls return it
/// untouched.
pub fn init() -> Result<&'static Logger> {
    init_with(LoggerConfig::default(), None)
}

/// Initializes the process-wide logger from `config`, optionally binding
/// the admin commands to `registrar`.
///
/// Only the first call has any effect. Later calls ignore their arguments
/// and return the logger built by the first one; commands are registered
/// once, together with the first build.
pub fn init_with(
    config: LoggerConfig,
    registrar: Option<&mut dyn CommandRegistrar>,
) -> Result<&'static Logger> {
    if let Some(logger) = LOGGER.get() {
        debug!("logger already initialized");
        return Ok(logger);
    }

    let logger = Logger::new(config)?;
    let mut built_here = false;
    let logger = LOGGER.get_or_init(|| {
        built_here = true;
        logger
    });

    if built_here {
        if let Some(registrar) = registrar {
            logger.register_commands(registrar);
        }
        debug!("logger initialized");
    }

    Ok(logger)
}

/// Returns the process-wide logger if [`init`] has run.
pub fn global() -> Option<&'static Logger> {
    LOGGER.get()
}

/// Reports whether the process-wide logger exists.
pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

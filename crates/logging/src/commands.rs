//! crates/logging/src/commands.rs
//! Administrative entry points for an interactive command shell.
//!
//! The shell itself (argument splitting, command lookup, the output stream)
//! lives elsewhere. This module provides the three callbacks it binds under
//! `/debug/log/`, each validating its own arguments and reporting misuse on
//! the output stream instead of failing the process.

use std::io::{self, Write};

use crate::error::{EINVAL, Error};
use crate::levels::{Level, LogMask};
use crate::logger::Logger;

/// Path of the print command.
pub const PRINT_PATH: &str = "/debug/log/print";
/// Path of the list command.
pub const LIST_PATH: &str = "/debug/log/list";
/// Path of the set-mask command.
pub const SET_LOG_MASK_PATH: &str = "/debug/log/set_log_mask";

/// `EIO` reported when the command's output stream fails.
const EIO: i32 = 5;

/// Failure of an administrative command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Wrong number of arguments; carries the usage line.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// The registry rejected the request or an argument failed to parse.
    #[error(transparent)]
    Registry(#[from] Error),

    /// Writing to the command's output stream failed.
    #[error("command output failed: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    /// Negative status handed back to the shell.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Registry(_) => -EINVAL,
            Self::Io(_) => -EIO,
        }
    }
}

/// Signature shared by every command callback. `argv[0]` is the command name.
pub type CommandCallback =
    fn(&Logger, &[&str], &mut dyn Write) -> Result<(), CommandError>;

/// Facility commands are registered with.
pub trait CommandRegistrar {
    /// Binds `callback` to `path`.
    fn register(&mut self, path: &'static str, callback: CommandCallback);
}

/// Every command with its path.
pub const COMMANDS: [(&str, CommandCallback); 3] = [
    (PRINT_PATH, print),
    (LIST_PATH, list),
    (SET_LOG_MASK_PATH, set_log_mask),
];

fn usage(out: &mut dyn Write, line: &'static str) -> CommandError {
    match write!(out, "Usage: {line}\r\n") {
        Ok(()) => CommandError::Usage(line),
        Err(error) => error.into(),
    }
}

/// `print <string>`: logs `<string>` at info level on the default object.
pub fn print(logger: &Logger, argv: &[&str], out: &mut dyn Write) -> Result<(), CommandError> {
    let [_, text] = argv else {
        return Err(usage(out, "print <string>"));
    };

    logger.print(
        Some(logger.default_object()),
        Level::Info,
        format_args!("{text}\r\n"),
    );
    Ok(())
}

/// `list`: writes every registered object's name and mask.
///
/// The table is written while the registry lock is held so it reflects a
/// single consistent state.
pub fn list(logger: &Logger, argv: &[&str], out: &mut dyn Write) -> Result<(), CommandError> {
    if argv.len() != 1 {
        return Err(usage(out, "list"));
    }

    logger.with_objects(|objects| -> Result<(), CommandError> {
        write!(out, "OBJECT-NAME       MASK\r\n")?;
        for object in objects {
            write!(out, "{:<16}  {}\r\n", object.name(), object.mask())?;
        }
        Ok(())
    })
}

/// `set_log_mask <object> <mask>`: sets the mask of every object with that
/// name.
pub fn set_log_mask(
    logger: &Logger,
    argv: &[&str],
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let [_, name, text] = argv else {
        return Err(usage(out, "set_log_mask <object> <mask>"));
    };

    let mask = match LogMask::parse(text) {
        Ok(mask) => mask,
        Err(error) => {
            write!(out, "Bad mask '{text}'.\r\n")?;
            return Err(error.into());
        }
    };

    if let Err(error) = logger.set_mask_by_name(name, mask) {
        write!(out, "No log object with name '{name}'.\r\n")?;
        return Err(error.into());
    }

    Ok(())
}

impl Logger {
    /// Registers the print, list and set-mask commands with `registrar`.
    pub fn register_commands(&self, registrar: &mut dyn CommandRegistrar) {
        for (path, callback) in COMMANDS {
            registrar.register(path, callback);
        }
    }

    /// Runs the command bound to `path`.
    ///
    /// Unknown paths fail with [`Error::NotFound`].
    pub fn run_command(
        &self,
        path: &str,
        argv: &[&str],
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let (_, callback) = COMMANDS
            .into_iter()
            .find(|(candidate, _)| *candidate == path)
            .ok_or_else(|| Error::not_found(format!("no command at '{path}'")))?;
        callback(self, argv, out)
    }
}

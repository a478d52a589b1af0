// Syslog channel for daemons.
//
// Calls libc `openlog`/`syslog`/`closelog` directly. A record is buffered
// between `LogBegin` and `LogEnd` and handed to syslog(3) as one entry, with
// the priority taken from the level field of the record header.

use std::ffi::{CStr, CString};
use std::fmt::{self, Write as _};
use std::io;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use logging::{ControlSignal, Level, LogChannel};
use tracing::warn;

/// Syslog facility codes matching the POSIX syslog(3) constants.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogFacility {
    /// Kernel messages (LOG_KERN).
    Kern = libc::LOG_KERN,
    /// User-level messages (LOG_USER).
    User = libc::LOG_USER,
    /// Mail system (LOG_MAIL).
    Mail = libc::LOG_MAIL,
    /// System daemons (LOG_DAEMON).
    #[default]
    Daemon = libc::LOG_DAEMON,
    /// Security/authorization messages (LOG_AUTH).
    Auth = libc::LOG_AUTH,
    /// Messages generated internally by syslogd (LOG_SYSLOG).
    Syslog = libc::LOG_SYSLOG,
    /// Clock daemon (LOG_CRON).
    Cron = libc::LOG_CRON,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    const NAMED: [(&'static str, Self); 15] = [
        ("kern", Self::Kern),
        ("user", Self::User),
        ("mail", Self::Mail),
        ("daemon", Self::Daemon),
        ("auth", Self::Auth),
        ("syslog", Self::Syslog),
        ("cron", Self::Cron),
        ("local0", Self::Local0),
        ("local1", Self::Local1),
        ("local2", Self::Local2),
        ("local3", Self::Local3),
        ("local4", Self::Local4),
        ("local5", Self::Local5),
        ("local6", Self::Local6),
        ("local7", Self::Local7),
    ];

    /// Parses a case-insensitive facility name such as `"daemon"` or `"LOCAL3"`.
    ///
    /// ```
    /// # #[cfg(unix)]
    /// # {
    /// use logging_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("local8"), None);
    /// # }
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|&(_, facility)| facility)
    }

    /// Returns the lowercase facility name.
    pub fn as_str(self) -> &'static str {
        Self::NAMED
            .iter()
            .find(|&&(_, facility)| facility == self)
            .map_or("daemon", |&(name, _)| name)
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default ident passed to openlog(3).
pub const DEFAULT_SYSLOG_TAG: &str = "embedlog";

/// Facility and tag for the syslog connection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyslogConfig {
    facility: SyslogFacility,
    tag: String,
}

impl SyslogConfig {
    /// Creates a configuration with the given facility and tag.
    pub fn new(facility: SyslogFacility, tag: impl Into<String>) -> Self {
        Self {
            facility,
            tag: tag.into(),
        }
    }

    /// Returns the configured facility.
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Returns the configured tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Opens the syslog connection.
    ///
    /// syslog(3) keeps the ident pointer, so the first tag opened in a process
    /// is kept for its lifetime. Tags containing NUL fall back to
    /// [`DEFAULT_SYSLOG_TAG`]. The returned guard closes the connection when
    /// dropped.
    pub fn open(&self) -> SyslogGuard {
        static IDENT: OnceLock<CString> = OnceLock::new();
        let ident = IDENT.get_or_init(|| {
            CString::new(self.tag.as_str())
                .or_else(|_| {
                    warn!(tag = %self.tag, "syslog tag contains NUL, using default");
                    CString::new(DEFAULT_SYSLOG_TAG)
                })
                .unwrap_or_default()
        });

        // SAFETY: `ident` lives in a static for the rest of the process.
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_PID, self.facility as libc::c_int);
        }

        SyslogGuard { _private: () }
    }
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self::new(SyslogFacility::default(), DEFAULT_SYSLOG_TAG)
    }
}

/// Syslog severities matching the POSIX constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogPriority {
    /// Critical conditions (LOG_CRIT).
    Critical = libc::LOG_CRIT,
    /// Error conditions (LOG_ERR).
    Error = libc::LOG_ERR,
    /// Warning conditions (LOG_WARNING).
    Warning = libc::LOG_WARNING,
    /// Normal but significant condition (LOG_NOTICE).
    Notice = libc::LOG_NOTICE,
    /// Informational messages (LOG_INFO).
    Info = libc::LOG_INFO,
    /// Debug-level messages (LOG_DEBUG).
    Debug = libc::LOG_DEBUG,
}

impl From<Level> for SyslogPriority {
    fn from(level: Level) -> Self {
        match level {
            Level::Fatal => Self::Critical,
            Level::Error => Self::Error,
            Level::Warning => Self::Warning,
            Level::Info => Self::Info,
            Level::Debug => Self::Debug,
        }
    }
}

/// Sends `message` to syslog(3) at `priority`.
///
/// # Errors
///
/// Messages containing NUL cannot be passed to syslog(3); they are not sent
/// and an [`io::ErrorKind::InvalidInput`] error is returned.
pub fn syslog_message(priority: SyslogPriority, message: &str) -> io::Result<()> {
    const FORMAT: &CStr = c"%s";
    let message = CString::new(message)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    // SAFETY: both arguments are valid C strings and `%s` consumes exactly one.
    unsafe {
        libc::syslog(priority as libc::c_int, FORMAT.as_ptr(), message.as_ptr());
    }
    Ok(())
}

/// Closes the syslog connection when dropped.
#[derive(Debug)]
pub struct SyslogGuard {
    _private: (),
}

impl Drop for SyslogGuard {
    fn drop(&mut self) {
        // SAFETY: closelog has no preconditions.
        unsafe {
            libc::closelog();
        }
    }
}

/// A [`LogChannel`] forwarding each record to syslog(3).
///
/// The record is collected between [`ControlSignal::LogBegin`] and
/// [`ControlSignal::LogEnd`], trailing line terminators are stripped, and the
/// level field of the header (`<time>:<level>:...`) selects the priority.
/// Records whose header cannot be read use the fallback priority. A record
/// containing NUL is not sent; `LogEnd` fails so the logger reports it.
#[derive(Debug)]
pub struct SyslogChannel {
    pending: Mutex<String>,
    fallback: SyslogPriority,
}

impl SyslogChannel {
    /// Creates a channel; `fallback` applies to records without a header.
    pub fn new(fallback: SyslogPriority) -> Self {
        Self {
            pending: Mutex::new(String::new()),
            fallback,
        }
    }

    /// Priority for a complete record.
    pub fn priority_of(&self, record: &str) -> SyslogPriority {
        record
            .split(':')
            .nth(1)
            .and_then(|field| field.parse::<Level>().ok())
            .map_or(self.fallback, SyslogPriority::from)
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SyslogChannel {
    fn default() -> Self {
        Self::new(SyslogPriority::Info)
    }
}

impl LogChannel for SyslogChannel {
    fn write_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.lock()
            .write_fmt(args)
            .map_err(|_| io::Error::other("formatting a log record failed"))
    }

    fn control(&self, signal: ControlSignal) -> io::Result<()> {
        let mut pending = self.lock();
        match signal {
            ControlSignal::LogBegin => {
                pending.clear();
                Ok(())
            }
            ControlSignal::LogEnd => {
                let record = std::mem::take(&mut *pending);
                drop(pending);
                let record = record.trim_end_matches(['\r', '\n']);
                syslog_message(self.priority_of(record), record)
            }
        }
    }
}

//! crates/logging/src/levels.rs
//! Severity levels and the bitmask encoding used by log objects.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Severity of a log record.
///
/// The discriminant doubles as the bit index inside a [`LogMask`]. `Fatal`
/// occupies the lowest bit and `Debug` the highest, so "everything up to a
/// level" is a contiguous run of low bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Level {
    /// Unrecoverable condition.
    Fatal = 0,
    /// Operation failed.
    Error = 1,
    /// Something unexpected that the caller recovered from.
    Warning = 2,
    /// Normal operational message.
    Info = 3,
    /// Developer diagnostics.
    Debug = 4,
}

impl Level {
    /// All levels ordered from highest to lowest priority.
    pub const ALL: [Self; 5] = [
        Self::Fatal,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Debug,
    ];

    /// Returns the bit index of this level inside a [`LogMask`].
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the single-bit mask selecting this level.
    #[must_use]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Returns the lower-case name written into record headers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::bad_input(format!("unknown log level '{s}'")))
    }
}

/// Set of enabled [`Level`]s.
///
/// Only the five defined bits are ever stored; every constructor taking raw
/// bits discards the rest.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub struct LogMask(u8);

impl LogMask {
    /// Mask with every defined level enabled.
    pub const ALL: Self = Self(0x1f);

    /// Mask with every level disabled.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds a mask from raw bits, dropping bits outside [`LogMask::ALL`].
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Returns the mask enabling `level` and every higher-priority level.
    ///
    /// ```
    /// use logging::{Level, LogMask};
    ///
    /// let mask = LogMask::up_to(Level::Warning);
    /// assert!(mask.contains(Level::Fatal));
    /// assert!(mask.contains(Level::Warning));
    /// assert!(!mask.contains(Level::Info));
    /// assert_eq!(mask.bits(), 0x07);
    /// ```
    #[must_use]
    pub const fn up_to(level: Level) -> Self {
        Self((level.bit() << 1) - 1)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Reports whether `level` is enabled.
    #[must_use]
    pub const fn contains(self, level: Level) -> bool {
        self.0 & level.bit() != 0
    }

    /// Reports whether no level is enabled.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Enables `level`.
    pub fn insert(&mut self, level: Level) {
        self.0 |= level.bit();
    }

    /// Disables `level`.
    pub fn remove(&mut self, level: Level) {
        self.0 &= !level.bit();
    }

    /// Iterates over the enabled levels, highest priority first.
    pub fn levels(self) -> impl Iterator<Item = Level> {
        Level::ALL.into_iter().filter(move |level| self.contains(*level))
    }

    /// Parses a textual integer the way the `set_log_mask` command does.
    ///
    /// Accepts an optional sign followed by a decimal, `0x` hexadecimal, `0b`
    /// binary or leading-zero octal number. The value is truncated to a byte
    /// and then sanitized, so `-1` enables every level.
    ///
    /// ```
    /// use logging::LogMask;
    ///
    /// assert_eq!(LogMask::parse("0x0f").unwrap().bits(), 0x0f);
    /// assert_eq!(LogMask::parse("255").unwrap(), LogMask::ALL);
    /// assert!(LogMask::parse("lots").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let bad = || Error::bad_input(format!("bad mask '{text}'"));
        let trimmed = text.trim();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (radix, digits) = if let Some(rest) = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
        {
            (16, rest)
        } else if let Some(rest) = digits
            .strip_prefix("0b")
            .or_else(|| digits.strip_prefix("0B"))
        {
            (2, rest)
        } else if digits.len() > 1 && digits.starts_with('0') {
            (8, &digits[1..])
        } else {
            (10, digits)
        };

        if digits.is_empty() || digits.starts_with(['+', '-']) {
            return Err(bad());
        }

        let magnitude = i64::from_str_radix(digits, radix).map_err(|_| bad())?;
        let value = if negative { -magnitude } else { magnitude };
        Ok(Self::from_bits_truncate(value as u8))
    }
}

impl fmt::Debug for LogMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.levels()).finish()
    }
}

impl fmt::Display for LogMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

impl From<u8> for LogMask {
    fn from(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl From<LogMask> for u8 {
    fn from(mask: LogMask) -> Self {
        mask.bits()
    }
}

impl From<Level> for LogMask {
    fn from(level: Level) -> Self {
        Self(level.bit())
    }
}

impl BitOr for LogMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Level> for LogMask {
    type Output = Self;

    fn bitor(self, rhs: Level) -> Self {
        Self(self.0 | rhs.bit())
    }
}

impl BitOrAssign<Level> for LogMask {
    fn bitor_assign(&mut self, rhs: Level) {
        self.insert(rhs);
    }
}

impl BitAnd for LogMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod level_tests {
        use super::*;

        #[test]
        fn bits_follow_priority_order() {
            assert_eq!(Level::Fatal.bit(), 0x01);
            assert_eq!(Level::Error.bit(), 0x02);
            assert_eq!(Level::Warning.bit(), 0x04);
            assert_eq!(Level::Info.bit(), 0x08);
            assert_eq!(Level::Debug.bit(), 0x10);
        }

        #[test]
        fn names_match_header_spelling() {
            let names: Vec<_> = Level::ALL.iter().map(|level| level.as_str()).collect();
            assert_eq!(names, ["fatal", "error", "warning", "info", "debug"]);
        }

        #[test]
        fn parse_is_case_insensitive() {
            assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warning);
            assert_eq!(" debug ".parse::<Level>().unwrap(), Level::Debug);
        }

        #[test]
        fn parse_rejects_unknown_names() {
            let err = "trace".parse::<Level>().unwrap_err();
            assert!(matches!(err, Error::BadInput(_)));
        }
    }

    mod mask_tests {
        use super::*;

        #[test]
        fn up_to_covers_higher_priorities() {
            assert_eq!(LogMask::up_to(Level::Fatal).bits(), 0x01);
            assert_eq!(LogMask::up_to(Level::Info).bits(), 0x0f);
            assert_eq!(LogMask::up_to(Level::Debug), LogMask::ALL);
        }

        #[test]
        fn from_bits_truncate_drops_undefined_bits() {
            assert_eq!(LogMask::from_bits_truncate(0xff), LogMask::ALL);
            assert_eq!(LogMask::from_bits_truncate(0xe0), LogMask::empty());
        }

        #[test]
        fn insert_and_remove_toggle_single_bits() {
            let mut mask = LogMask::empty();
            mask.insert(Level::Error);
            mask |= Level::Debug;
            assert_eq!(mask.bits(), 0x12);
            mask.remove(Level::Error);
            assert_eq!(mask, LogMask::from(Level::Debug));
        }

        #[test]
        fn display_matches_list_column() {
            assert_eq!(LogMask::up_to(Level::Info).to_string(), "0x0f");
            assert_eq!(LogMask::empty().to_string(), "0x00");
        }

        #[test]
        fn debug_lists_levels() {
            let rendered = format!("{:?}", LogMask::up_to(Level::Error));
            assert_eq!(rendered, "{Fatal, Error}");
        }

        #[test]
        fn parse_accepts_common_radixes() {
            assert_eq!(LogMask::parse("7").unwrap().bits(), 0x07);
            assert_eq!(LogMask::parse("0x1f").unwrap().bits(), 0x1f);
            assert_eq!(LogMask::parse("0b101").unwrap().bits(), 0x05);
            assert_eq!(LogMask::parse("017").unwrap().bits(), 0x0f);
            assert_eq!(LogMask::parse("0").unwrap(), LogMask::empty());
        }

        #[test]
        fn parse_truncates_like_a_byte() {
            assert_eq!(LogMask::parse("-1").unwrap(), LogMask::ALL);
            assert_eq!(LogMask::parse("256").unwrap(), LogMask::empty());
        }

        #[test]
        fn parse_rejects_garbage() {
            for text in ["", "x", "0x", "12abc", "--1", "0xzz"] {
                assert!(LogMask::parse(text).is_err(), "{text:?} should fail");
            }
        }
    }
}

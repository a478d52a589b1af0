//! crates/logging/src/config.rs
//! Construction-time configuration for a [`Logger`](crate::Logger).

use crate::levels::{Level, LogMask};

/// Name of the default log object.
pub const DEFAULT_OBJECT_NAME: &str = "log";

/// Mask the default log object starts with.
pub const DEFAULT_OBJECT_MASK: LogMask = LogMask::up_to(Level::Info);

/// Where the default handler writes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChannelTarget {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// No channel; the default handler delivers nothing.
    Disabled,
}

/// Time source used for record headers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ClockKind {
    /// Seconds since the Unix epoch.
    #[default]
    System,
    /// Seconds since the logger was built.
    Monotonic,
}

/// Log object registered when the logger is built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectConfig {
    /// Object name.
    pub name: String,
    /// Initial mask.
    pub mask: LogMask,
}

impl ObjectConfig {
    /// Creates a preset object entry.
    pub fn new(name: impl Into<String>, mask: LogMask) -> Self {
        Self {
            name: name.into(),
            mask,
        }
    }
}

/// Configuration consumed by [`Logger::new`](crate::Logger::new).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LoggerConfig {
    /// Name of the sentinel log object.
    pub default_object_name: String,
    /// Initial mask of the sentinel log object.
    pub default_mask: LogMask,
    /// Channel of the sentinel handler.
    pub default_channel: ChannelTarget,
    /// Time source.
    pub clock: ClockKind,
    /// Objects registered at construction, in order.
    pub objects: Vec<ObjectConfig>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            default_object_name: DEFAULT_OBJECT_NAME.to_owned(),
            default_mask: DEFAULT_OBJECT_MASK,
            default_channel: ChannelTarget::default(),
            clock: ClockKind::default(),
            objects: Vec::new(),
        }
    }
}

impl LoggerConfig {
    /// Sets the sentinel object's mask.
    pub fn with_default_mask(mut self, mask: LogMask) -> Self {
        self.default_mask = mask;
        self
    }

    /// Sets the sentinel handler's channel.
    pub fn with_default_channel(mut self, target: ChannelTarget) -> Self {
        self.default_channel = target;
        self
    }

    /// Sets the time source.
    pub fn with_clock(mut self, clock: ClockKind) -> Self {
        self.clock = clock;
        self
    }

    /// Adds an object registered at construction.
    pub fn with_object(mut self, name: impl Into<String>, mask: LogMask) -> Self {
        self.objects.push(ObjectConfig::new(name, mask));
        self
    }

    /// Parses a configuration from TOML text.
    ///
    /// ```
    /// # #[cfg(feature = "serde")]
    /// # {
    /// use logging::{ChannelTarget, LoggerConfig};
    ///
    /// let config = LoggerConfig::from_toml_str(r#"
    ///     default_channel = "stderr"
    ///     default_mask = 7
    ///
    ///     [[objects]]
    ///     name = "net"
    ///     mask = 31
    /// "#).unwrap();
    ///
    /// assert_eq!(config.default_channel, ChannelTarget::Stderr);
    /// assert_eq!(config.objects[0].name, "net");
    /// # }
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> crate::Result<Self> {
        toml::from_str(text).map_err(|e| crate::Error::bad_input(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_module_init() {
        let config = LoggerConfig::default();
        assert_eq!(config.default_object_name, "log");
        assert_eq!(config.default_mask.bits(), 0x0f);
        assert_eq!(config.default_channel, ChannelTarget::Stdout);
        assert_eq!(config.clock, ClockKind::System);
        assert!(config.objects.is_empty());
    }

    #[test]
    fn builder_methods_accumulate() {
        let config = LoggerConfig::default()
            .with_default_mask(LogMask::ALL)
            .with_default_channel(ChannelTarget::Disabled)
            .with_clock(ClockKind::Monotonic)
            .with_object("net", LogMask::up_to(Level::Warning))
            .with_object("fs", LogMask::empty());

        assert_eq!(config.default_mask, LogMask::ALL);
        assert_eq!(config.default_channel, ChannelTarget::Disabled);
        assert_eq!(config.clock, ClockKind::Monotonic);
        let names: Vec<_> = config.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["net", "fs"]);
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn toml_fills_missing_fields_with_defaults() {
            let config = LoggerConfig::from_toml_str("clock = \"monotonic\"").unwrap();
            assert_eq!(config.clock, ClockKind::Monotonic);
            assert_eq!(config.default_object_name, "log");
        }

        #[test]
        fn toml_masks_are_sanitized() {
            let config = LoggerConfig::from_toml_str("default_mask = 255").unwrap();
            assert_eq!(config.default_mask, LogMask::ALL);
        }

        #[test]
        fn unknown_fields_are_bad_input() {
            let err = LoggerConfig::from_toml_str("colour = true").unwrap_err();
            assert!(matches!(err, crate::Error::BadInput(_)));
        }

        #[test]
        fn json_round_trip() {
            let config = LoggerConfig::default().with_object("net", LogMask::ALL);
            let json = serde_json::to_string(&config).unwrap();
            let parsed: LoggerConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, config);
        }
    }
}

//! crates/logging/src/error.rs
//! Error types shared by the registries and the admin commands.

/// `EINVAL` as returned to the command shell.
pub const EINVAL: i32 = 22;

/// `ENOENT` as reported by [`Error::code`] for missing nodes.
pub const ENOENT: i32 = 2;

/// Failure reported by registry operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required argument is missing or unusable at an API boundary.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested node or name is not present in the registry.
    #[error("not found: {0}")]
    NotFound(String),

    /// Externally supplied text failed to parse.
    #[error("bad input: {0}")]
    BadInput(String),
}

impl Error {
    pub(crate) fn invalid_argument(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }

    pub(crate) fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    pub(crate) fn bad_input(detail: impl Into<String>) -> Self {
        Self::BadInput(detail.into())
    }

    /// Returns the negative errno-style status for this error.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) | Self::BadInput(_) => -EINVAL,
            Self::NotFound(_) => -ENOENT,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_negative_errno_values() {
        assert_eq!(Error::invalid_argument("x").code(), -22);
        assert_eq!(Error::bad_input("x").code(), -22);
        assert_eq!(Error::not_found("x").code(), -2);
    }

    #[test]
    fn display_includes_detail() {
        let error = Error::not_found("handler is not registered");
        assert_eq!(error.to_string(), "not found: handler is not registered");
    }
}

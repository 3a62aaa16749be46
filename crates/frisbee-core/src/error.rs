//! Error types for query URL construction.
//!
//! Every failure is reported as a value of [`Error`]; nothing is retried or
//! recovered internally, and no partially built URL is ever returned.

use std::fmt::Display;
use thiserror::Error;

/// Main error type for building URLs with query strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The base string is not a valid absolute URL
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected input
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A record field held a value that cannot become a query value
    #[error("Unsupported query value: {0}")]
    UnsupportedValue(String),

    /// Two fields of one record share a wire name
    #[error("Duplicate query field: {0}")]
    DuplicateField(String),
}

/// Specialized result type for query URL construction.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an [`Error::InvalidUrl`] for the given input.
    pub fn invalid_url(url: impl Into<String>, reason: impl Display) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "INVALID_URL",
            Self::UnsupportedValue(_) => "UNSUPPORTED_VALUE",
            Self::DuplicateField(_) => "DUPLICATE_FIELD",
        }
    }

    /// Returns true if the base URL was rejected.
    #[must_use]
    pub const fn is_invalid_url(&self) -> bool {
        matches!(self, Self::InvalidUrl { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::UnsupportedValue(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::invalid_url("x", "relative URL without a base").error_code(),
            "INVALID_URL"
        );
        assert_eq!(
            Error::UnsupportedValue("seq".to_string()).error_code(),
            "UNSUPPORTED_VALUE"
        );
        assert_eq!(
            Error::DuplicateField("page".to_string()).error_code(),
            "DUPLICATE_FIELD"
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_url("http://", "empty host");
        assert_eq!(err.to_string(), "Invalid URL 'http://': empty host");

        let err = Error::DuplicateField("page".to_string());
        assert_eq!(err.to_string(), "Duplicate query field: page");
    }

    #[test]
    fn test_is_invalid_url() {
        assert!(Error::invalid_url("x", "bad").is_invalid_url());
        assert!(!Error::UnsupportedValue("x".to_string()).is_invalid_url());
        assert!(!Error::DuplicateField("x".to_string()).is_invalid_url());
    }

    #[test]
    fn test_custom_serde_error() {
        let err = <Error as serde::ser::Error>::custom("boom");
        assert_eq!(err, Error::UnsupportedValue("boom".to_string()));
    }

    #[test]
    fn test_error_clone() {
        let err = Error::invalid_url("a", "b");
        assert_eq!(err.clone(), err);
    }
}

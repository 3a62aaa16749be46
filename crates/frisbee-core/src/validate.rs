//! Strict character validation for base URL strings.
//!
//! The WHATWG parser behind [`url::Url`] is lenient: it IDNA-encodes raw
//! Unicode hosts and percent-encodes stray characters. In strict mode a base
//! string must already be a well-formed RFC 3986 URI reference, so only the
//! unreserved, reserved and percent-escape characters are accepted.

use thiserror::Error;

/// A character-level defect in a base URL string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlCharError {
    /// The input is empty
    #[error("input is empty")]
    Empty,
    /// A raw non-ASCII character was found
    #[error("non-ASCII character '{char}' at position {position}")]
    NonAscii {
        /// The offending character
        char: char,
        /// Byte offset in the input
        position: usize,
    },
    /// An ASCII character outside the RFC 3986 set was found
    #[error("character {char:?} at position {position} is not allowed in a URL")]
    Disallowed {
        /// The offending character
        char: char,
        /// Byte offset in the input
        position: usize,
    },
    /// A `%` not followed by two hex digits
    #[error("malformed percent escape at position {position}")]
    BadPercentEscape {
        /// Byte offset of the `%`
        position: usize,
    },
}

/// Returns true for characters RFC 3986 allows outside of percent escapes.
#[must_use]
pub const fn is_uri_char(b: u8) -> bool {
    matches!(
        b,
        b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-' | b'.' | b'_' | b'~'
            | b':' | b'/' | b'?' | b'#' | b'[' | b']' | b'@'
            | b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

/// Check that `input` only uses characters valid in an RFC 3986 URI.
///
/// # Errors
///
/// Returns the first defect found, scanning left to right.
pub fn check_uri_chars(input: &str) -> Result<(), UrlCharError> {
    if input.is_empty() {
        return Err(UrlCharError::Empty);
    }

    let bytes = input.as_bytes();
    for (position, c) in input.char_indices() {
        if !c.is_ascii() {
            return Err(UrlCharError::NonAscii { char: c, position });
        }
        if c == '%' {
            let hex = bytes.get(position + 1..position + 3);
            if !matches!(hex, Some([a, b]) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit()) {
                return Err(UrlCharError::BadPercentEscape { position });
            }
        } else if !is_uri_char(c as u8) {
            return Err(UrlCharError::Disallowed { char: c, position });
        }
    }

    Ok(())
}

//! Error types for TJSON decoding and encoding.
//!
//! TJSON distinguishes two families of failure:
//!
//! - **Parse errors**: the text is valid JSON but not valid TJSON (bad tag,
//!   malformed tag body, out-of-range integer, duplicate member name, illegal
//!   member name type, non-container toplevel)
//! - **Encode errors**: a value tree cannot be written as TJSON (illegal member
//!   name type, non-container toplevel, non-finite float)
//!
//! Errors from the underlying JSON parser are carried through unchanged as
//! [`Error::Syntax`].
//!
//! The messages of parse and encode errors are stable and meant to be matched
//! on; `Display` prints them without any prefix.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tjson::{decode, Error};
//!
//! let err = decode(r#"["i:9223372036854775808"]"#).unwrap_err();
//! assert!(err.is_parse());
//! assert_eq!(err.to_string(), "oversized integer: 9223372036854775808");
//! ```

use std::fmt;
use thiserror::Error;

pub(crate) const NON_CONTAINER_TOPLEVEL: &str =
    "Toplevel elements other than object or array are disallowed";
pub(crate) const INVALID_MEMBER_NAME: &str = "Object member names must be text or binary";
pub(crate) const MISSING_TAG_DELIMITER: &str = "Invalid tag (missing ':' delimeter)";
pub(crate) const UNTAGGED_LITERAL: &str = "Untagged null and boolean values are disallowed";

/// All errors produced while decoding or encoding TJSON.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input is not valid TJSON.
    #[error("{0}")]
    Parse(String),

    /// The value cannot be represented as TJSON.
    #[error("{0}")]
    Encode(String),

    /// The input is not valid JSON. The message comes straight from the JSON parser.
    #[error("{0}")]
    Syntax(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tjson::Error;
    ///
    /// let err = Error::parse("Base16 data must be lowercase");
    /// assert_eq!(err.to_string(), "Base16 data must be lowercase");
    /// ```
    pub fn parse<T: fmt::Display>(msg: T) -> Self {
        Error::Parse(msg.to_string())
    }

    /// Creates an encode error.
    pub fn encode<T: fmt::Display>(msg: T) -> Self {
        Error::Encode(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tjson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for TJSON decode violations.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Returns `true` for TJSON encode violations.
    #[must_use]
    pub const fn is_encode(&self) -> bool {
        matches!(self, Error::Encode(_))
    }

    /// Returns `true` when the input was rejected by the JSON parser itself.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Syntax(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

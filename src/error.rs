//! Error types for RVN serialization and deserialization.
//!
//! RVN deliberately keeps its parse-error surface small: every decode failure
//! — truncated input, a malformed digit run, an unknown escape, an integer
//! that overflows its target width, a missing delimiter — is reported as
//! [`Error::TooShort`] carrying the byte offset of the failure cursor. The
//! codec never synthesizes prose for parse failures; localizing the offending
//! byte is the caller's diagnostic hook.
//!
//! Two further variants exist for the surrounding machinery: [`Error::Message`]
//! carries serde-originated diagnostics (derive-generated messages, encode
//! requests the format cannot express), and [`Error::Io`] wraps reader/writer
//! failures from [`to_writer`](crate::to_writer) and
//! [`from_reader`](crate::from_reader).
//!
//! ## Examples
//!
//! ```rust
//! use serde_rvn::{from_str, Error};
//!
//! let result: Result<Vec<u8>, Error> = from_str("[0,1,");
//! let err = result.unwrap_err();
//! assert!(err.offset().is_some());
//! ```

use std::fmt;
use thiserror::Error;

/// All errors that can occur during RVN serialization or deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A decode failure. The input was truncated or malformed at `offset`
    /// (a byte index into the original input).
    #[error("malformed or truncated input at byte {offset}")]
    TooShort { offset: usize },

    /// IO error while reading or writing.
    #[error("IO error: {0}")]
    Io(String),

    /// A message produced by serde, or by an encode request the format
    /// cannot express (non-finite floats, non-string map keys).
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a decode failure at the given byte offset.
    pub(crate) fn too_short(offset: usize) -> Self {
        Error::TooShort { offset }
    }

    /// Returns the failure offset of a decode error, if this is one.
    ///
    /// After [`from_str_partial`](crate::from_str_partial) fails, slicing the
    /// input at this offset recovers the unconsumed suffix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_rvn::from_str;
    ///
    /// let err = from_str::<bool>("Bool.maybe").unwrap_err();
    /// assert_eq!(err.offset(), Some(0));
    /// ```
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::TooShort { offset } => Some(*offset),
            _ => None,
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

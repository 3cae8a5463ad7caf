//! Error types for CKT decoding and encoding.
//!
//! Every failure is fatal and carries enough context to locate it:
//!
//! - **Lexical errors**: a character no token accepts, or a truncated hex escape
//! - **Parse errors**: a missing value, a table on the left of `=`, or nesting
//!   beyond the configured depth
//! - **Cyclic references**: a table that contains itself while encoding
//! - **I/O and custom errors**: raised through the serde bridge and the
//!   reader/writer entry points
//!
//! Decode errors render as `ckt <line>:<col> <reason>`, where the position is
//! the start of the token that triggered the failure.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ckt::{decode, Category};
//!
//! let err = decode("key = [ nested").unwrap_err();
//! assert_eq!(err.category(), Category::Syntax);
//! assert_eq!(err.to_string(), "ckt 1:15 expected value");
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while decoding or encoding CKT.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The scanner met input that starts no token, or a malformed escape.
    #[error("ckt {line}:{col} {msg}")]
    Lex { line: usize, col: usize, msg: String },

    /// The token stream does not follow the grammar.
    #[error("ckt {line}:{col} {msg}")]
    Parse { line: usize, col: usize, msg: String },

    /// A table was reached again while it was still being encoded.
    #[error("ckt: cyclic reference")]
    CyclicReference,

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

/// Broad classification of an [`Error`].
///
/// `Syntax` covers everything [`decode`](crate::decode) can raise, `Type`
/// is the cycle failure of [`encode`](crate::encode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Syntax,
    Type,
    Data,
    Io,
}

impl Error {
    /// Creates a lexical error at the given 1-based position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ckt::Error;
    ///
    /// let err = Error::lex(2, 7, "unexpected character");
    /// assert_eq!(err.to_string(), "ckt 2:7 unexpected character");
    /// ```
    pub fn lex(line: usize, col: usize, msg: &str) -> Self {
        Error::Lex {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a grammar error at the given 1-based position.
    pub fn parse(line: usize, col: usize, msg: &str) -> Self {
        Error::Parse {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ckt::Error;
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

    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Error::Lex { .. } | Error::Parse { .. } => Category::Syntax,
            Error::CyclicReference => Category::Type,
            Error::Io(_) => Category::Io,
            Error::Custom(_) => Category::Data,
        }
    }

    /// Line of a decode error, `None` for everything else.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Lex { line, .. } | Error::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Column of a decode error, `None` for everything else.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Error::Lex { col, .. } | Error::Parse { col, .. } => Some(*col),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_format() {
        let err = Error::parse(3, 12, "unexpected =");
        assert_eq!(err.to_string(), "ckt 3:12 unexpected =");
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.column(), Some(12));
        assert_eq!(err.category(), Category::Syntax);
    }

    #[test]
    fn test_cycle_error_format() {
        let err = Error::CyclicReference;
        assert_eq!(err.to_string(), "ckt: cyclic reference");
        assert_eq!(err.category(), Category::Type);
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err = Error::from(io);
        assert_eq!(err.category(), Category::Io);
        assert!(err.to_string().contains("short read"));
    }
}

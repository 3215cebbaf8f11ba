//! Error types for packing, encoding and decoding.
//!
//! Every failure is fatal to the call that raised it: decoding never returns a
//! partially built [`Shape`](crate::Shape) and unpacking never returns a
//! partially built [`Value`](crate::Value).
//!
//! ## Error Categories
//!
//! - **Configuration**: invalid separator pair at construction
//! - **Malformed input**: unexpected character or wrong separator, with line/column
//! - **Unexpected end**: the source ran out before a value was complete
//! - **Unsupported kind**: an envelope tag or format name outside the closed set
//! - **Malformed node**: an envelope missing or mis-shaping a field its kind requires
//!
//! ## Examples
//!
//! ```rust
//! use tagpack::{Decoder, Error};
//!
//! let err = Decoder::default().decode_str("{\"a\":\"b\"").unwrap_err();
//! assert!(matches!(err, Error::UnexpectedEnd { .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the tagged model and its codecs.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Invalid separator configuration
    #[error("Invalid separators: {0}")]
    Config(String),

    /// Unexpected character in the input
    #[error("Malformed input at line {line}, column {col}: {msg}")]
    MalformedInput { line: usize, col: usize, msg: String },

    /// The source was exhausted before the value was complete
    #[error("Unexpected end of input at line {line}, column {col}: expected {expected}")]
    UnexpectedEnd {
        line: usize,
        col: usize,
        expected: String,
    },

    /// A kind tag or format name outside the supported set
    #[error("Unsupported kind: {0}")]
    UnsupportedKind(String),

    /// An envelope that does not carry the fields its kind requires
    #[error("Malformed node: {0}")]
    MalformedNode(String),

    /// Failure reported by a delegated format library
    #[error("{format} error: {msg}")]
    External { format: &'static str, msg: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a configuration error.
    pub fn config(msg: &str) -> Self {
        Error::Config(msg.to_string())
    }

    /// Creates a malformed input error at the given position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagpack::Error;
    ///
    /// let err = Error::malformed_input(3, 7, "unexpected character 'x'");
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn malformed_input(line: usize, col: usize, msg: &str) -> Self {
        Error::MalformedInput {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_end(line: usize, col: usize, expected: &str) -> Self {
        Error::UnexpectedEnd {
            line,
            col,
            expected: expected.to_string(),
        }
    }

    /// Creates an unsupported kind error.
    pub fn unsupported_kind(msg: &str) -> Self {
        Error::UnsupportedKind(msg.to_string())
    }

    /// Creates a malformed node error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagpack::Error;
    ///
    /// let err = Error::malformed_node("range envelope has no 'step' field");
    /// assert!(err.to_string().contains("'step'"));
    /// ```
    pub fn malformed_node(msg: &str) -> Self {
        Error::MalformedNode(msg.to_string())
    }

    /// Wraps a failure reported by a delegated format library.
    pub fn external<T: fmt::Display>(format: &'static str, msg: T) -> Self {
        Error::External {
            format,
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
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

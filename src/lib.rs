//! # tagpack
//!
//! A format-agnostic value-tagging model with a hand-written text codec.
//!
//! ## How it fits together
//!
//! A [`Value`] is packed into a tagged [`Node`], which becomes an *envelope*:
//! a plain [`Shape`] made only of strings, sequences and string-keyed
//! mappings. Any textual format that can carry those three things can carry
//! every value kind, including big integers, complex numbers, byte buffers and
//! ranges, without loss.
//!
//! ```text
//! Value --pack--> Node --to_envelope--> Shape --encode--> text
//! text --decode--> Shape --from_envelope--> Node --unpack--> Value
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tagpack::format::Serializer;
//! use tagpack::Value;
//!
//! let serializer = Serializer::text();
//! let value = Value::dict([("id", Value::from(7)), ("tags", Value::Set(vec!["a".into()]))]);
//!
//! let text = serializer.dumps(&value).unwrap();
//! assert!(text.starts_with(r#"{"type":"dict","value":[{"type":"tuple""#));
//! assert_eq!(serializer.loads(&text).unwrap(), value);
//! ```
//!
//! ### Working with Rust types
//!
//! Anything implementing `Serialize`/`Deserialize` goes through the same
//! envelopes:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use tagpack::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//! let text = to_string(&user).unwrap();
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ### The text codec on its own
//!
//! The [`Decoder`] and [`Encoder`] work on shapes directly and accept any
//! single-character separator pair:
//!
//! ```rust
//! use tagpack::{shape, Decoder, Encoder, Separators};
//!
//! let separators = Separators::new(";", "=").unwrap();
//! let text = Encoder::new(separators).encode(&shape!({"a": ["1", "2"]}));
//! assert_eq!(text, r#"{"a"=["1";"2"]}"#);
//! assert_eq!(Decoder::new(separators).decode_str(&text).unwrap(), shape!({"a": ["1", "2"]}));
//! ```
//!
//! ## Formats
//!
//! [`format::Format`] names the three built-in formats (`json`, `yaml`,
//! `toml`). The `tagpack` binary converts files between them.

pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
pub mod packer;
pub mod read;
pub mod ser;
pub mod shape;
pub mod value;

pub use de::Decoder;
pub use error::{Error, Result};
pub use map::ShapeMap;
pub use node::{BufferKind, Node, ScalarKind, SequenceKind};
pub use options::Separators;
pub use packer::{Environment, Packer};
pub use read::{CharSource, IoSource, StrSource};
pub use ser::Encoder;
pub use shape::Shape;
pub use value::de::from_value;
pub use value::ser::{to_value, ValueSerializer};
pub use value::{Complex, ParseComplexError, Value};

use format::{Serializer, TextCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serializes any `T: Serialize` to envelope text with default separators.
///
/// # Errors
///
/// Returns an error if the `Serialize` impl reports one.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_separators(value, Separators::default())
}

/// Serializes any `T: Serialize` to envelope text with custom separators.
///
/// # Examples
///
/// ```rust
/// use tagpack::{to_string_with_separators, Separators};
///
/// let text = to_string_with_separators(&true, Separators::new("|", "=").unwrap()).unwrap();
/// assert_eq!(text, r#"{"type"="bool"|"value"="True"}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the `Serialize` impl reports one.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_separators<T>(value: &T, separators: Separators) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Serializer::new(TextCodec::new(separators)).dumps(&to_value(value)?)
}

/// Serializes any `T: Serialize` to a writer as envelope text.
///
/// # Examples
///
/// ```rust
/// use tagpack::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Some(1u8)).unwrap();
/// assert_eq!(buffer, br#"{"type":"int","value":"1"}"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    Serializer::text().dump(&to_value(value)?, writer)
}

/// Deserializes a `T` from envelope text.
///
/// # Errors
///
/// Returns an error if the text is malformed, is not a valid envelope, or
/// does not fit `T`. Decoding errors carry line and column.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(Serializer::text().loads(s)?)
}

/// Deserializes a `T` from a stream of envelope text.
///
/// The stream is decoded incrementally; it is never read into memory whole.
///
/// # Errors
///
/// Returns an error if reading fails, or for any reason [`from_str`] would.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_value(Serializer::text().load(reader)?)
}

/// Deserializes a `T` from bytes of envelope text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, or for any reason
/// [`from_str`] would.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        scores: HashMap<String, f64>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = User {
            id: 123,
            name: "Alice \"A\" \u{1F980}".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            scores: [("math".to_string(), 0.5)].into_iter().collect(),
        };

        let text = to_string(&user).unwrap();
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_reader_and_slice() {
        let text = to_string(&vec![Some(1), None]).unwrap();
        let from_bytes: Vec<Option<i32>> = from_slice(text.as_bytes()).unwrap();
        let from_stream: Vec<Option<i32>> = from_reader(text.as_bytes()).unwrap();
        assert_eq!(from_bytes, vec![Some(1), None]);
        assert_eq!(from_stream, from_bytes);
    }

    #[test]
    fn test_custom_separators() {
        let separators = Separators::new(";", "=").unwrap();
        let text = to_string_with_separators(&Point { x: 1, y: 2 }, separators).unwrap();
        assert!(!text.contains(','));
        let value = Serializer::new(TextCodec::new(separators)).loads(&text).unwrap();
        assert_eq!(from_value::<Point>(value).unwrap(), Point { x: 1, y: 2 });
    }

    #[test]
    fn test_invalid_utf8_slice() {
        let result: Result<Point> = from_slice(&[0xff, 0xfe]);
        assert!(matches!(result, Err(Error::Custom(_))));
    }
}

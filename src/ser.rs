//! Text encoding.
//!
//! This module provides the [`Encoder`], the exact inverse of the
//! [`Decoder`](crate::Decoder): same grammar, same separators, same escape
//! table.
//!
//! Output is always compact: no whitespace is inserted and no separator
//! trails the last element.
//!
//! ```rust
//! use tagpack::{shape, Encoder};
//!
//! let text = Encoder::default().encode(&shape!({"a": "1", "b": "2"}));
//! assert_eq!(text, r#"{"a":"1","b":"2"}"#);
//! ```
//!
//! ## Escaping
//!
//! Backslash and quote are escaped, `0x00..=0x1F` become `\u00xx` unless a
//! short form (`\b \f \n \r \t`) exists, and `0x7F` becomes `\u007f`.
//! Everything else, including non-ASCII text, is written as is.

use crate::{Result, Separators, Shape};
use std::io;

/// Escape sequences for the C0 control characters, indexed by code point.
static CONTROL_ESCAPES: [&str; 0x20] = [
    "\\u0000", "\\u0001", "\\u0002", "\\u0003", "\\u0004", "\\u0005", "\\u0006", "\\u0007",
    "\\b", "\\t", "\\n", "\\u000b", "\\f", "\\r", "\\u000e", "\\u000f",
    "\\u0010", "\\u0011", "\\u0012", "\\u0013", "\\u0014", "\\u0015", "\\u0016", "\\u0017",
    "\\u0018", "\\u0019", "\\u001a", "\\u001b", "\\u001c", "\\u001d", "\\u001e", "\\u001f",
];

#[inline]
fn escape(ch: char) -> Option<&'static str> {
    match ch {
        '"' => Some("\\\""),
        '\\' => Some("\\\\"),
        '\u{7f}' => Some("\\u007f"),
        c if (c as u32) < 0x20 => Some(CONTROL_ESCAPES[c as usize]),
        _ => None,
    }
}

/// Renders shapes as text using a fixed pair of separators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Encoder {
    separators: Separators,
}

impl Encoder {
    #[must_use]
    pub const fn new(separators: Separators) -> Self {
        Encoder { separators }
    }

    #[must_use]
    pub const fn separators(&self) -> Separators {
        self.separators
    }

    /// Encodes a shape to a new string.
    #[must_use]
    pub fn encode(&self, shape: &Shape) -> String {
        let mut output = String::with_capacity(256);
        self.encode_into(shape, &mut output);
        output
    }

    /// Appends the encoding of a shape to `output`.
    pub fn encode_into(&self, shape: &Shape, output: &mut String) {
        match shape {
            Shape::Str(s) => write_string(output, s),
            Shape::List(items) => {
                output.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        output.push(self.separators.item());
                    }
                    self.encode_into(item, output);
                }
                output.push(']');
            }
            Shape::Map(map) => {
                output.push('{');
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        output.push(self.separators.item());
                    }
                    write_string(output, key);
                    output.push(self.separators.key());
                    self.encode_into(value, output);
                }
                output.push('}');
            }
        }
    }

    /// Encodes a shape into a writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if writing fails.
    pub fn encode_to_writer<W: io::Write>(&self, shape: &Shape, mut writer: W) -> Result<()> {
        writer.write_all(self.encode(shape).as_bytes())?;
        Ok(())
    }
}

/// Writes a quoted, escaped string.
#[inline]
fn write_string(output: &mut String, s: &str) {
    output.push('"');
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        if let Some(escaped) = escape(ch) {
            output.push_str(&s[start..i]);
            output.push_str(escaped);
            start = i + ch.len_utf8();
        }
    }
    output.push_str(&s[start..]);
    output.push('"');
}

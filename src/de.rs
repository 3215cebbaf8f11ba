//! Text decoding.
//!
//! This module provides the [`Decoder`], a hand-written recursive-descent parser
//! that turns text into a [`Shape`].
//!
//! ## Overview
//!
//! - **Single pass**: one character of lookahead, four more inside `\uXXXX`,
//!   no backtracking
//! - **Streaming**: reads from any [`CharSource`], including byte streams
//! - **Strict leaves**: every leaf is a quoted string; bare numbers, booleans
//!   and nulls are rejected
//! - **Error reporting**: line and column of the offending character
//!
//! Decoding stops as soon as the outermost value is closed. Anything after it
//! is left unread.
//!
//! ## Usage
//!
//! ```rust
//! use tagpack::{shape, Decoder};
//!
//! let decoder = Decoder::default();
//! let shape = decoder.decode_str(r#" ["x", "y"] "#).unwrap();
//! assert_eq!(shape, shape!(["x", "y"]));
//! ```
//!
//! ## Duplicate keys
//!
//! When a mapping repeats a key, the first pair wins. Later pairs with the same
//! key are still parsed, then dropped.
//!
//! ```rust
//! use tagpack::{shape, Decoder};
//!
//! let shape = Decoder::default().decode_str(r#"{"k":"1","k":"2"}"#).unwrap();
//! assert_eq!(shape, shape!({"k": "1"}));
//! ```

use crate::options::is_whitespace;
use crate::read::{CharSource, IoSource, StrSource};
use crate::{Error, Result, Separators, Shape, ShapeMap};
use std::io;
use tracing::debug;

/// Parses text into shapes using a fixed pair of separators.
///
/// A `Decoder` holds no per-call state and can be shared between threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoder {
    separators: Separators,
}

impl Decoder {
    #[must_use]
    pub const fn new(separators: Separators) -> Self {
        Decoder { separators }
    }

    #[must_use]
    pub const fn separators(&self) -> Separators {
        self.separators
    }

    /// Decodes one value from a character source.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] on an unexpected character or separator
    /// - [`Error::UnexpectedEnd`] if the source runs out mid-value
    /// - [`Error::Io`] if the source itself fails
    pub fn decode<S: CharSource>(&self, source: S) -> Result<Shape> {
        Parser::new(source, self.separators).parse_value()
    }

    /// Decodes one value from a string.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode`].
    pub fn decode_str(&self, input: &str) -> Result<Shape> {
        self.decode(StrSource::new(input))
    }

    /// Decodes one value from a UTF-8 byte stream.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode`].
    pub fn decode_reader<R: io::Read>(&self, reader: R) -> Result<Shape> {
        self.decode(IoSource::new(reader))
    }
}

/// Cursor over a character source with one slot of position bookkeeping.
///
/// `line`/`col` locate the most recently consumed character.
struct Parser<S> {
    source: S,
    separators: Separators,
    line: usize,
    col: usize,
}

impl<S: CharSource> Parser<S> {
    fn new(source: S, separators: Separators) -> Self {
        Parser {
            source,
            separators,
            line: 1,
            col: 0,
        }
    }

    fn next_char(&mut self) -> Result<Option<char>> {
        let next = self.source.next_char()?;
        if let Some(ch) = next {
            if ch == '\n' {
                self.line += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
        }
        Ok(next)
    }

    /// Next character, or `UnexpectedEnd` naming what was still required.
    fn require_char(&mut self, expected: &str) -> Result<char> {
        self.next_char()?
            .ok_or_else(|| Error::unexpected_end(self.line, self.col + 1, expected))
    }

    /// Next character that is not space, LF or CR.
    fn require_significant(&mut self, expected: &str) -> Result<char> {
        loop {
            let ch = self.require_char(expected)?;
            if !is_whitespace(ch) {
                return Ok(ch);
            }
        }
    }

    fn malformed(&self, msg: &str) -> Error {
        Error::malformed_input(self.line, self.col, msg)
    }

    fn parse_value(&mut self) -> Result<Shape> {
        let first = self.require_significant("a value")?;
        self.parse_value_from(first)
    }

    fn parse_value_from(&mut self, first: char) -> Result<Shape> {
        match first {
            '{' => self.parse_map(),
            '[' => self.parse_list(),
            '"' => Ok(Shape::Str(self.parse_string()?)),
            other => Err(self.malformed(&format!(
                "unexpected character {:?}, expected '{{', '[' or '\"'",
                other
            ))),
        }
    }

    /// Parses the rest of a string whose opening quote was consumed.
    fn parse_string(&mut self) -> Result<String> {
        let mut buf = String::new();
        loop {
            match self.require_char("closing '\"'")? {
                '"' => return Ok(buf),
                '\\' => buf.push(self.parse_escape()?),
                ch => buf.push(ch),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char> {
        let ch = match self.require_char("escape character")? {
            '\\' => '\\',
            '"' => '"',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '/' => '/',
            'u' => return self.parse_unicode_escape(),
            other => return Err(self.malformed(&format!("invalid escape '\\{}'", other))),
        };
        Ok(ch)
    }

    /// Reads exactly four hex digits as one UTF-16 code unit.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let mut code = 0u32;
        for _ in 0..4 {
            let ch = self.require_char("4 hex digits after '\\u'")?;
            let digit = ch
                .to_digit(16)
                .ok_or_else(|| self.malformed(&format!("invalid hex digit {:?} in '\\u' escape", ch)))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| {
            self.malformed(&format!(
                "'\\u{:04x}' is a lone surrogate and cannot be decoded on its own",
                code
            ))
        })
    }

    fn expect_separator(&self, found: char, expected: char, which: &str) -> Result<()> {
        if found == expected {
            Ok(())
        } else {
            Err(self.malformed(&format!(
                "unexpected character {:?}, expected {} separator {:?}",
                found, which, expected
            )))
        }
    }

    /// Parses the rest of a sequence whose `[` was consumed.
    fn parse_list(&mut self) -> Result<Shape> {
        let item_sep = self.separators.item();
        let mut items = Vec::new();
        loop {
            let ch = if items.is_empty() {
                self.require_significant("a value or ']'")?
            } else {
                self.require_significant(&format!("']' or item separator {:?}", item_sep))?
            };
            if ch == ']' {
                return Ok(Shape::List(items));
            }
            let item = if items.is_empty() {
                self.parse_value_from(ch)?
            } else {
                self.expect_separator(ch, item_sep, "item")?;
                self.parse_value()?
            };
            items.push(item);
        }
    }

    /// Parses the rest of a mapping whose `{` was consumed.
    fn parse_map(&mut self) -> Result<Shape> {
        let item_sep = self.separators.item();
        let key_sep = self.separators.key();
        let mut map = ShapeMap::new();
        let mut first = true;
        loop {
            let ch = if first {
                self.require_significant("a string key or '}'")?
            } else {
                self.require_significant(&format!("'}}' or item separator {:?}", item_sep))?
            };
            if ch == '}' {
                return Ok(Shape::Map(map));
            }

            let quote = if first {
                ch
            } else {
                self.expect_separator(ch, item_sep, "item")?;
                self.require_significant("a string key")?
            };
            first = false;
            if quote != '"' {
                return Err(self.malformed(&format!(
                    "unexpected character {:?}, expected a string key",
                    quote
                )));
            }
            let key = self.parse_string()?;

            let ch = self.require_significant(&format!("key separator {:?}", key_sep))?;
            self.expect_separator(ch, key_sep, "key")?;
            let value = self.parse_value()?;

            if map.contains_key(&key) {
                debug!(key = %key, line = self.line, "discarding duplicate mapping key");
            } else {
                map.insert(key, value);
            }
        }
    }
}

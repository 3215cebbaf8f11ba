//! Character sources for the decoder.
//!
//! The decoder pulls one character at a time and never asks for more than it
//! needs, so input can be streamed from any [`io::Read`] without loading it all
//! first. Two sources are provided:
//!
//! - [`StrSource`]: borrows an in-memory `&str`
//! - [`IoSource`]: decodes UTF-8 incrementally from a byte stream
//!
//! Wrap unbuffered readers (files, sockets) in a [`std::io::BufReader`] before
//! handing them to [`IoSource`].

use crate::{Error, Result};
use std::io;

/// A forward-only stream of characters.
pub trait CharSource {
    /// Returns the next character, or `None` once the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the underlying stream fails or is not UTF-8.
    fn next_char(&mut self) -> Result<Option<char>>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    #[inline]
    fn next_char(&mut self) -> Result<Option<char>> {
        (**self).next_char()
    }
}

/// Characters of a borrowed string.
pub struct StrSource<'a> {
    chars: std::str::Chars<'a>,
}

impl<'a> StrSource<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        StrSource {
            chars: input.chars(),
        }
    }

    /// The part of the input that has not been consumed yet.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        self.chars.as_str()
    }
}

impl CharSource for StrSource<'_> {
    #[inline]
    fn next_char(&mut self) -> Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Characters decoded from a UTF-8 byte stream.
pub struct IoSource<R> {
    bytes: io::Bytes<R>,
}

impl<R: io::Read> IoSource<R> {
    pub fn new(reader: R) -> Self {
        IoSource {
            bytes: reader.bytes(),
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        self.bytes.next().transpose().map_err(Error::from)
    }
}

impl<R: io::Read> CharSource for IoSource<R> {
    fn next_char(&mut self) -> Result<Option<char>> {
        let lead = match self.next_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };
        if lead.is_ascii() {
            return Ok(Some(lead as char));
        }

        let width = match lead {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(Error::io(&format!("invalid UTF-8 lead byte 0x{:02x}", lead))),
        };
        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self
                .next_byte()?
                .ok_or_else(|| Error::io("stream ends inside a UTF-8 sequence"))?;
        }

        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| Error::io("invalid UTF-8 sequence"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<S: CharSource>(mut source: S) -> Result<String> {
        let mut out = String::new();
        while let Some(ch) = source.next_char()? {
            out.push(ch);
        }
        Ok(out)
    }

    #[test]
    fn test_str_source_remaining() {
        let mut source = StrSource::new("ab");
        assert_eq!(source.next_char().unwrap(), Some('a'));
        assert_eq!(source.remaining(), "b");
    }

    #[test]
    fn test_io_source_multibyte() {
        let text = "a\u{0ca7}\u{1337}é😀";
        let out = drain(IoSource::new(text.as_bytes())).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn test_io_source_rejects_invalid_utf8() {
        let err = drain(IoSource::new(&[b'a', 0xFF][..])).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_io_source_rejects_truncated_sequence() {
        let err = drain(IoSource::new(&[0xE0, 0xB2][..])).unwrap_err();
        assert!(err.to_string().contains("inside a UTF-8 sequence"));
    }

    #[test]
    fn test_io_source_rejects_bad_continuation() {
        assert!(drain(IoSource::new(&[0xC3, b'a'][..])).is_err());
    }
}

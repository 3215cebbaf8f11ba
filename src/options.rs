//! Separator configuration for the text codec.
//!
//! A [`Decoder`](crate::Decoder) and [`Encoder`](crate::Encoder) that talk to
//! each other must be built from the same [`Separators`]. The pair is fixed at
//! construction and never changes afterwards.
//!
//! ## Examples
//!
//! ```rust
//! use tagpack::{Decoder, Encoder, Separators, shape};
//!
//! let separators = Separators::new(" ; ", "=").unwrap();
//! let encoder = Encoder::new(separators);
//! let decoder = Decoder::new(separators);
//!
//! let text = encoder.encode(&shape!({"a": ["1", "2"]}));
//! assert_eq!(text, "{\"a\"=[\"1\";\"2\"]}");
//! assert_eq!(decoder.decode_str(&text).unwrap(), shape!({"a": ["1", "2"]}));
//! ```

use crate::{Error, Result};

/// Characters the decoder treats as insignificant between tokens.
///
/// Tab is deliberately absent.
pub(crate) const WHITESPACE: [char; 3] = [' ', '\n', '\r'];

/// Characters that carry meaning in the grammar and so cannot be separators.
const STRUCTURAL: [char; 6] = ['[', ']', '{', '}', '"', '\\'];

#[inline]
pub(crate) fn is_whitespace(ch: char) -> bool {
    WHITESPACE.contains(&ch)
}

/// The item and key separators used by the text codec.
///
/// Defaults to `(',', ':')`.
///
/// # Examples
///
/// ```rust
/// use tagpack::Separators;
///
/// let default = Separators::default();
/// assert_eq!(default.item(), ',');
/// assert_eq!(default.key(), ':');
///
/// // Surrounding spaces, LF and CR are stripped.
/// let custom = Separators::new("\n| ", " =").unwrap();
/// assert_eq!((custom.item(), custom.key()), ('|', '='));
///
/// // Both strip to nothing.
/// assert!(Separators::new(" ", "    ").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Separators {
    item: char,
    key: char,
}

impl Default for Separators {
    fn default() -> Self {
        Separators {
            item: ',',
            key: ':',
        }
    }
}

impl Separators {
    /// Builds a separator pair from two strings.
    ///
    /// Each string is stripped of space, LF and CR and must then hold exactly one
    /// character that is not one of `[ ] { } " \`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if either separator is invalid.
    pub fn new(item: &str, key: &str) -> Result<Self> {
        Ok(Separators {
            item: parse_separator("item", item)?,
            key: parse_separator("key", key)?,
        })
    }

    /// The separator placed between sequence items and mapping pairs.
    #[inline]
    #[must_use]
    pub const fn item(&self) -> char {
        self.item
    }

    /// The separator placed between a mapping key and its value.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> char {
        self.key
    }
}

fn parse_separator(which: &str, raw: &str) -> Result<char> {
    let stripped = raw.trim_matches(&WHITESPACE[..]);
    let mut chars = stripped.chars();
    let ch = match (chars.next(), chars.next()) {
        (Some(ch), None) => ch,
        _ => {
            return Err(Error::config(&format!(
                "{} separator {:?} must consist of one non-whitespace character",
                which, raw
            )))
        }
    };
    if STRUCTURAL.contains(&ch) {
        return Err(Error::config(&format!(
            "{} separator {:?} is a structural character",
            which, ch
        )));
    }
    Ok(ch)
}

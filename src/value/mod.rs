//! Application-level dynamic values.
//!
//! [`Value`] is the in-memory value the [`Packer`](crate::Packer) converts to
//! and from tagged nodes. It covers the closed set of supported kinds:
//!
//! | kind        | variant                          |
//! |-------------|----------------------------------|
//! | absence     | [`Value::None`]                  |
//! | scalars     | `Bool`, `Int`, `Float`, `Complex`, `Str` |
//! | byte buffers| `Bytes`, `ByteArray`             |
//! | sequences   | `List`, `Tuple`, `Set`, `FrozenSet` |
//! | mapping     | `Dict`                           |
//! | interval    | `Range`                          |
//! | cell        | `Cell`                           |
//!
//! Integers have arbitrary precision and complex numbers keep both components
//! as `f64`, so both survive a round-trip exactly.
//!
//! ## Converting from Rust Types
//!
//! ```rust
//! use tagpack::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(value.get("x"), Some(&Value::from(1)));
//! ```

pub mod de;
pub mod ser;

use num_bigint::BigInt;
use std::fmt;
use std::str::FromStr;

/// A dynamically-typed value from the closed set of packable kinds.
///
/// Sequence-like variants keep their elements in the order given; `Set` and
/// `FrozenSet` do not deduplicate. `Dict` is an ordered list of pairs whose keys
/// may be any value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(BigInt),
    Float(f64),
    Complex(Complex),
    Str(String),
    Bytes(Vec<u8>),
    ByteArray(Vec<u8>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    FrozenSet(Vec<Value>),
    Dict(Vec<(Value, Value)>),
    Range {
        start: BigInt,
        stop: BigInt,
        step: BigInt,
    },
    Cell(Box<Value>),
}

impl Value {
    /// Builds a `Value::Range`.
    #[must_use]
    pub fn range(start: impl Into<BigInt>, stop: impl Into<BigInt>, step: impl Into<BigInt>) -> Self {
        Value::Range {
            start: start.into(),
            stop: stop.into(),
            step: step.into(),
        }
    }

    /// Builds a `Value::Dict` from pairs, in iteration order.
    #[must_use]
    pub fn dict<K, V, I>(pairs: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Dict(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Builds a `Value::Tuple`.
    #[must_use]
    pub fn tuple<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    /// Name of the value's kind, matching the envelope `type` tag.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::None => "None",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Complex(_) => "complex",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::ByteArray(_) => "bytearray",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::FrozenSet(_) => "frozenset",
            Value::Dict(_) => "dict",
            Value::Range { .. } => "range",
            Value::Cell(_) => "cell",
        }
    }

    /// Returns `true` if the value is `None`.
    #[inline]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    /// If the value is a float, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a string, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is `Bytes` or `ByteArray`, returns its contents.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) | Value::ByteArray(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the elements of a list, tuple, set or frozenset.
    #[must_use]
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) | Value::Tuple(v) | Value::Set(v) | Value::FrozenSet(v) => Some(v),
            _ => None,
        }
    }

    /// Looks up a string key in a dict.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagpack::Value;
    ///
    /// let d = Value::dict([("a", 1), ("b", 2)]);
    /// assert_eq!(d.get("b"), Some(&Value::from(2)));
    /// assert_eq!(d.get("c"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Dict(pairs) => pairs
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

/// A complex number with `f64` components.
///
/// Its text form is `(re+imj)`, e.g. `(3.0+1.4j)` or `(1.0-infj)`. Each
/// component is written in the shortest form that parses back to the same
/// `f64`.
///
/// # Examples
///
/// ```rust
/// use tagpack::Complex;
///
/// let c = Complex::new(3.0, -1.5);
/// assert_eq!(c.to_string(), "(3.0-1.5j)");
/// assert_eq!("(3.0-1.5j)".parse::<Complex>().unwrap(), c);
/// assert_eq!("2j".parse::<Complex>().unwrap(), Complex::new(0.0, 2.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.im.is_sign_negative() && !self.im.is_nan() {
            '-'
        } else {
            '+'
        };
        write!(f, "({:?}{}{:?}j)", self.re, sign, self.im.abs())
    }
}

/// Error returned when complex-number text cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseComplexError(String);

impl fmt::Display for ParseComplexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid complex literal {:?}", self.0)
    }
}

impl std::error::Error for ParseComplexError {}

impl FromStr for Complex {
    type Err = ParseComplexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseComplexError(s.to_string());
        let body = s
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(s);
        let parse = |part: &str| part.parse::<f64>().map_err(|_| err());

        let imag = match body.strip_suffix('j').or_else(|| body.strip_suffix('J')) {
            Some(imag) => imag,
            None => return Ok(Complex::new(parse(body)?, 0.0)),
        };

        // The real/imaginary split is the last sign that is not an exponent sign.
        let bytes = imag.as_bytes();
        let split = (1..bytes.len())
            .rev()
            .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'));

        match split {
            Some(i) => {
                let im = match &imag[i..] {
                    "+" => 1.0,
                    "-" => -1.0,
                    part => parse(part)?,
                };
                Ok(Complex::new(parse(&imag[..i])?, im))
            }
            None => {
                let im = match imag {
                    "" | "+" => 1.0,
                    "-" => -1.0,
                    part => parse(part)?,
                };
                Ok(Complex::new(0.0, im))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Int(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Complex> for Value {
    fn from(value: Complex) -> Self {
        Value::Complex(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<std::ops::Range<i64>> for Value {
    fn from(value: std::ops::Range<i64>) -> Self {
        Value::range(value.start, value.end, 1)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

//! The node-as-text shape read and written by every codec.
//!
//! A [`Shape`] is one of three things: a string, an ordered sequence of shapes,
//! or an ordered mapping from string keys to shapes. There are no numbers,
//! booleans or nulls at this layer; those live one layer up, inside the
//! envelopes produced by the [`Packer`](crate::Packer).
//!
//! ## Examples
//!
//! ```rust
//! use tagpack::{shape, Shape};
//!
//! let envelope = shape!({"type": "int", "value": "42"});
//! assert!(envelope.is_map());
//!
//! let map = envelope.as_map().unwrap();
//! assert_eq!(map.get("type").and_then(Shape::as_str), Some("int"));
//! ```

use crate::ShapeMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A string, sequence, or string-keyed mapping.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Str(String),
    List(Vec<Shape>),
    Map(ShapeMap),
}

impl Shape {
    /// Returns `true` if the shape is a string.
    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Shape::Str(_))
    }

    /// Returns `true` if the shape is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Shape::List(_))
    }

    /// Returns `true` if the shape is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Shape::Map(_))
    }

    /// If the shape is a string, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Shape::Str(s) => Some(s),
            _ => None,
        }
    }

    /// If the shape is a sequence, returns its items. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Shape]> {
        match self {
            Shape::List(items) => Some(items),
            _ => None,
        }
    }

    /// If the shape is a mapping, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&ShapeMap> {
        match self {
            Shape::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the shape, used in error messages.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Shape::Str(_) => "string",
            Shape::List(_) => "sequence",
            Shape::Map(_) => "mapping",
        }
    }
}

/// Renders the shape in compact text form with default separators.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::Encoder::default().encode(self))
    }
}

impl From<String> for Shape {
    fn from(value: String) -> Self {
        Shape::Str(value)
    }
}

impl From<&str> for Shape {
    fn from(value: &str) -> Self {
        Shape::Str(value.to_string())
    }
}

impl From<Vec<Shape>> for Shape {
    fn from(value: Vec<Shape>) -> Self {
        Shape::List(value)
    }
}

impl From<ShapeMap> for Shape {
    fn from(value: ShapeMap) -> Self {
        Shape::Map(value)
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Shape::Str(s) => serializer.serialize_str(s),
            Shape::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Shape::Map(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k, v)?;
                }
                m.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ShapeVisitor;

        // Foreign formats may hand over unquoted scalars; they become their text.
        impl<'de> Visitor<'de> for ShapeVisitor {
            type Value = Shape;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, sequence, or mapping")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Shape::Str(if value { "True" } else { "False" }.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Shape::Str(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Shape::Str(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Shape::Str(format!("{:?}", value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Shape::Str(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Shape::Str(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Shape::List(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut shape_map = ShapeMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Shape>()? {
                    shape_map.insert_first(key, value);
                }
                Ok(Shape::Map(shape_map))
            }
        }

        deserializer.deserialize_any(ShapeVisitor)
    }
}

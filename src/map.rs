//! Ordered map type for mapping shapes.
//!
//! [`ShapeMap`] wraps an [`IndexMap`] so that mapping pairs keep the order in
//! which they were decoded or inserted. Envelope fields and dictionary items
//! come back out of a round-trip in their original order.
//!
//! ## Examples
//!
//! ```rust
//! use tagpack::{Shape, ShapeMap};
//!
//! let mut map = ShapeMap::new();
//! map.insert("type".to_string(), Shape::from("int"));
//! map.insert("value".to_string(), Shape::from("42"));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["type", "value"]);
//! ```

use crate::Shape;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// An insertion-ordered map of string keys to shapes.
///
/// Two maps are equal only when they hold the same pairs in the same order.
#[derive(Debug, Clone, Default)]
pub struct ShapeMap(IndexMap<String, Shape>);

impl PartialEq for ShapeMap {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl ShapeMap {
    /// Creates an empty `ShapeMap`.
    #[must_use]
    pub fn new() -> Self {
        ShapeMap(IndexMap::new())
    }

    /// Creates an empty `ShapeMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ShapeMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, replacing the value of an existing key in place.
    ///
    /// If the map already contained this key, the old value is returned.
    pub fn insert(&mut self, key: String, value: Shape) -> Option<Shape> {
        self.0.insert(key, value)
    }

    /// Inserts a key-value pair only if the key is not present yet.
    ///
    /// Returns `false` and drops `value` when the key already exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagpack::{Shape, ShapeMap};
    ///
    /// let mut map = ShapeMap::new();
    /// assert!(map.insert_first("k".to_string(), Shape::from("1")));
    /// assert!(!map.insert_first("k".to_string(), Shape::from("2")));
    /// assert_eq!(map.get("k").and_then(Shape::as_str), Some("1"));
    /// ```
    pub fn insert_first(&mut self, key: String, value: Shape) -> bool {
        match self.0.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Shape> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of pairs in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Shape> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Shape> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Shape> {
        self.0.iter()
    }
}

impl IntoIterator for ShapeMap {
    type Item = (String, Shape);
    type IntoIter = indexmap::map::IntoIter<String, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ShapeMap {
    type Item = (&'a String, &'a Shape);
    type IntoIter = indexmap::map::Iter<'a, String, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collects pairs with replacement semantics: a repeated key keeps its first
/// position and takes the last value.
impl FromIterator<(String, Shape)> for ShapeMap {
    fn from_iter<T: IntoIterator<Item = (String, Shape)>>(iter: T) -> Self {
        ShapeMap(IndexMap::from_iter(iter))
    }
}

//! Conversion between [`Value`] and tagged [`Node`] trees.
//!
//! Packing never fails: every `Value` variant has a node kind. Unpacking
//! validates each scalar payload against its declared kind and reports
//! [`Error::MalformedNode`] on the first one that does not fit.
//!
//! ```rust
//! use tagpack::{Packer, Value};
//!
//! let packer = Packer::new();
//! let value = Value::dict([("n", Value::from(1u8)), ("z", Value::range(0, 10, 3))]);
//! let node = packer.pack(&value);
//! assert_eq!(packer.unpack(&node).unwrap(), value);
//! ```

use crate::node::{BufferKind, Node, ScalarKind, SequenceKind};
use crate::{Complex, Error, Result, Shape, Value};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use indexmap::map::Entry;
use indexmap::IndexMap;
use num_bigint::{BigInt, Sign};

/// Named bindings made available while unpacking.
///
/// Only executable kinds would resolve names against it. None of the kinds
/// this crate supports do, so its contents never change a result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment(IndexMap<String, Value>);

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Environment(IndexMap::new())
    }

    /// Binds `name`, returning the previous binding if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Environment(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Converts values to nodes and back.
#[derive(Clone, Debug, Default)]
pub struct Packer {
    environment: Option<Environment>,
}

impl Packer {
    #[must_use]
    pub fn new() -> Self {
        Packer::default()
    }

    #[must_use]
    pub fn with_environment(environment: Environment) -> Self {
        Packer {
            environment: Some(environment),
        }
    }

    #[must_use]
    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    pub fn set_environment(&mut self, environment: Option<Environment>) {
        self.environment = environment;
    }

    /// Converts a value into a node tree.
    #[must_use]
    pub fn pack(&self, value: &Value) -> Node {
        match value {
            Value::None => Node::Absence,
            Value::Bool(b) => Node::Scalar(ScalarKind::Bool, bool_text(*b).to_string()),
            Value::Int(i) => int_node(i),
            Value::Float(f) => Node::Scalar(ScalarKind::Float, format!("{:?}", f)),
            Value::Complex(c) => Node::Scalar(ScalarKind::Complex, c.to_string()),
            Value::Str(s) => Node::Scalar(ScalarKind::Str, s.clone()),
            Value::Bytes(b) => Node::ByteBuffer(BufferKind::Bytes, BASE64.encode(b)),
            Value::ByteArray(b) => Node::ByteBuffer(BufferKind::ByteArray, BASE64.encode(b)),
            Value::List(items) => self.pack_sequence(SequenceKind::List, items),
            Value::Tuple(items) => self.pack_sequence(SequenceKind::Tuple, items),
            Value::Set(items) => self.pack_sequence(SequenceKind::Set, items),
            Value::FrozenSet(items) => self.pack_sequence(SequenceKind::FrozenSet, items),
            Value::Dict(pairs) => Node::Mapping(
                pairs
                    .iter()
                    .map(|(k, v)| (self.pack(k), self.pack(v)))
                    .collect(),
            ),
            Value::Range { start, stop, step } => Node::Interval {
                start: Box::new(int_node(start)),
                stop: Box::new(int_node(stop)),
                step: Box::new(int_node(step)),
            },
            Value::Cell(inner) => Node::Cell(Box::new(self.pack(inner))),
        }
    }

    fn pack_sequence(&self, kind: SequenceKind, items: &[Value]) -> Node {
        Node::Sequence(kind, items.iter().map(|v| self.pack(v)).collect())
    }

    /// Converts a node tree back into a value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedNode`] if a scalar payload does not parse for
    /// its kind, a byte buffer is not valid base64, a range bound is not an
    /// integer, or a range step is zero.
    pub fn unpack(&self, node: &Node) -> Result<Value> {
        match node {
            Node::Absence => Ok(Value::None),
            Node::Scalar(kind, text) => unpack_scalar(*kind, text),
            Node::ByteBuffer(kind, text) => {
                let bytes = BASE64.decode(text).map_err(|e| {
                    Error::malformed_node(&format!("invalid base64 in {}: {}", kind.tag(), e))
                })?;
                Ok(match kind {
                    BufferKind::Bytes => Value::Bytes(bytes),
                    BufferKind::ByteArray => Value::ByteArray(bytes),
                })
            }
            Node::Sequence(kind, items) => {
                let items = items
                    .iter()
                    .map(|n| self.unpack(n))
                    .collect::<Result<Vec<_>>>()?;
                Ok(match kind {
                    SequenceKind::List => Value::List(items),
                    SequenceKind::Tuple => Value::Tuple(items),
                    SequenceKind::Set => Value::Set(items),
                    SequenceKind::FrozenSet => Value::FrozenSet(items),
                })
            }
            Node::Mapping(pairs) => {
                // Keyed by the canonical node of each key, so equal keys written
                // differently ("01" and "1") still collide.
                let mut dict: IndexMap<Node, (Value, Value)> = IndexMap::with_capacity(pairs.len());
                for (k, v) in pairs {
                    let key = self.unpack(k)?;
                    let value = self.unpack(v)?;
                    match dict.entry(self.pack(&key)) {
                        Entry::Occupied(mut slot) => slot.get_mut().1 = value,
                        Entry::Vacant(slot) => {
                            slot.insert((key, value));
                        }
                    }
                }
                Ok(Value::Dict(dict.into_values().collect()))
            }
            Node::Interval { start, stop, step } => {
                let step = range_bound("step", step)?;
                if step.sign() == Sign::NoSign {
                    return Err(Error::malformed_node("range step must not be zero"));
                }
                Ok(Value::Range {
                    start: range_bound("start", start)?,
                    stop: range_bound("stop", stop)?,
                    step,
                })
            }
            Node::Cell(inner) => Ok(Value::Cell(Box::new(self.unpack(inner)?))),
        }
    }

    /// Packs a value straight into its envelope shape.
    #[must_use]
    pub fn pack_envelope(&self, value: &Value) -> Shape {
        self.pack(value).to_envelope()
    }

    /// Unpacks a value straight from its envelope shape.
    ///
    /// # Errors
    ///
    /// Any error from [`Node::from_envelope`] or [`Packer::unpack`].
    pub fn unpack_envelope(&self, shape: &Shape) -> Result<Value> {
        self.unpack(&Node::from_envelope(shape)?)
    }
}

const fn bool_text(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

fn int_node(i: &BigInt) -> Node {
    Node::Scalar(ScalarKind::Int, i.to_string())
}

fn unpack_scalar(kind: ScalarKind, text: &str) -> Result<Value> {
    let invalid = || Error::malformed_node(&format!("invalid {} payload {:?}", kind.tag(), text));
    match kind {
        ScalarKind::Str => Ok(Value::Str(text.to_string())),
        ScalarKind::Int => text.parse::<BigInt>().map(Value::Int).map_err(|_| invalid()),
        ScalarKind::Float => text.parse::<f64>().map(Value::Float).map_err(|_| invalid()),
        ScalarKind::Complex => text
            .parse::<Complex>()
            .map(Value::Complex)
            .map_err(|_| invalid()),
        ScalarKind::Bool => match text {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            _ => Err(invalid()),
        },
    }
}

fn range_bound(name: &str, node: &Node) -> Result<BigInt> {
    match node {
        Node::Scalar(ScalarKind::Int, text) => text.parse::<BigInt>().map_err(|_| {
            Error::malformed_node(&format!("range {} {:?} is not an integer", name, text))
        }),
        other => Err(Error::malformed_node(&format!(
            "range {} must be an int, found {}",
            name,
            other.tag()
        ))),
    }
}

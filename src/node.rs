//! The tagged intermediate representation.
//!
//! A [`Node`] carries exactly one kind tag plus its payload. Scalars hold
//! their canonical text rather than a binary number, which is what lets big
//! integers and complex values pass through any textual format untouched.
//!
//! Every node converts to and from an *envelope*: a string-keyed [`Shape`]
//! mapping with a `type` field naming the kind.
//!
//! ```rust
//! use tagpack::{shape, Node, ScalarKind};
//!
//! let node = Node::Scalar(ScalarKind::Int, "42".to_string());
//! assert_eq!(node.to_envelope(), shape!({"type": "int", "value": "42"}));
//! assert_eq!(Node::from_envelope(&node.to_envelope()).unwrap(), node);
//! ```

use crate::{Error, Result, Shape, ShapeMap};

const TYPE_FIELD: &str = "type";
const VALUE_FIELD: &str = "value";

/// Tags that name executable values. They are recognized only to be refused.
const EXECUTABLE_TAGS: [&str; 3] = ["function", "module", "code"];

macro_rules! kind_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// The envelope `type` tag for this kind.
            #[must_use]
            pub const fn tag(self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }

            /// Looks up a kind by its envelope tag.
            #[must_use]
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $($tag => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

kind_enum! {
    /// Kinds whose payload is a single piece of canonical text.
    ScalarKind {
        Str => "str",
        Int => "int",
        Float => "float",
        Complex => "complex",
        Bool => "bool",
    }
}

kind_enum! {
    /// Immutable and mutable byte buffers.
    BufferKind {
        Bytes => "bytes",
        ByteArray => "bytearray",
    }
}

kind_enum! {
    /// Ordered element containers.
    SequenceKind {
        List => "list",
        Tuple => "tuple",
        Set => "set",
        FrozenSet => "frozenset",
    }
}

/// A tagged node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Absence,
    Scalar(ScalarKind, String),
    /// Base64 text of the buffer contents.
    ByteBuffer(BufferKind, String),
    Sequence(SequenceKind, Vec<Node>),
    Mapping(Vec<(Node, Node)>),
    Interval {
        start: Box<Node>,
        stop: Box<Node>,
        step: Box<Node>,
    },
    Cell(Box<Node>),
}

impl Node {
    /// The envelope `type` tag of this node.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Node::Absence => "None",
            Node::Scalar(kind, _) => kind.tag(),
            Node::ByteBuffer(kind, _) => kind.tag(),
            Node::Sequence(kind, _) => kind.tag(),
            Node::Mapping(_) => "dict",
            Node::Interval { .. } => "range",
            Node::Cell(_) => "cell",
        }
    }

    /// Converts the node into its envelope shape.
    #[must_use]
    pub fn to_envelope(&self) -> Shape {
        let mut map = ShapeMap::with_capacity(4);
        map.insert(TYPE_FIELD.to_string(), Shape::from(self.tag()));
        match self {
            Node::Absence => {}
            Node::Scalar(_, text) => {
                map.insert(VALUE_FIELD.to_string(), Shape::Str(text.clone()));
            }
            Node::ByteBuffer(_, text) => {
                let inner = Node::Scalar(ScalarKind::Str, text.clone());
                map.insert(VALUE_FIELD.to_string(), inner.to_envelope());
            }
            Node::Sequence(_, items) => {
                let items = items.iter().map(Node::to_envelope).collect::<Vec<_>>();
                map.insert(VALUE_FIELD.to_string(), Shape::List(items));
            }
            Node::Mapping(pairs) => {
                let items = pairs
                    .iter()
                    .map(|(key, value)| pair_envelope(key, value))
                    .collect::<Vec<_>>();
                map.insert(VALUE_FIELD.to_string(), Shape::List(items));
            }
            Node::Interval { start, stop, step } => {
                map.insert("start".to_string(), start.to_envelope());
                map.insert("stop".to_string(), stop.to_envelope());
                map.insert("step".to_string(), step.to_envelope());
            }
            Node::Cell(inner) => {
                map.insert(VALUE_FIELD.to_string(), inner.to_envelope());
            }
        }
        Shape::Map(map)
    }

    /// Rebuilds a node from its envelope shape.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedKind`] if the `type` tag is not a known kind
    /// - [`Error::MalformedNode`] if the shape is not a mapping, has no string
    ///   `type`, or lacks or mis-shapes a field its kind requires
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagpack::{shape, Error, Node};
    ///
    /// let err = Node::from_envelope(&shape!({"type": "range", "start": {"type": "int", "value": "0"}}))
    ///     .unwrap_err();
    /// assert!(matches!(err, Error::MalformedNode(_)));
    ///
    /// let err = Node::from_envelope(&shape!({"type": "function"})).unwrap_err();
    /// assert!(matches!(err, Error::UnsupportedKind(_)));
    /// ```
    pub fn from_envelope(shape: &Shape) -> Result<Node> {
        let map = shape.as_map().ok_or_else(|| {
            Error::malformed_node(&format!(
                "expected an envelope mapping, found a {}",
                shape.describe()
            ))
        })?;
        let tag = match map.get(TYPE_FIELD) {
            Some(Shape::Str(tag)) => tag.as_str(),
            Some(other) => {
                return Err(Error::malformed_node(&format!(
                    "'type' field must be a string, found a {}",
                    other.describe()
                )))
            }
            None => return Err(Error::malformed_node("envelope has no 'type' field")),
        };

        if tag == "None" {
            return Ok(Node::Absence);
        }
        if let Some(kind) = ScalarKind::from_tag(tag) {
            return Ok(Node::Scalar(kind, text_field(map, tag, VALUE_FIELD)?.to_string()));
        }
        if let Some(kind) = BufferKind::from_tag(tag) {
            return match Node::from_envelope(field(map, tag, VALUE_FIELD)?)? {
                Node::Scalar(ScalarKind::Str, text) => Ok(Node::ByteBuffer(kind, text)),
                other => Err(Error::malformed_node(&format!(
                    "{} payload must be a str envelope, found {}",
                    tag,
                    other.tag()
                ))),
            };
        }
        if let Some(kind) = SequenceKind::from_tag(tag) {
            let items = list_field(map, tag, VALUE_FIELD)?
                .iter()
                .map(Node::from_envelope)
                .collect::<Result<Vec<_>>>()?;
            return Ok(Node::Sequence(kind, items));
        }

        match tag {
            "dict" => {
                let pairs = list_field(map, tag, VALUE_FIELD)?
                    .iter()
                    .map(|item| match Node::from_envelope(item)? {
                        Node::Sequence(SequenceKind::Tuple, mut pair) if pair.len() == 2 => {
                            let value = pair.pop();
                            let key = pair.pop();
                            key.zip(value).ok_or_else(|| {
                                Error::malformed_node("dict item must be a 2-item tuple")
                            })
                        }
                        other => Err(Error::malformed_node(&format!(
                            "dict item must be a 2-item tuple, found {}",
                            other.tag()
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Node::Mapping(pairs))
            }
            "range" => Ok(Node::Interval {
                start: Box::new(Node::from_envelope(field(map, tag, "start")?)?),
                stop: Box::new(Node::from_envelope(field(map, tag, "stop")?)?),
                step: Box::new(Node::from_envelope(field(map, tag, "step")?)?),
            }),
            "cell" => Ok(Node::Cell(Box::new(Node::from_envelope(field(
                map,
                tag,
                VALUE_FIELD,
            )?)?))),
            t if EXECUTABLE_TAGS.contains(&t) => Err(Error::unsupported_kind(&format!(
                "executable kind '{}' cannot be unpacked",
                t
            ))),
            t => Err(Error::unsupported_kind(&format!("unknown kind tag '{}'", t))),
        }
    }
}

fn pair_envelope(key: &Node, value: &Node) -> Shape {
    let mut map = ShapeMap::with_capacity(2);
    map.insert(TYPE_FIELD.to_string(), Shape::from(SequenceKind::Tuple.tag()));
    map.insert(
        VALUE_FIELD.to_string(),
        Shape::List(vec![key.to_envelope(), value.to_envelope()]),
    );
    Shape::Map(map)
}

fn field<'a>(map: &'a ShapeMap, tag: &str, name: &str) -> Result<&'a Shape> {
    map.get(name).ok_or_else(|| {
        Error::malformed_node(&format!("{} envelope has no '{}' field", tag, name))
    })
}

fn text_field<'a>(map: &'a ShapeMap, tag: &str, name: &str) -> Result<&'a str> {
    let shape = field(map, tag, name)?;
    shape.as_str().ok_or_else(|| {
        Error::malformed_node(&format!(
            "{} '{}' field must be a string, found a {}",
            tag,
            name,
            shape.describe()
        ))
    })
}

fn list_field<'a>(map: &'a ShapeMap, tag: &str, name: &str) -> Result<&'a [Shape]> {
    let shape = field(map, tag, name)?;
    shape.as_list().ok_or_else(|| {
        Error::malformed_node(&format!(
            "{} '{}' field must be a sequence, found a {}",
            tag,
            name,
            shape.describe()
        ))
    })
}

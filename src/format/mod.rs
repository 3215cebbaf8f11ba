//! Format facade.
//!
//! A [`Serializer`] pairs one [`Packer`] with one [`Codec`]. The codec moves
//! envelope [`Shape`]s to and from bytes; the packer moves [`Value`]s to and
//! from envelopes. Three codecs ship with the crate:
//!
//! | [`Format`] | codec         | backing                         |
//! |------------|---------------|---------------------------------|
//! | `json`     | [`TextCodec`] | the crate's own decoder/encoder |
//! | `yaml`     | [`YamlCodec`] | `serde_yaml`                    |
//! | `toml`     | [`TomlCodec`] | `toml`                          |
//!
//! ```rust
//! use tagpack::format::Format;
//! use tagpack::Value;
//!
//! let serializer = "JSON".parse::<Format>().unwrap().serializer();
//! let text = serializer.dumps(&Value::from(5)).unwrap();
//! assert_eq!(text, r#"{"type":"int","value":"5"}"#);
//! assert_eq!(serializer.loads(&text).unwrap(), Value::from(5));
//! ```

mod text;
mod toml;
mod yaml;

pub use self::text::TextCodec;
pub use self::toml::TomlCodec;
pub use self::yaml::YamlCodec;

use crate::{Error, Packer, Result, Shape, Value};
use std::fmt;
use std::io;
use std::str::FromStr;
use tracing::{debug, trace};

/// Reads and writes envelope shapes in one textual format.
pub trait Codec: Send + Sync {
    /// Lower-case format name, as accepted by [`Format::from_str`].
    fn name(&self) -> &'static str;

    /// Writes one shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape cannot be rendered or writing fails.
    fn write_shape(&self, shape: &Shape, writer: &mut dyn io::Write) -> Result<()>;

    /// Reads one shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid for the format.
    fn read_shape(&self, reader: &mut dyn io::Read) -> Result<Shape>;
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn write_shape(&self, shape: &Shape, writer: &mut dyn io::Write) -> Result<()> {
        (**self).write_shape(shape, writer)
    }

    fn read_shape(&self, reader: &mut dyn io::Read) -> Result<Shape> {
        (**self).read_shape(reader)
    }
}

/// A packer bound to a codec.
#[derive(Clone, Debug, Default)]
pub struct Serializer<C> {
    packer: Packer,
    codec: C,
}

/// A serializer whose codec is chosen at runtime.
pub type DynSerializer = Serializer<Box<dyn Codec>>;

impl<C: Codec> Serializer<C> {
    #[must_use]
    pub fn new(codec: C) -> Self {
        Serializer {
            packer: Packer::new(),
            codec,
        }
    }

    #[must_use]
    pub fn with_packer(packer: Packer, codec: C) -> Self {
        Serializer { packer, codec }
    }

    #[must_use]
    pub fn packer(&self) -> &Packer {
        &self.packer
    }

    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Packs `value` and writes its envelope to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the codec fails to write.
    pub fn dump<W: io::Write>(&self, value: &Value, mut writer: W) -> Result<()> {
        debug!(format = self.codec.name(), kind = value.kind_name(), "dumping value");
        let envelope = self.packer.pack_envelope(value);
        self.codec.write_shape(&envelope, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads an envelope from `reader` and unpacks it.
    ///
    /// # Errors
    ///
    /// - any decoding error from the codec
    /// - [`Error::MalformedNode`] if the top-level shape is not a mapping
    /// - any error from [`Packer::unpack_envelope`]
    pub fn load<R: io::Read>(&self, mut reader: R) -> Result<Value> {
        let shape = self.codec.read_shape(&mut reader)?;
        trace!(format = self.codec.name(), shape = shape.describe(), "decoded shape");
        if !shape.is_map() {
            return Err(Error::malformed_node(&format!(
                "top-level value is not an envelope mapping, found a {}",
                shape.describe()
            )));
        }
        let value = self.packer.unpack_envelope(&shape)?;
        debug!(format = self.codec.name(), kind = value.kind_name(), "loaded value");
        Ok(value)
    }

    /// Packs `value` into a string.
    ///
    /// # Errors
    ///
    /// See [`Serializer::dump`].
    pub fn dumps(&self, value: &Value) -> Result<String> {
        let mut buf = Vec::with_capacity(256);
        self.dump(value, &mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::external(self.codec.name(), e))
    }

    /// Unpacks a value from a string.
    ///
    /// # Errors
    ///
    /// See [`Serializer::load`].
    pub fn loads(&self, s: &str) -> Result<Value> {
        self.load(s.as_bytes())
    }
}

impl Serializer<TextCodec> {
    /// A serializer for the built-in text format with default separators.
    #[must_use]
    pub fn text() -> Self {
        Serializer::new(TextCodec::default())
    }
}

/// The formats known by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Json, Format::Yaml, Format::Toml];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }

    /// A fresh codec for this format. The text codec uses default separators.
    #[must_use]
    pub fn codec(self) -> Box<dyn Codec> {
        match self {
            Format::Json => Box::new(TextCodec::default()),
            Format::Yaml => Box::new(YamlCodec),
            Format::Toml => Box::new(TomlCodec),
        }
    }

    #[must_use]
    pub fn serializer(self) -> DynSerializer {
        Serializer::new(self.codec())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a format name, ignoring ASCII case.
impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Format::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unsupported_kind(&format!("unknown format '{}'", s)))
    }
}

impl fmt::Debug for dyn Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec").field("name", &self.name()).finish()
    }
}

use super::Codec;
use crate::{Error, Result, Shape};
use std::io;

/// TOML through the `toml` crate. Only mappings can be top-level documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TomlCodec;

impl Codec for TomlCodec {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn write_shape(&self, shape: &Shape, writer: &mut dyn io::Write) -> Result<()> {
        let text = ::toml::to_string(shape).map_err(|e| Error::external("TOML", e))?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    fn read_shape(&self, reader: &mut dyn io::Read) -> Result<Shape> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        ::toml::from_str(&text).map_err(|e| Error::external("TOML", e))
    }
}

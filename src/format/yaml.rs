use super::Codec;
use crate::{Error, Result, Shape};
use std::io;

/// YAML through `serde_yaml`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn write_shape(&self, shape: &Shape, writer: &mut dyn io::Write) -> Result<()> {
        serde_yaml::to_writer(writer, shape).map_err(|e| Error::external("YAML", e))
    }

    fn read_shape(&self, reader: &mut dyn io::Read) -> Result<Shape> {
        serde_yaml::from_reader(reader).map_err(|e| Error::external("YAML", e))
    }
}

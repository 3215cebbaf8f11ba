use super::Codec;
use crate::{Decoder, Encoder, Result, Separators, Shape};
use std::io::{self, BufReader};

/// The crate's own text format: a paired [`Decoder`] and [`Encoder`] sharing
/// one set of separators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextCodec {
    decoder: Decoder,
    encoder: Encoder,
}

impl TextCodec {
    #[must_use]
    pub const fn new(separators: Separators) -> Self {
        TextCodec {
            decoder: Decoder::new(separators),
            encoder: Encoder::new(separators),
        }
    }

    #[must_use]
    pub const fn separators(&self) -> Separators {
        self.encoder.separators()
    }
}

impl Codec for TextCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn write_shape(&self, shape: &Shape, writer: &mut dyn io::Write) -> Result<()> {
        self.encoder.encode_to_writer(shape, writer)
    }

    fn read_shape(&self, reader: &mut dyn io::Read) -> Result<Shape> {
        self.decoder.decode_reader(BufReader::new(reader))
    }
}

//! The codec capability the transcoder drives.
//!
//! A [`Codec`] recognizes one image format, decodes it to RGBA8 at a
//! requested size, and encodes RGBA8 back into the same format.

use crate::decode::{DecodedImage, DecoderConfig};
use crate::error::CodecError;

/// Header information read without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
}

/// Encoded image bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedOutput {
    data: Vec<u8>,
}

impl EncodedOutput {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// One image format, in and out.
pub trait Codec {
    /// Short format name for diagnostics.
    fn name(&self) -> &'static str;

    /// Read width and height from the header.
    ///
    /// Returns `None` when `data` is not this format.
    fn probe(&self, data: &[u8]) -> Option<ImageInfo>;

    /// Peak pixel-buffer bytes held while decoding a `source` image to
    /// `width` x `height`. Checked against
    /// [`Limits::max_memory_bytes`](crate::Limits::max_memory_bytes) before
    /// decoding.
    ///
    /// The default assumes the codec decodes straight to the requested size.
    fn decode_memory(&self, source: &ImageInfo, width: u32, height: u32) -> u64 {
        let _ = source;
        u64::from(width)
            .saturating_mul(u64::from(height))
            .saturating_mul(4)
    }

    /// Fresh decoder settings.
    fn init_decoder_config(&self) -> Result<DecoderConfig, CodecError> {
        Ok(DecoderConfig::default())
    }

    /// Decode `data` to `config.layout` at `config.output_size(..)`.
    fn decode(&self, data: &[u8], config: &DecoderConfig) -> Result<DecodedImage, CodecError>;

    /// Encode RGBA8 pixels. `quality` is 0.0..=100.0; lossless codecs
    /// ignore it.
    fn encode(&self, image: &DecodedImage, quality: f32) -> Result<EncodedOutput, CodecError>;
}

impl<C: Codec + ?Sized> Codec for &C {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn probe(&self, data: &[u8]) -> Option<ImageInfo> {
        (**self).probe(data)
    }

    fn decode_memory(&self, source: &ImageInfo, width: u32, height: u32) -> u64 {
        (**self).decode_memory(source, width, height)
    }

    fn init_decoder_config(&self) -> Result<DecoderConfig, CodecError> {
        (**self).init_decoder_config()
    }

    fn decode(&self, data: &[u8], config: &DecoderConfig) -> Result<DecodedImage, CodecError> {
        (**self).decode(data, config)
    }

    fn encode(&self, image: &DecodedImage, quality: f32) -> Result<EncodedOutput, CodecError> {
        (**self).encode(image, quality)
    }
}

//! WebP codec via libwebp (the [webp](https://crates.io/crates/webp) crate).
//!
//! Always encodes lossy at the requested quality, whatever the source
//! used. Animated files probe fine but fail to decode, so they pass through.

use ::webp::{BitstreamFeatures, Decoder, Encoder};

use crate::codec::{Codec, EncodedOutput, ImageInfo};
use crate::decode::{DecodedImage, DecoderConfig};
use crate::error::CodecError;
use crate::pixel::PixelLayout;
use crate::resample::{decode_to_config, full_decode_memory};

/// The WebP format.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebpCodec;

impl Codec for WebpCodec {
    fn name(&self) -> &'static str {
        "webp"
    }

    fn probe(&self, data: &[u8]) -> Option<ImageInfo> {
        let features = BitstreamFeatures::new(data)?;
        Some(ImageInfo {
            width: features.width(),
            height: features.height(),
            has_alpha: features.has_alpha(),
        })
    }

    fn decode_memory(&self, source: &ImageInfo, width: u32, height: u32) -> u64 {
        // libwebp's buffer is copied out before resampling
        let copy = u64::from(source.width)
            .saturating_mul(u64::from(source.height))
            .saturating_mul(if source.has_alpha { 4 } else { 3 });
        full_decode_memory(source, width, height).saturating_add(copy)
    }

    fn decode(&self, data: &[u8], config: &DecoderConfig) -> Result<DecodedImage, CodecError> {
        let image = Decoder::new(data)
            .decode()
            .ok_or_else(|| CodecError::Decode("libwebp rejected bitstream".into()))?;
        let layout = if image.is_alpha() {
            PixelLayout::Rgba8
        } else {
            PixelLayout::Rgb8
        };
        let (width, height) = (image.width(), image.height());
        let pixels = image.to_vec();
        drop(image);
        decode_to_config(pixels, width, height, layout, config)
    }

    fn encode(&self, image: &DecodedImage, quality: f32) -> Result<EncodedOutput, CodecError> {
        if image.layout != PixelLayout::Rgba8 {
            return Err(CodecError::Encode(format!(
                "expected Rgba8 pixels, got {:?}",
                image.layout
            )));
        }
        let pixels = image.packed_pixels();
        let memory = Encoder::from_rgba(&pixels, image.width, image.height)
            .encode_simple(false, quality)
            .map_err(|e| CodecError::Encode(format!("{e:?}")))?;
        Ok(EncodedOutput::new(memory.to_vec()))
    }
}

//! QOI codec via [rapid-qoi](https://crates.io/crates/rapid-qoi).
//!
//! QOI is lossless, so the encode quality is ignored; recompression only
//! changes the pixel count.

use rapid_qoi::{Colors, Qoi};

use crate::codec::{Codec, EncodedOutput, ImageInfo};
use crate::decode::{DecodedImage, DecoderConfig};
use crate::error::CodecError;
use crate::pixel::PixelLayout;
use crate::resample::{decode_to_config, full_decode_memory};

/// 14-byte header plus 8-byte end marker.
const QOI_OVERHEAD: usize = 22;

/// A single QOI run op covers at most 62 pixels.
const MAX_PIXELS_PER_BYTE: u64 = 62;

/// The QOI format.
#[derive(Clone, Copy, Debug, Default)]
pub struct QoiCodec;

impl Codec for QoiCodec {
    fn name(&self) -> &'static str {
        "qoi"
    }

    fn probe(&self, data: &[u8]) -> Option<ImageInfo> {
        let header = Qoi::decode_header(data).ok()?;
        if header.width == 0 || header.height == 0 {
            return None;
        }
        Some(ImageInfo {
            width: header.width,
            height: header.height,
            has_alpha: header.colors.has_alpha(),
        })
    }

    fn decode_memory(&self, source: &ImageInfo, width: u32, height: u32) -> u64 {
        full_decode_memory(source, width, height)
    }

    fn decode(&self, data: &[u8], config: &DecoderConfig) -> Result<DecodedImage, CodecError> {
        let header =
            Qoi::decode_header(data).map_err(|e| CodecError::InvalidHeader(format!("{e:?}")))?;
        // Refuse headers that claim more pixels than the body could hold
        // before the decoder allocates for them.
        let pixels = u64::from(header.width) * u64::from(header.height);
        let body = data.len().saturating_sub(QOI_OVERHEAD) as u64;
        if pixels > body.saturating_mul(MAX_PIXELS_PER_BYTE) {
            return Err(CodecError::Decode(format!(
                "{}x{} does not fit in {} bytes",
                header.width,
                header.height,
                data.len()
            )));
        }

        let (header, pixels) =
            Qoi::decode_alloc(data).map_err(|e| CodecError::Decode(format!("{e:?}")))?;
        let layout = if header.colors.has_alpha() {
            PixelLayout::Rgba8
        } else {
            PixelLayout::Rgb8
        };
        let linear = matches!(header.colors, Colors::Rgb | Colors::Rgba);
        decode_to_config(pixels, header.width, header.height, layout, config)
            .map(|image| image.with_linear(linear))
    }

    fn encode(&self, image: &DecodedImage, _quality: f32) -> Result<EncodedOutput, CodecError> {
        if image.layout != PixelLayout::Rgba8 {
            return Err(CodecError::Encode(format!(
                "expected Rgba8 pixels, got {:?}",
                image.layout
            )));
        }
        let qoi = Qoi {
            width: image.width,
            height: image.height,
            colors: if image.linear {
                Colors::Rgba
            } else {
                Colors::SrgbLinA
            },
        };
        let data = qoi
            .encode_alloc(&image.packed_pixels())
            .map_err(|e| CodecError::Encode(format!("{e:?}")))?;
        Ok(EncodedOutput::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_test_image(w: u32, h: u32) -> Vec<u8> {
        let pixels: Vec<u8> = (0..w * h)
            .flat_map(|i| [(i % 251) as u8, (i / 7) as u8, 128, 255])
            .collect();
        Qoi {
            width: w,
            height: h,
            colors: Colors::SrgbLinA,
        }
        .encode_alloc(&pixels)
        .unwrap()
    }

    #[test]
    fn probe_reads_dimensions() {
        let data = encode_test_image(5, 9);
        let info = QoiCodec.probe(&data).unwrap();
        assert_eq!((info.width, info.height), (5, 9));
        assert!(info.has_alpha);
    }

    #[test]
    fn probe_rejects_other_bytes() {
        assert!(QoiCodec.probe(b"GIF89a not a qoi file").is_none());
        assert!(QoiCodec.probe(&[]).is_none());
    }

    #[test]
    fn decode_scales_to_config() {
        let data = encode_test_image(8, 6);
        let config = DecoderConfig {
            use_scaling: true,
            scaled_width: 4,
            scaled_height: 3,
            layout: PixelLayout::Rgba8,
        };
        let img = QoiCodec.decode(&data, &config).unwrap();
        assert_eq!((img.width, img.height), (4, 3));
        assert_eq!(img.pixels().len(), 4 * 3 * 4);
    }

    #[test]
    fn truncated_body_fails_decode() {
        let data = encode_test_image(64, 64);
        let truncated = &data[..30];
        assert!(QoiCodec.probe(truncated).is_some());
        assert!(QoiCodec.decode(truncated, &DecoderConfig::default()).is_err());
    }

    #[test]
    fn encode_roundtrips_full_size() {
        let data = encode_test_image(3, 2);
        let img = QoiCodec.decode(&data, &DecoderConfig::default()).unwrap();
        let out = QoiCodec.encode(&img, 75.0).unwrap().into_vec();
        let (header, pixels) = Qoi::decode_alloc(&out).unwrap();
        assert_eq!((header.width, header.height), (3, 2));
        assert!(matches!(header.colors, Colors::SrgbLinA));
        assert_eq!(pixels, img.pixels());
    }

    #[test]
    fn linear_colorspace_survives_reencode() {
        let data = Qoi {
            width: 4,
            height: 4,
            colors: Colors::Rgb,
        }
        .encode_alloc(&[40u8, 80, 120].repeat(16))
        .unwrap();
        let config = DecoderConfig {
            use_scaling: true,
            scaled_width: 2,
            scaled_height: 2,
            layout: PixelLayout::Rgba8,
        };
        let img = QoiCodec.decode(&data, &config).unwrap();
        assert!(img.linear);

        let out = QoiCodec.encode(&img, 75.0).unwrap();
        let header = Qoi::decode_header(out.data()).unwrap();
        assert!(matches!(header.colors, Colors::Rgba));
        // colorspace byte: 1 = all channels linear
        assert_eq!(out.data()[13], 1);
    }

    #[test]
    fn decode_memory_counts_full_size_decode() {
        let info = ImageInfo {
            width: 4000,
            height: 4000,
            has_alpha: true,
        };
        assert_eq!(
            QoiCodec.decode_memory(&info, 10, 10),
            4000 * 4000 * 4 + 10 * 10 * 4
        );
    }
}

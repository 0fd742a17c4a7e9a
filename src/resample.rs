//! Downscale decoded RGBA8 pixels to the configured size.
//!
//! Codecs without scale-on-decode decode at full size and call
//! [`decode_to_config`] to reach the size the transcoder asked for.

use fast_image_resize as fr;

use crate::codec::ImageInfo;
use crate::decode::{DecodedImage, DecoderConfig};
use crate::error::CodecError;
use crate::pixel::{PixelLayout, rgb_to_rgba};

/// Resample packed RGBA8 `pixels` from `src_w` x `src_h` to `dst_w` x `dst_h`.
///
/// Uses a box filter, which averages the source area behind each output
/// pixel. Alpha is straight; the resizer premultiplies internally.
pub fn resize_rgba(
    pixels: Vec<u8>,
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
) -> Result<Vec<u8>, CodecError> {
    if (src_w, src_h) == (dst_w, dst_h) {
        return Ok(pixels);
    }
    let src = fr::images::Image::from_vec_u8(src_w, src_h, pixels, fr::PixelType::U8x4)
        .map_err(|e| CodecError::Decode(format!("resize source buffer: {e}")))?;
    let mut dst = fr::images::Image::new(dst_w, dst_h, fr::PixelType::U8x4);

    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Box));
    fr::Resizer::new()
        .resize(&src, &mut dst, Some(&options))
        .map_err(|e| CodecError::Decode(format!("resize: {e}")))?;
    Ok(dst.into_vec())
}

/// Turn a full-size decode into the image `config` describes.
///
/// `pixels` are tightly packed in `layout`; RGB is expanded to RGBA first.
pub fn decode_to_config(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    layout: PixelLayout,
    config: &DecoderConfig,
) -> Result<DecodedImage, CodecError> {
    if config.layout != PixelLayout::Rgba8 {
        return Err(CodecError::ConfigInit(format!(
            "unsupported output layout {:?}",
            config.layout
        )));
    }
    let rgba = match layout {
        PixelLayout::Rgba8 => pixels,
        PixelLayout::Rgb8 => {
            let rgba = rgb_to_rgba(&pixels);
            drop(pixels);
            rgba
        }
    };
    let (dst_w, dst_h) = config.output_size(width, height);
    if dst_w == 0 || dst_h == 0 || dst_w > width || dst_h > height {
        return Err(CodecError::Decode(format!(
            "cannot scale {width}x{height} to {dst_w}x{dst_h}"
        )));
    }
    let scaled = resize_rgba(rgba, width, height, dst_w, dst_h)?;
    DecodedImage::new(scaled, dst_w, dst_h, PixelLayout::Rgba8)
}

/// Peak pixel bytes of a full-size decode of `source` followed by
/// [`decode_to_config`] to `width` x `height`.
///
/// Counts the decoder's own buffer, the RGBA expansion of RGB sources and
/// the resize destination.
pub fn full_decode_memory(source: &ImageInfo, width: u32, height: u32) -> u64 {
    let src = u64::from(source.width).saturating_mul(u64::from(source.height));
    let dst = u64::from(width).saturating_mul(u64::from(height));
    let decoded = src.saturating_mul(if source.has_alpha { 4 } else { 3 });
    let expanded = if source.has_alpha {
        0
    } else {
        src.saturating_mul(4)
    };
    decoded
        .saturating_add(expanded)
        .saturating_add(dst.saturating_mul(4))
}

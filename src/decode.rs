use std::borrow::Cow;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::CodecError;
use crate::pixel::PixelLayout;

/// Decoder settings for one decode call.
///
/// A codec hands out a fresh config from
/// [`Codec::init_decoder_config`](crate::Codec::init_decoder_config); the
/// transcoder then fills in the scaled size and the output layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Whether the decoder should produce `scaled_width` x `scaled_height`
    /// instead of the source dimensions.
    pub use_scaling: bool,
    pub scaled_width: u32,
    pub scaled_height: u32,
    /// Output layout. The transcoder always asks for [`PixelLayout::Rgba8`].
    pub layout: PixelLayout,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            use_scaling: false,
            scaled_width: 0,
            scaled_height: 0,
            layout: PixelLayout::Rgba8,
        }
    }
}

impl DecoderConfig {
    /// Output size for a source of `width` x `height`.
    pub fn output_size(&self, width: u32, height: u32) -> (u32, u32) {
        if self.use_scaling {
            (self.scaled_width, self.scaled_height)
        } else {
            (width, height)
        }
    }
}

/// Decoded pixels at the size actually produced by the decoder.
///
/// Rows are `stride` bytes apart; only the first `width * bytes_per_pixel`
/// bytes of each row are pixels.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub layout: PixelLayout,
    /// Channel values are linear light rather than sRGB-encoded.
    pub linear: bool,
}

impl DecodedImage {
    /// Wrap a tightly packed pixel buffer (`stride == width * bpp`).
    pub fn new(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, CodecError> {
        let stride = (width as usize)
            .checked_mul(layout.bytes_per_pixel())
            .ok_or(CodecError::DimensionsTooLarge { width, height })?;
        Self::with_stride(pixels, width, height, stride, layout)
    }

    /// Wrap a pixel buffer whose rows are `stride` bytes apart.
    pub fn with_stride(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        stride: usize,
        layout: PixelLayout,
    ) -> Result<Self, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::InvalidHeader(format!(
                "decoded image has zero dimension: {width}x{height}"
            )));
        }
        let bpp = layout.bytes_per_pixel();
        let row_bytes = (width as usize)
            .checked_mul(bpp)
            .ok_or(CodecError::DimensionsTooLarge { width, height })?;
        if stride < row_bytes || stride % bpp != 0 {
            return Err(CodecError::Decode(format!(
                "stride {stride} invalid for {width} pixels of {bpp} bytes"
            )));
        }
        let needed = stride
            .checked_mul(height as usize - 1)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or(CodecError::DimensionsTooLarge { width, height })?;
        if pixels.len() < needed {
            return Err(CodecError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            stride,
            layout,
            linear: false,
        })
    }

    /// Mark the pixels as linear light (or sRGB, for `false`).
    #[must_use]
    pub fn with_linear(mut self, linear: bool) -> Self {
        self.linear = linear;
        self
    }

    /// Raw pixel buffer, including any row padding.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes of pixel data per row, without padding.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.layout.bytes_per_pixel()
    }

    /// Pixel rows, padding stripped.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let row_bytes = self.row_bytes();
        self.pixels
            .chunks(self.stride)
            .take(self.height as usize)
            .map(move |row| &row[..row_bytes])
    }

    /// Pixels without row padding. Borrows when already tightly packed.
    pub fn packed_pixels(&self) -> Cow<'_, [u8]> {
        let row_bytes = self.row_bytes();
        let packed_len = row_bytes * self.height as usize;
        if self.stride == row_bytes {
            Cow::Borrowed(&self.pixels[..packed_len])
        } else {
            let mut out = Vec::with_capacity(packed_len);
            for row in self.rows() {
                out.extend_from_slice(row);
            }
            Cow::Owned(out)
        }
    }

    /// Take ownership of the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Reinterpret packed RGBA8 pixel data as typed pixels.
    ///
    /// Returns [`CodecError::Decode`] for other layouts or padded rows.
    #[cfg(feature = "rgb")]
    pub fn as_rgba_pixels(&self) -> Result<&[rgb::RGBA8], CodecError> {
        if self.layout != PixelLayout::Rgba8 {
            return Err(CodecError::Decode(format!(
                "expected Rgba8 pixels, got {:?}",
                self.layout
            )));
        }
        if self.stride != self.row_bytes() {
            return Err(CodecError::Decode("rows are padded".into()));
        }
        let len = self.row_bytes() * self.height as usize;
        Ok(self.pixels[..len].as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of RGBA8 pixels.
    ///
    /// Returns [`CodecError::Decode`] if the layout is not RGBA8.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Result<imgref::ImgRef<'_, rgb::RGBA8>, CodecError> {
        if self.layout != PixelLayout::Rgba8 {
            return Err(CodecError::Decode(format!(
                "expected Rgba8 pixels, got {:?}",
                self.layout
            )));
        }
        let stride_px = self.stride / 4;
        let len = self.stride * (self.height as usize - 1) + self.row_bytes();
        let pixels: &[rgb::RGBA8] = self.pixels[..len].as_pixels();
        Ok(imgref::ImgRef::new_stride(
            pixels,
            self.width as usize,
            self.height as usize,
            stride_px,
        ))
    }
}

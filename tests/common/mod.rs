//! A tiny uncompressed test format with switchable failures.
//!
//! Layout: `b"FAKE"`, width and height as u32 big-endian, then RGBA8 rows.

#![allow(dead_code)]

use std::io::{self, Read, Write};

use zenrecode::{
    Codec, CodecError, DecodedImage, DecoderConfig, EncodedOutput, ImageInfo, PixelLayout,
};

pub const MAGIC: &[u8; 4] = b"FAKE";

/// Which gate the codec sabotages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    None,
    ConfigInit,
    Decode,
    /// Decode succeeds but ignores the requested size.
    WrongSize,
    Encode,
    /// Encode succeeds with zero bytes.
    EmptyEncode,
}

#[derive(Clone, Copy, Debug)]
pub struct FakeCodec {
    pub fault: Fault,
}

impl FakeCodec {
    pub fn ok() -> Self {
        Self { fault: Fault::None }
    }

    pub fn failing(fault: Fault) -> Self {
        Self { fault }
    }
}

pub fn fake_image(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + (width * height * 4) as usize);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    for y in 0..height {
        for x in 0..width {
            out.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8, 255]);
        }
    }
    out
}

pub fn fake_dimensions(data: &[u8]) -> (u32, u32) {
    FakeCodec::ok()
        .probe(data)
        .map(|i| (i.width, i.height))
        .expect("not a fake image")
}

impl Codec for FakeCodec {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn probe(&self, data: &[u8]) -> Option<ImageInfo> {
        if data.len() < 12 || &data[..4] != MAGIC {
            return None;
        }
        let width = u32::from_be_bytes(data[4..8].try_into().ok()?);
        let height = u32::from_be_bytes(data[8..12].try_into().ok()?);
        if width == 0 || height == 0 {
            return None;
        }
        Some(ImageInfo {
            width,
            height,
            has_alpha: true,
        })
    }

    fn init_decoder_config(&self) -> Result<DecoderConfig, CodecError> {
        if self.fault == Fault::ConfigInit {
            return Err(CodecError::ConfigInit("injected".into()));
        }
        Ok(DecoderConfig::default())
    }

    fn decode(&self, data: &[u8], config: &DecoderConfig) -> Result<DecodedImage, CodecError> {
        let info = self.probe(data).ok_or(CodecError::UnrecognizedFormat)?;
        let (sw, sh) = (info.width as usize, info.height as usize);
        let body = &data[12..];
        if body.len() < sw * sh * 4 {
            return Err(CodecError::Decode("truncated".into()));
        }
        // Allocate before failing so a partial decode has something to drop.
        let partial = vec![0u8; 64];
        if self.fault == Fault::Decode {
            drop(partial);
            return Err(CodecError::Decode("injected".into()));
        }
        drop(partial);

        let (dw, dh) = if self.fault == Fault::WrongSize {
            (info.width, info.height + 1)
        } else {
            config.output_size(info.width, info.height)
        };
        let mut pixels = Vec::with_capacity(dw as usize * dh as usize * 4);
        for y in 0..dh as usize {
            let sy = (y * sh / dh as usize).min(sh - 1);
            for x in 0..dw as usize {
                let sx = (x * sw / dw as usize).min(sw - 1);
                let off = (sy * sw + sx) * 4;
                pixels.extend_from_slice(&body[off..off + 4]);
            }
        }
        DecodedImage::new(pixels, dw, dh, PixelLayout::Rgba8)
    }

    fn encode(&self, image: &DecodedImage, _quality: f32) -> Result<EncodedOutput, CodecError> {
        match self.fault {
            Fault::Encode => return Err(CodecError::Encode("injected".into())),
            Fault::EmptyEncode => return Ok(EncodedOutput::new(Vec::new())),
            _ => {}
        }
        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&image.width.to_be_bytes());
        out.extend_from_slice(&image.height.to_be_bytes());
        out.extend_from_slice(&image.packed_pixels());
        Ok(EncodedOutput::new(out))
    }
}

/// Writer that records how many write calls it saw and fails all of them.
#[derive(Default)]
pub struct FailingWriter {
    pub calls: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that only counts writes.
#[derive(Default)]
pub struct CountingWriter {
    pub calls: usize,
    pub bytes: Vec<u8>,
}

impl Write for CountingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reader handing out `chunk` bytes per call.
pub struct ChunkedReader<'a> {
    pub data: &'a [u8],
    pub chunk: usize,
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.max(1).min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

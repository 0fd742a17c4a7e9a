//! # zenrecode
//!
//! Same-codec image recompression for thumbnailing, with a byte-exact
//! passthrough fallback.
//!
//! One operation: read a stream into memory, and if it is an image in the
//! target codec, decode it downscaled to fit a target height, re-encode it at
//! a fixed quality, and write the result. Anything the codec cannot handle
//! (wrong format, corrupt data, decoder or encoder failure) is written back
//! unchanged instead of failing the request.
//!
//! ## Pipeline
//!
//! 1. **Ingest**: read to EOF into a buffer that starts at 64 KiB and doubles
//!    up to a 16 MiB cap. Longer input is a fatal error.
//! 2. **Transcode**: probe, init decoder config, decode with scaling, encode.
//!    Each gate that fails yields a [`PassthroughReason`].
//! 3. **Emit**: write the encoded bytes, or the original bytes on
//!    passthrough, in one write followed by a flush.
//!
//! Only stream setup, allocation, the size cap, reading and writing can fail
//! the operation ([`TranscodeError`]).
//!
//! ## Scaling
//!
//! The scale factor is `height / target` (integer division) when the image
//! is taller than the target, else `1`. Both axes are divided by it, and
//! each is clamped to at least one pixel. Images already short enough are
//! still re-encoded at full size.
//!
//! ## Codecs
//!
//! - **QOI** (`qoi` feature, default): [`QoiCodec`], lossless
//! - **WebP** (`webp` feature): [`WebpCodec`], lossy via libwebp
//!
//! Any other format can be plugged in by implementing [`Codec`].
//!
//! ## Usage
//!
//! ```no_run
//! # #[cfg(feature = "qoi")]
//! # {
//! use zenrecode::{QoiCodec, transcode_operation};
//!
//! let status = transcode_operation(
//!     &mut std::io::stdin().lock(),
//!     &mut std::io::stdout().lock(),
//!     QoiCodec,
//!     256,
//! );
//! std::process::exit(status);
//! # }
//! ```

#![forbid(unsafe_code)]

mod codec;
mod decode;
mod emit;
mod error;
mod ingest;
mod limits;
mod pixel;
mod request;
mod scale;
mod transcode;

#[cfg(feature = "resample")]
pub mod resample;

#[cfg(feature = "qoi")]
mod qoi;

#[cfg(feature = "webp")]
mod webp;

// Re-exports
pub use codec::{Codec, EncodedOutput, ImageInfo};
pub use decode::{DecodedImage, DecoderConfig};
pub use emit::emit;
pub use error::{CodecError, TranscodeError};
pub use ingest::{InputBuffer, ingest};
pub use limits::{BufferPolicy, INITIAL_BUFFER_SIZE, Limits, MAX_BUFFER_SIZE};
pub use pixel::PixelLayout;
pub use request::{Report, TranscodeRequest, transcode_operation, transcode_paths};
pub use scale::{scale_factor, scaled_dimensions};
pub use transcode::{DEFAULT_QUALITY, Outcome, PassthroughReason, Transcoded, Transcoder};

#[cfg(feature = "qoi")]
pub use qoi::QoiCodec;

#[cfg(feature = "webp")]
pub use self::webp::WebpCodec;

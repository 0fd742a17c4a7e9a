use std::collections::TryReserveError;
use std::io;

/// Errors reported by a [`Codec`](crate::Codec).
///
/// None of these fail a transcode. The pipeline maps each one to a
/// [`PassthroughReason`](crate::PassthroughReason) and emits the input bytes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("unrecognized format")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("decoder config init failed: {0}")]
    ConfigInit(String),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("encode failed: {0}")]
    Encode(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },
}

/// Fatal transcode errors. Each one fails the whole operation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TranscodeError {
    #[error("stream setup failed: {0}")]
    Setup(#[source] io::Error),

    #[error("allocating {requested} byte input buffer failed")]
    Alloc {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("input exceeds maximum buffer size of {limit} bytes")]
    CapacityExceeded { limit: usize },

    #[error("reading input failed: {0}")]
    Read(#[source] io::Error),

    #[error("writing output failed: {0}")]
    Write(#[source] io::Error),
}

impl TranscodeError {
    /// Process-style status code for this error. Always `1`.
    pub fn status_code(&self) -> i32 {
        1
    }
}

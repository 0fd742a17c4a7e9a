use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;

use crate::codec::Codec;
use crate::emit::emit;
use crate::error::TranscodeError;
use crate::ingest::ingest;
use crate::limits::{BufferPolicy, Limits};
use crate::transcode::{Outcome, PassthroughReason, Transcoded, Transcoder};

/// What a completed transcode wrote to the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// A re-encoded image was written.
    Transcoded {
        info: Transcoded,
        input_bytes: usize,
        output_bytes: usize,
    },
    /// The input was written back unchanged.
    PassedThrough {
        reason: PassthroughReason,
        bytes: usize,
    },
}

impl Report {
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Report::PassedThrough { .. })
    }
}

/// Builder for one read-transcode-write operation.
///
/// ```
/// # #[cfg(feature = "qoi")]
/// # {
/// use zenrecode::{QoiCodec, TranscodeRequest};
///
/// let mut out = Vec::new();
/// let report = TranscodeRequest::new(QoiCodec, 256)
///     .run(&mut &b"not an image"[..], &mut out)?;
/// assert!(report.is_passthrough());
/// assert_eq!(out, b"not an image");
/// # }
/// # Ok::<(), zenrecode::TranscodeError>(())
/// ```
pub struct TranscodeRequest<C> {
    transcoder: Transcoder<C>,
    target_size: i32,
    buffer: BufferPolicy,
}

impl<C: Codec> TranscodeRequest<C> {
    /// Downscale so the height fits `target_size`. The sign is ignored.
    pub fn new(codec: C, target_size: i32) -> Self {
        Self {
            transcoder: Transcoder::new(codec),
            target_size,
            buffer: BufferPolicy::default(),
        }
    }

    /// Set encode quality (default 75).
    #[must_use]
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.transcoder = self.transcoder.with_quality(quality);
        self
    }

    /// Set input buffer sizing (default 64 KiB growing to 16 MiB).
    #[must_use]
    pub fn with_buffer_policy(mut self, policy: BufferPolicy) -> Self {
        self.buffer = policy;
        self
    }

    /// Pass through images over these limits instead of decoding them.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.transcoder = self.transcoder.with_limits(limits);
        self
    }

    /// Read `input` fully, transcode it, and write exactly one payload to
    /// `output`.
    pub fn run<R, W>(&self, input: &mut R, output: &mut W) -> Result<Report, TranscodeError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let start = Instant::now();
        let name = self.transcoder.codec().name();

        let input = ingest(input, self.buffer).inspect_err(|e| log::error!("{name}: {e}"))?;
        log::debug!("{name}: read {} bytes", input.data_size());

        let report = match self.transcoder.transcode(input.data(), self.target_size) {
            Outcome::Encoded { output: encoded, info } => {
                emit(output, encoded.data()).inspect_err(|e| log::error!("{name}: {e}"))?;
                Report::Transcoded {
                    info,
                    input_bytes: input.data_size(),
                    output_bytes: encoded.len(),
                }
            }
            Outcome::Passthrough(reason) => {
                emit(output, input.data())
                    .inspect_err(|e| log::error!("{name}: passthrough ({reason}): {e}"))?;
                Report::PassedThrough {
                    reason,
                    bytes: input.data_size(),
                }
            }
        };
        log::debug!("{name}: done in {:?}", start.elapsed());
        Ok(report)
    }
}

/// Transcode `input` into `output` with default policy.
///
/// Returns `0` on success, passthrough included, and `1` on a fatal error.
pub fn transcode_operation<C, R, W>(
    input: &mut R,
    output: &mut W,
    codec: C,
    target_size: i32,
) -> i32
where
    C: Codec,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    match TranscodeRequest::new(codec, target_size).run(input, output) {
        Ok(_) => 0,
        Err(e) => e.status_code(),
    }
}

/// Transcode the file at `input` into a new file at `output`.
///
/// Failing to open the input or create the output is a setup error
/// (status `1`); nothing is read in that case.
pub fn transcode_paths<C: Codec>(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    codec: C,
    target_size: i32,
) -> i32 {
    let streams = File::open(input.as_ref())
        .and_then(|i| File::create(output.as_ref()).map(|o| (i, o)))
        .map_err(TranscodeError::Setup);
    let (mut input, output) = match streams {
        Ok(streams) => streams,
        Err(e) => {
            log::error!("setup: {e}");
            return e.status_code();
        }
    };
    let mut output = BufWriter::new(output);
    transcode_operation(&mut input, &mut output, codec, target_size)
}

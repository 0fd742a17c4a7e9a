//! Probe, configure, decode, encode.
//!
//! Every gate either advances or resolves to [`Outcome::Passthrough`]. The
//! transcoder never fails: a codec problem means the caller emits the input
//! unchanged.

use core::fmt;

use crate::codec::{Codec, EncodedOutput, ImageInfo};
use crate::decode::DecoderConfig;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::scale::{scale_factor, scaled_dimensions};

/// Default encode quality.
pub const DEFAULT_QUALITY: f32 = 75.0;

/// Why the input was emitted unchanged.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassthroughReason {
    /// Probe did not recognize the bytes.
    NotTargetFormat,
    /// Probed dimensions exceed the configured [`Limits`].
    LimitExceeded,
    /// The codec could not initialize a decoder config.
    ConfigInit,
    /// Decoding failed or produced the wrong shape.
    Decode,
    /// Encoding failed or produced no bytes.
    Encode,
}

impl fmt::Display for PassthroughReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotTargetFormat => "not target format",
            Self::LimitExceeded => "limit exceeded",
            Self::ConfigInit => "decoder config init failed",
            Self::Decode => "decode failed",
            Self::Encode => "encode failed",
        })
    }
}

/// Geometry of a successful transcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transcoded {
    pub source: ImageInfo,
    pub scale_factor: u32,
    pub width: u32,
    pub height: u32,
}

/// Result of running the transcoder over buffered input.
#[derive(Debug)]
pub enum Outcome {
    Encoded {
        output: EncodedOutput,
        info: Transcoded,
    },
    Passthrough(PassthroughReason),
}

/// Runs the four gates against one codec.
pub struct Transcoder<C> {
    codec: C,
    quality: f32,
    limits: Limits,
}

impl<C: Codec> Transcoder<C> {
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            quality: DEFAULT_QUALITY,
            limits: Limits::default(),
        }
    }

    /// Set encode quality (0.0 = smallest, 100.0 = best). NaN keeps the
    /// default.
    #[must_use]
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = if quality.is_nan() {
            DEFAULT_QUALITY
        } else {
            quality.clamp(0.0, 100.0)
        };
        self
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Transcode `data` so its height fits `target_size`.
    ///
    /// `data` is only borrowed; the caller still owns it for passthrough.
    pub fn transcode(&self, data: &[u8], target_size: i32) -> Outcome {
        let name = self.codec.name();

        let Some(source) = self.codec.probe(data) else {
            log::debug!("{name}: passthrough ({})", PassthroughReason::NotTargetFormat);
            return Outcome::Passthrough(PassthroughReason::NotTargetFormat);
        };
        log::debug!("{name}: init {}x{}", source.width, source.height);

        let factor = scale_factor(source.height, target_size);
        let (width, height) = scaled_dimensions(source.width, source.height, factor);

        let within_limits = self
            .limits
            .check(source.width, source.height)
            .and_then(|()| {
                self.limits
                    .check_memory(self.codec.decode_memory(&source, width, height))
            });
        if let Err(e) = within_limits {
            log::debug!("{name}: passthrough ({e})");
            return Outcome::Passthrough(PassthroughReason::LimitExceeded);
        }

        let mut config = match self.codec.init_decoder_config() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("{name}: passthrough ({e})");
                return Outcome::Passthrough(PassthroughReason::ConfigInit);
            }
        };
        config.use_scaling = true;
        config.scaled_width = width;
        config.scaled_height = height;
        config.layout = PixelLayout::Rgba8;
        log::debug!("{name}: config factor={factor} -> {width}x{height}");

        let image = match self.codec.decode(data, &config) {
            Ok(image) => image,
            Err(e) => {
                log::debug!("{name}: passthrough ({e})");
                return Outcome::Passthrough(PassthroughReason::Decode);
            }
        };
        if !decoded_as_configured(&config, image.width, image.height, image.layout) {
            log::debug!(
                "{name}: passthrough (decoded {}x{} {:?}, wanted {width}x{height} Rgba8)",
                image.width,
                image.height,
                image.layout
            );
            return Outcome::Passthrough(PassthroughReason::Decode);
        }
        log::debug!("{name}: decode");

        let encoded = self.codec.encode(&image, self.quality);
        drop(image);
        let output = match encoded {
            Ok(output) if !output.is_empty() => output,
            Ok(_) => {
                log::debug!("{name}: passthrough (encoder produced no bytes)");
                return Outcome::Passthrough(PassthroughReason::Encode);
            }
            Err(e) => {
                log::debug!("{name}: passthrough ({e})");
                return Outcome::Passthrough(PassthroughReason::Encode);
            }
        };
        log::debug!("{name}: encode {} -> {} bytes", data.len(), output.len());

        Outcome::Encoded {
            output,
            info: Transcoded {
                source,
                scale_factor: factor,
                width,
                height,
            },
        }
    }
}

fn decoded_as_configured(
    config: &DecoderConfig,
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> bool {
    (config.scaled_width, config.scaled_height) == (width, height) && layout == config.layout
}

use crate::error::CodecError;

/// Initial input buffer capacity: 64 KiB.
pub const INITIAL_BUFFER_SIZE: usize = 64 * 1024;

/// Hard cap on buffered input: 16 MiB.
pub const MAX_BUFFER_SIZE: usize = 16 * 1024 * 1024;

/// How the input buffer is sized while reading a stream of unknown length.
///
/// The buffer starts at `initial_size` and doubles on every fill, never
/// past `max_size`. Input longer than `max_size` fails the operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferPolicy {
    pub initial_size: usize,
    pub max_size: usize,
}

impl Default for BufferPolicy {
    fn default() -> Self {
        Self {
            initial_size: INITIAL_BUFFER_SIZE,
            max_size: MAX_BUFFER_SIZE,
        }
    }
}

impl BufferPolicy {
    /// Clamp to a usable shape: at least one byte, initial never above max.
    pub(crate) fn normalized(self) -> Self {
        let max_size = self.max_size.max(1);
        Self {
            initial_size: self.initial_size.clamp(1, max_size),
            max_size,
        }
    }
}

/// Resource limits checked after probing, before anything is decoded.
///
/// All fields default to `None` (no limit). An image over a limit is not an
/// error: it is passed through untouched.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum source pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum pixel-buffer bytes a decode may hold at once, as reported by
    /// [`Codec::decode_memory`](crate::Codec::decode_memory).
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check source dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), CodecError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(CodecError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(CodecError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(CodecError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that a pixel buffer allocation is within memory limits.
    pub(crate) fn check_memory(&self, bytes: u64) -> Result<(), CodecError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes > max_mem {
                return Err(CodecError::LimitExceeded(format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_constants() {
        let policy = BufferPolicy::default();
        assert_eq!(policy.initial_size, 64 * 1024);
        assert_eq!(policy.max_size, 16 * 1024 * 1024);
    }

    #[test]
    fn normalized_policy_never_inverts() {
        let p = BufferPolicy {
            initial_size: 1000,
            max_size: 10,
        }
        .normalized();
        assert_eq!(p.initial_size, 10);
        assert_eq!(p.max_size, 10);

        let p = BufferPolicy {
            initial_size: 0,
            max_size: 0,
        }
        .normalized();
        assert_eq!(p.initial_size, 1);
        assert_eq!(p.max_size, 1);
    }

    #[test]
    fn no_limits_accepts_anything() {
        let limits = Limits::default();
        assert!(limits.check(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_memory(u64::MAX).is_ok());
    }

    #[test]
    fn pixel_limit_rejects() {
        let limits = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(limits.check(10, 10).is_ok());
        assert!(matches!(
            limits.check(10, 11),
            Err(CodecError::LimitExceeded(_))
        ));
    }
}

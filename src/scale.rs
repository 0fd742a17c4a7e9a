//! Downscale arithmetic.
//!
//! The factor is derived from height alone and applied to both axes with
//! integer division, so output never exceeds the source size.

/// Integer downscale factor for an image `height` pixels tall.
///
/// The sign of `target_size` is ignored. A target of zero, or one at least
/// as tall as the image, yields `1`.
pub fn scale_factor(height: u32, target_size: i32) -> u32 {
    let target = target_size.unsigned_abs();
    if target > 0 && height > target {
        height / target
    } else {
        1
    }
}

/// Dimensions after dividing both axes by `factor`.
///
/// Each axis is clamped to at least one pixel, which only matters when an
/// axis is shorter than the factor (very wide or very tall images).
pub fn scaled_dimensions(width: u32, height: u32, factor: u32) -> (u32, u32) {
    let factor = factor.max(1);
    ((width / factor).max(1), (height / factor).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_tall_image() {
        let f = scale_factor(1000, 500);
        assert_eq!(f, 2);
        assert_eq!(scaled_dimensions(500, 1000, f), (250, 500));
    }

    #[test]
    fn no_scaling_when_short_enough() {
        assert_eq!(scale_factor(100, 500), 1);
        assert_eq!(scale_factor(500, 500), 1);
        assert_eq!(scaled_dimensions(80, 100, 1), (80, 100));
    }

    #[test]
    fn zero_target_means_no_scaling() {
        assert_eq!(scale_factor(1000, 0), 1);
    }

    #[test]
    fn sign_is_ignored() {
        for (h, t) in [(1000, 500), (999, 7), (10, 3), (1, 1), (4096, 333)] {
            assert_eq!(scale_factor(h, t), scale_factor(h, -t));
        }
        assert_eq!(scale_factor(u32::MAX, i32::MIN), 1);
    }

    #[test]
    fn truncating_quirks() {
        // 999 / 500 = 1: no scaling even though the image is taller
        assert_eq!(scale_factor(999, 500), 1);
        // 1499 / 500 = 2, 1499 / 2 = 749: result is above the target
        let f = scale_factor(1499, 500);
        assert_eq!(f, 2);
        assert_eq!(scaled_dimensions(10, 1499, f).1, 749);
    }

    #[test]
    fn scaled_height_matches_double_division() {
        for h in [501u32, 777, 1000, 1001, 4000, 65535] {
            for t in [1i32, 2, 3, 100, 250, 500] {
                if h > t as u32 {
                    let (_, sh) = scaled_dimensions(1, h, scale_factor(h, t));
                    assert_eq!(sh, h / (h / t as u32));
                }
            }
        }
    }

    #[test]
    fn narrow_axis_clamps_to_one() {
        let f = scale_factor(10_000, 10);
        assert_eq!(f, 1000);
        assert_eq!(scaled_dimensions(3, 10_000, f), (1, 10));
    }
}

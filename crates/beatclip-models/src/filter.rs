//! The fixed visual look applied to every selected segment.

use serde::{Deserialize, Serialize};

/// Default brightness offset (darken; ffmpeg `eq` range is [-1, 1]).
pub const DEFAULT_BRIGHTNESS: f64 = -0.5;
/// Default contrast multiplier (1.0 is neutral; below flattens).
pub const DEFAULT_CONTRAST: f64 = 0.3;

/// Darken/low-contrast exposure filter.
///
/// The parameters are tunable constants, not derived data: every segment in
/// a montage gets the same look.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureFilter {
    /// Brightness offset in [-1, 1]
    pub brightness: f64,
    /// Contrast multiplier, 1.0 neutral
    pub contrast: f64,
}

impl Default for ExposureFilter {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            contrast: DEFAULT_CONTRAST,
        }
    }
}

impl ExposureFilter {
    /// Render as an ffmpeg `eq` filter expression.
    pub fn to_eq_filter(&self) -> String {
        format!(
            "eq=brightness={:.3}:contrast={:.3}",
            self.brightness, self.contrast
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_eq_filter() {
        let filter = ExposureFilter::default();
        assert_eq!(filter.to_eq_filter(), "eq=brightness=-0.500:contrast=0.300");
    }

    #[test]
    fn test_custom_eq_filter() {
        let filter = ExposureFilter {
            brightness: -0.2,
            contrast: 0.8,
        };
        assert_eq!(filter.to_eq_filter(), "eq=brightness=-0.200:contrast=0.800");
    }
}

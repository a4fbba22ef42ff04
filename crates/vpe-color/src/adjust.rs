//! Brightness, contrast, hue and saturation.
//!
//! Values arrive in "software" units (the ranges a control panel shows)
//! and are remapped linearly into "hardware" units before they reach the
//! matrix formulas.
//!
//! | Control | Software | Hardware | Default |
//! |---------|----------|----------|---------|
//! | brightness | [-100, 100] | [-0.25, 0.25] | 0 |
//! | contrast | [0, 2] | [0, 2] | 1 |
//! | hue | [-180, 180] | [-180, 180] degrees | 0 |
//! | saturation | [0, 3] | [0, 3] | 1 |

use serde::{Deserialize, Serialize};

/// Inclusive value range with its default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Neutral value.
    pub default: f64,
}

/// Software and hardware ranges of one control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustControl {
    /// Software units.
    pub sw: AdjustRange,
    /// Hardware units.
    pub hw: AdjustRange,
}

impl AdjustControl {
    /// Software value to hardware units.
    pub fn to_hw(&self, value: f64) -> f64 {
        remap(value, &self.sw, &self.hw)
    }
}

/// Brightness ranges.
pub const BRIGHTNESS: AdjustControl = AdjustControl {
    sw: AdjustRange { min: -100.0, max: 100.0, default: 0.0 },
    hw: AdjustRange { min: -0.25, max: 0.25, default: 0.0 },
};

/// Contrast ranges.
pub const CONTRAST: AdjustControl = AdjustControl {
    sw: AdjustRange { min: 0.0, max: 2.0, default: 1.0 },
    hw: AdjustRange { min: 0.0, max: 2.0, default: 1.0 },
};

/// Hue ranges (degrees).
pub const HUE: AdjustControl = AdjustControl {
    sw: AdjustRange { min: -180.0, max: 180.0, default: 0.0 },
    hw: AdjustRange { min: -180.0, max: 180.0, default: 0.0 },
};

/// Saturation ranges.
pub const SATURATION: AdjustControl = AdjustControl {
    sw: AdjustRange { min: 0.0, max: 3.0, default: 1.0 },
    hw: AdjustRange { min: 0.0, max: 3.0, default: 1.0 },
};

/// Linear remap between ranges; the input is clamped to `from`.
pub fn remap(value: f64, from: &AdjustRange, to: &AdjustRange) -> f64 {
    let span = from.max - from.min;
    if span == 0.0 {
        return to.default;
    }
    let v = value.clamp(from.min, from.max);
    to.min + (v - from.min) * (to.max - to.min) / span
}

/// Per-stream color adjustments in software units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorAdjustments {
    /// Brightness, [-100, 100].
    pub brightness: f64,
    /// Contrast, [0, 2].
    pub contrast: f64,
    /// Hue rotation in degrees, [-180, 180].
    pub hue: f64,
    /// Saturation, [0, 3].
    pub saturation: f64,
}

impl Default for ColorAdjustments {
    fn default() -> Self {
        Self {
            brightness: BRIGHTNESS.sw.default,
            contrast: CONTRAST.sw.default,
            hue: HUE.sw.default,
            saturation: SATURATION.sw.default,
        }
    }
}

impl ColorAdjustments {
    /// All four controls at their neutral values.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Converts to hardware units.
    pub fn to_hw(&self) -> HwAdjustments {
        HwAdjustments {
            brightness: BRIGHTNESS.to_hw(self.brightness),
            contrast: CONTRAST.to_hw(self.contrast),
            hue_degrees: HUE.to_hw(self.hue),
            saturation: SATURATION.to_hw(self.saturation),
        }
    }
}

/// Adjustments in hardware units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HwAdjustments {
    /// Additive offset.
    pub brightness: f64,
    /// Multiplicative gain.
    pub contrast: f64,
    /// Chroma rotation.
    pub hue_degrees: f64,
    /// Chroma gain.
    pub saturation: f64,
}

impl HwAdjustments {
    /// `(sin, cos)` of the hue angle.
    pub fn hue_sin_cos(&self) -> (f64, f64) {
        self.hue_degrees.to_radians().sin_cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_defaults_map_to_defaults() {
        let hw = ColorAdjustments::default().to_hw();
        assert_eq!(hw.brightness, 0.0);
        assert_eq!(hw.contrast, 1.0);
        assert_eq!(hw.hue_degrees, 0.0);
        assert_eq!(hw.saturation, 1.0);
    }

    #[test]
    fn test_brightness_range() {
        assert_abs_diff_eq!(BRIGHTNESS.to_hw(100.0), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(BRIGHTNESS.to_hw(-50.0), -0.125, epsilon = 1e-12);
        // clamped
        assert_abs_diff_eq!(BRIGHTNESS.to_hw(400.0), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_hue_sin_cos() {
        let adj = ColorAdjustments {
            hue: 90.0,
            ..Default::default()
        };
        let (s, c) = adj.to_hw().hue_sin_cos();
        assert_abs_diff_eq!(s, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c, 0.0, epsilon = 1e-12);
        assert!(!adj.is_default());
    }
}

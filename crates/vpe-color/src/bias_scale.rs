//! Per-channel bias and scale ahead of the CSC.
//!
//! The CSC constants assume normalized 8-bit-referenced values: studio
//! black at 16/255, studio white at 235/255 and chroma centered on 0.5.
//! Deeper formats normalize by `2^n - 1`, which moves those levels
//! slightly; this stage moves them back:
//!
//! ```text
//! out = scale * in + bias
//! ```
//!
//! 8-bit and float inputs pass through unchanged, as does full-range RGB.

use serde::{Deserialize, Serialize};
use vpe_core::ColorSpace;
use vpe_math::Fixed31_32;

/// Stored bit depth of stream samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelDepth {
    /// 8 bits per component.
    #[default]
    Bits8,
    /// 10 bits per component.
    Bits10,
    /// 12 bits per component.
    Bits12,
    /// Half float.
    Float16,
}

impl PixelDepth {
    /// Integer bit count, `None` for float formats.
    pub const fn bits(self) -> Option<u32> {
        match self {
            Self::Bits8 => Some(8),
            Self::Bits10 => Some(10),
            Self::Bits12 => Some(12),
            Self::Float16 => None,
        }
    }
}

/// Scale and bias of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBiasScale {
    /// Multiplier.
    pub scale: Fixed31_32,
    /// Offset added after scaling.
    pub bias: Fixed31_32,
}

impl ChannelBiasScale {
    /// Pass-through.
    pub const IDENTITY: Self = Self {
        scale: Fixed31_32::ONE,
        bias: Fixed31_32::ZERO,
    };

    fn new(scale: f64, bias: f64) -> Self {
        Self {
            scale: Fixed31_32::from_f64(scale),
            bias: Fixed31_32::from_f64(bias),
        }
    }

    /// Applies to a normalized value.
    pub fn apply(&self, v: f64) -> f64 {
        self.scale.to_f64() * v + self.bias.to_f64()
    }
}

/// Bias and scale for Y/R, Cb/G and Cr/B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiasScale {
    /// Per-channel coefficients.
    pub channels: [ChannelBiasScale; 3],
}

impl BiasScale {
    /// Pass-through on every channel.
    pub const IDENTITY: Self = Self {
        channels: [ChannelBiasScale::IDENTITY; 3],
    };

    /// True when every channel passes through.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Computes bias and scale for a stream.
pub fn compute_bias_scale(cs: ColorSpace, depth: PixelDepth) -> BiasScale {
    let Some(bits) = depth.bits() else {
        return BiasScale::IDENTITY;
    };
    if bits == 8 {
        return BiasScale::IDENTITY;
    }
    let max = ((1u32 << bits) - 1) as f64;
    let step = (1u32 << (bits - 8)) as f64;

    // studio: code 16*step maps to 16/255, 235*step to 235/255
    let studio_scale = (219.0 / 255.0) / (219.0 * step / max);
    let studio = |level8: f64, target: f64| ChannelBiasScale::new(studio_scale, target - studio_scale * level8 * step / max);
    // full-range chroma: center code 128*step maps to 0.5
    let full_chroma = ChannelBiasScale::new(1.0, 0.5 - 128.0 * step / max);

    match (cs.is_ycbcr(), cs.is_limited()) {
        (true, true) => {
            let chroma = studio(128.0, 0.5);
            BiasScale {
                channels: [studio(16.0, 16.0 / 255.0), chroma, chroma],
            }
        }
        (true, false) => BiasScale {
            channels: [ChannelBiasScale::IDENTITY, full_chroma, full_chroma],
        },
        (false, true) => BiasScale {
            channels: [studio(16.0, 16.0 / 255.0); 3],
        },
        (false, false) => BiasScale::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_cases() {
        assert!(compute_bias_scale(ColorSpace::Ycbcr709Limited, PixelDepth::Bits8).is_identity());
        assert!(compute_bias_scale(ColorSpace::Bt2020YcbcrLimited, PixelDepth::Float16).is_identity());
        assert!(compute_bias_scale(ColorSpace::Srgb, PixelDepth::Bits10).is_identity());
    }

    #[test]
    fn test_10bit_studio_levels() {
        let bs = compute_bias_scale(ColorSpace::Ycbcr709Limited, PixelDepth::Bits10);
        let y = bs.channels[0];
        assert_abs_diff_eq!(y.apply(64.0 / 1023.0), 16.0 / 255.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y.apply(940.0 / 1023.0), 235.0 / 255.0, epsilon = 1e-9);
        let c = bs.channels[1];
        assert_abs_diff_eq!(c.apply(512.0 / 1023.0), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_12bit_full_chroma_center() {
        let bs = compute_bias_scale(ColorSpace::Bt2020Ycbcr, PixelDepth::Bits12);
        assert_eq!(bs.channels[0], ChannelBiasScale::IDENTITY);
        assert_abs_diff_eq!(bs.channels[2].apply(2048.0 / 4095.0), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_studio_rgb_all_channels() {
        let bs = compute_bias_scale(ColorSpace::SrgbLimited, PixelDepth::Bits12);
        for ch in bs.channels {
            assert_abs_diff_eq!(ch.apply(256.0 / 4095.0), 16.0 / 255.0, epsilon = 1e-9);
        }
    }
}

//! Internal color-space and transfer-function enumerations.
//!
//! These are closed sets: every match over them in the engine is
//! exhaustive, so adding a variant forces every consumer to decide what
//! it means. `Unknown` is a real value signalling an unsupported
//! descriptor combination.

use crate::descriptor::ColorPrimaries;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal color space: primaries, encoding family and range folded
/// into one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Unsupported combination.
    #[default]
    Unknown,
    /// BT.709 RGB, full range.
    Srgb,
    /// BT.709 RGB, studio range.
    SrgbLimited,
    /// BT.709 RGB, linear extended range (scRGB).
    MsrefScrgb,
    /// BT.601 YCbCr, full range.
    Ycbcr601,
    /// BT.601 YCbCr, studio range.
    Ycbcr601Limited,
    /// BT.709 YCbCr, full range.
    Ycbcr709,
    /// BT.709 YCbCr, studio range.
    Ycbcr709Limited,
    /// JFIF YCbCr (BT.601 matrix, full range).
    Jfif,
    /// BT.2020 RGB, full range.
    Bt2020Rgb,
    /// BT.2020 RGB, studio range.
    Bt2020RgbLimited,
    /// BT.2020 YCbCr, full range.
    Bt2020Ycbcr,
    /// BT.2020 YCbCr, studio range.
    Bt2020YcbcrLimited,
}

impl ColorSpace {
    /// Whether samples are Y'CbCr.
    pub const fn is_ycbcr(self) -> bool {
        matches!(
            self,
            Self::Ycbcr601
                | Self::Ycbcr601Limited
                | Self::Ycbcr709
                | Self::Ycbcr709Limited
                | Self::Jfif
                | Self::Bt2020Ycbcr
                | Self::Bt2020YcbcrLimited
        )
    }

    /// Whether samples are R'G'B'.
    pub const fn is_rgb(self) -> bool {
        matches!(
            self,
            Self::Srgb | Self::SrgbLimited | Self::MsrefScrgb | Self::Bt2020Rgb | Self::Bt2020RgbLimited
        )
    }

    /// Whether samples use the studio (limited) range.
    pub const fn is_limited(self) -> bool {
        matches!(
            self,
            Self::SrgbLimited
                | Self::Ycbcr601Limited
                | Self::Ycbcr709Limited
                | Self::Bt2020RgbLimited
                | Self::Bt2020YcbcrLimited
        )
    }

    /// Primaries of this color space, `None` for [`ColorSpace::Unknown`].
    pub const fn primaries(self) -> Option<ColorPrimaries> {
        match self {
            Self::Unknown => None,
            Self::Srgb | Self::SrgbLimited | Self::MsrefScrgb | Self::Ycbcr709 | Self::Ycbcr709Limited => {
                Some(ColorPrimaries::Bt709)
            }
            Self::Ycbcr601 | Self::Ycbcr601Limited | Self::Jfif => Some(ColorPrimaries::Bt601),
            Self::Bt2020Rgb | Self::Bt2020RgbLimited | Self::Bt2020Ycbcr | Self::Bt2020YcbcrLimited => {
                Some(ColorPrimaries::Bt2020)
            }
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Srgb => "sRGB",
            Self::SrgbLimited => "sRGB (limited)",
            Self::MsrefScrgb => "scRGB",
            Self::Ycbcr601 => "BT.601 YCbCr",
            Self::Ycbcr601Limited => "BT.601 YCbCr (limited)",
            Self::Ycbcr709 => "BT.709 YCbCr",
            Self::Ycbcr709Limited => "BT.709 YCbCr (limited)",
            Self::Jfif => "JFIF",
            Self::Bt2020Rgb => "BT.2020 RGB",
            Self::Bt2020RgbLimited => "BT.2020 RGB (limited)",
            Self::Bt2020Ycbcr => "BT.2020 YCbCr",
            Self::Bt2020YcbcrLimited => "BT.2020 YCbCr (limited)",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Internal transfer function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum), value(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum TransferFunction {
    /// Unsupported curve.
    #[default]
    #[cfg_attr(feature = "clap", value(skip))]
    Unknown,
    /// sRGB piecewise curve.
    Srgb,
    /// BT.709 piecewise curve.
    Bt709,
    /// BT.1886 pure 2.4 power.
    Bt1886,
    /// SMPTE ST.2084, linear 1.0 = 10000 cd/m2.
    Pq2084,
    /// SMPTE ST.2084, linear 1.0 = mastering peak.
    NormalizedPq,
    /// ARIB STD-B67.
    Hlg,
    /// Linear light.
    Linear,
}

impl TransferFunction {
    /// Whether the curve carries HDR signal.
    pub const fn is_hdr(self) -> bool {
        matches!(self, Self::Pq2084 | Self::NormalizedPq | Self::Hlg)
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Srgb => "sRGB",
            Self::Bt709 => "BT.709",
            Self::Bt1886 => "BT.1886",
            Self::Pq2084 => "PQ",
            Self::NormalizedPq => "PQ (normalized)",
            Self::Hlg => "HLG",
            Self::Linear => "linear",
        }
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

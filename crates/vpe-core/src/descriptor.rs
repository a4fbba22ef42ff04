//! External color descriptors.
//!
//! A [`ColorDescriptor`] is what the surrounding driver knows about a
//! surface: which primaries it was mastered with, how its values are
//! encoded, and over which numeric range. It is immutable input to a
//! build call; the classifier in `vpe-color` turns it into the internal
//! [`ColorSpace`](crate::ColorSpace) / [`TransferFunction`](crate::TransferFunction)
//! pair.
//!
//! # Usage
//!
//! ```
//! use vpe_core::prelude::*;
//!
//! let video = ColorDescriptor::new(
//!     ColorPrimaries::Bt709,
//!     TransferCurve::Bt709,
//!     ColorRange::Studio,
//!     PixelEncoding::YCbCr,
//! );
//! assert_eq!(video.chroma_siting, ChromaSiting::Left);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Color primaries of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum), value(rename_all = "lower"))]
#[serde(rename_all = "lowercase")]
pub enum ColorPrimaries {
    /// ITU-R BT.601 (SMPTE 170M).
    Bt601,
    /// ITU-R BT.709 / sRGB.
    Bt709,
    /// ITU-R BT.2020.
    Bt2020,
    /// JPEG File Interchange Format (BT.601 primaries, full range YCbCr).
    Jfif,
}

/// Transfer curve tag carried by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum), value(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum TransferCurve {
    /// IEC 61966-2-1 sRGB.
    Srgb,
    /// ITU-R BT.709 OETF.
    Bt709,
    /// Pure gamma 2.2.
    G22,
    /// Pure gamma 2.4 (BT.1886).
    G24,
    /// Linear light.
    G10,
    /// SMPTE ST.2084.
    Pq,
    /// SMPTE ST.2084 with linear 1.0 mapped to the mastering peak.
    PqNormalized,
    /// ARIB STD-B67 hybrid log-gamma.
    Hlg,
}

/// Numeric range of stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum), value(rename_all = "lower"))]
#[serde(rename_all = "lowercase")]
pub enum ColorRange {
    /// Full code range.
    #[default]
    Full,
    /// Studio ("limited") range, 16-235 / 16-240 at 8 bits.
    Studio,
}

/// Pixel encoding family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum), value(rename_all = "lower"))]
#[serde(rename_all = "lowercase")]
pub enum PixelEncoding {
    /// R'G'B' components.
    #[default]
    Rgb,
    /// Y'CbCr components.
    YCbCr,
}

/// Location of chroma samples relative to luma samples.
///
/// Carried through for the scaler; it does not influence classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromaSiting {
    /// Co-sited with the left luma sample (MPEG-2 style).
    #[default]
    Left,
    /// Co-sited with the top-left luma sample.
    TopLeft,
    /// Centered between luma samples.
    Center,
    /// No subsampling.
    None,
}

/// External-facing color descriptor of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorDescriptor {
    /// Color primaries.
    pub primaries: ColorPrimaries,
    /// Transfer curve tag.
    pub transfer: TransferCurve,
    /// Numeric range.
    #[serde(default)]
    pub range: ColorRange,
    /// Pixel encoding.
    #[serde(default)]
    pub encoding: PixelEncoding,
    /// Chroma siting.
    #[serde(default)]
    pub chroma_siting: ChromaSiting,
}

impl ColorDescriptor {
    /// Creates a descriptor with default (left) chroma siting.
    pub const fn new(
        primaries: ColorPrimaries,
        transfer: TransferCurve,
        range: ColorRange,
        encoding: PixelEncoding,
    ) -> Self {
        Self {
            primaries,
            transfer,
            range,
            encoding,
            chroma_siting: ChromaSiting::Left,
        }
    }

    /// Full-range sRGB, the default desktop surface.
    pub const fn srgb() -> Self {
        Self::new(ColorPrimaries::Bt709, TransferCurve::Srgb, ColorRange::Full, PixelEncoding::Rgb)
    }

    /// Full-range BT.2020 RGB with PQ, the HDR10 output surface.
    pub const fn hdr10() -> Self {
        Self::new(ColorPrimaries::Bt2020, TransferCurve::Pq, ColorRange::Full, PixelEncoding::Rgb)
    }

    /// Returns the same descriptor with a different chroma siting.
    pub const fn with_chroma_siting(mut self, siting: ChromaSiting) -> Self {
        self.chroma_siting = siting;
        self
    }
}

impl fmt::Display for ColorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}/{:?}/{:?}/{:?}",
            self.primaries, self.transfer, self.range, self.encoding
        )
    }
}

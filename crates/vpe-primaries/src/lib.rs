//! # vpe-primaries
//!
//! Color primaries, white points, and gamut remap matrix generation.
//!
//! The gamut remap stage of the pipeline maps linear RGB in one set of
//! primaries onto another. The matrix is derived through CIE XYZ:
//!
//! ```text
//! RGB_src -> XYZ -> RGB_dst
//! ```
//!
//! # Integration with vpe-core
//!
//! ```rust
//! use vpe_core::ColorPrimaries;
//! use vpe_primaries::gamut_remap_matrix;
//!
//! let m = gamut_remap_matrix(ColorPrimaries::Bt2020, ColorPrimaries::Bt709);
//! assert!(m.m[0][0] > 1.6);
//! ```
//!
//! # Included Primaries
//!
//! | Primaries | Gamut Size | Primary Use |
//! |-----------|------------|-------------|
//! | BT.601 (SMPTE 170M) | Small | SD video, JFIF |
//! | BT.709 / sRGB | Small | HD video, desktop |
//! | BT.2020 | Large | UHD, HDR10 |
//!
//! All three share the D65 white point, so no chromatic adaptation is
//! involved.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use vpe_core::ColorPrimaries;
use vpe_math::{Mat3, Vec3};

/// RGB primaries definition.
///
/// Defines a color space by its three primary colors (R, G, B) and white point,
/// all specified as CIE xy chromaticity coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y) chromaticity
    pub r: (f64, f64),
    /// Green primary (x, y) chromaticity
    pub g: (f64, f64),
    /// Blue primary (x, y) chromaticity
    pub b: (f64, f64),
    /// White point (x, y) chromaticity
    pub w: (f64, f64),
    /// Name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }

    /// Chromaticities for a descriptor's primaries tag.
    pub const fn from_tag(tag: ColorPrimaries) -> Self {
        match tag {
            ColorPrimaries::Bt601 | ColorPrimaries::Jfif => BT601,
            ColorPrimaries::Bt709 => BT709,
            ColorPrimaries::Bt2020 => BT2020,
        }
    }
}

impl From<ColorPrimaries> for Primaries {
    fn from(tag: ColorPrimaries) -> Self {
        Self::from_tag(tag)
    }
}

/// D65 white point chromaticity (daylight, ~6500K).
pub const D65_XY: (f64, f64) = (0.31270, 0.32900);

/// BT.601 / SMPTE 170M primaries (D65 white point).
pub const BT601: Primaries = Primaries {
    r: (0.6300, 0.3400),
    g: (0.3100, 0.5950),
    b: (0.1550, 0.0700),
    w: D65_XY,
    name: "BT.601",
};

/// BT.709 / sRGB primaries (D65 white point).
pub const BT709: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "BT.709",
};

/// BT.2020 primaries (D65 white point).
pub const BT2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "BT.2020",
};

/// Converts xy chromaticity to XYZ (with Y=1).
fn xy_to_xyz(x: f64, y: f64) -> Vec3 {
    if y.abs() < 1e-10 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Normalized primary matrix (SMPTE RP 177): linear RGB to XYZ with
/// RGB white landing on the white point at Y = 1.
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let [r, g, b] = [primaries.r, primaries.g, primaries.b].map(|(x, y)| xy_to_xyz(x, y));
    let unscaled = Mat3::from_col_vecs(r, g, b);
    let s = unscaled.inverse().unwrap_or(Mat3::IDENTITY) * primaries.white_xyz();
    Mat3::from_col_vecs(r * s.x, g * s.y, b * s.z)
}

/// Computes the XYZ to RGB matrix for a set of primaries.
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(primaries).inverse().unwrap_or(Mat3::IDENTITY)
}

/// Computes a matrix converting linear RGB between two sets of primaries.
pub fn rgb_to_rgb_matrix(src: &Primaries, dst: &Primaries) -> Mat3 {
    if src == dst {
        return Mat3::IDENTITY;
    }
    xyz_to_rgb_matrix(dst) * rgb_to_xyz_matrix(src)
}

/// Gamut remap matrix between two primaries tags.
pub fn gamut_remap_matrix(from: ColorPrimaries, to: ColorPrimaries) -> Mat3 {
    rgb_to_rgb_matrix(&Primaries::from_tag(from), &Primaries::from_tag(to))
}

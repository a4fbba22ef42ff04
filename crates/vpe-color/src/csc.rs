//! Input color space conversion (CSC) matrices.
//!
//! The CSC stage converts stream samples to full-range RGB (or studio
//! RGB for a limited output) and folds in the user color adjustments:
//!
//! ```text
//! M = OutRange * Adjust * Base(color space)
//! ```
//!
//! Base matrices are S2.13 constants in row order with columns
//! `(Y/R, Cb/G, Cr/B, offset)`. Inputs are normalized 8-bit-referenced
//! values with chroma centered on 0.5.
//!
//! After composition the matrix goes through [`Mat3x4::rescale`]. A
//! scale other than 1 must be compensated by the input degamma curve.

use tracing::{debug, trace, warn};
use vpe_core::ColorSpace;
use vpe_math::{Mat3x4, Rescaled, S2_13};

use crate::adjust::{ColorAdjustments, HwAdjustments};
use crate::error::{ColorError, ColorResult};

const IDENTITY: [i16; 12] = [8192, 0, 0, 0, 0, 8192, 0, 0, 0, 0, 8192, 0];

const RGB_LIMITED: [i16; 12] = [9539, 0, 0, -599, 0, 9539, 0, -599, 0, 0, 9539, -599];

const YCBCR_601: [i16; 12] = [8192, 0, 11485, -5743, 8192, -2819, -5850, 4335, 8192, 14516, 0, -7258];

const YCBCR_601_LIMITED: [i16; 12] = [9539, 0, 13075, -7136, 9539, -3209, -6660, 4336, 9539, 16525, 0, -8861];

const YCBCR_709: [i16; 12] = [8192, 0, 12901, -6450, 8192, -1535, -3835, 2685, 8192, 15201, 0, -7601];

const YCBCR_709_LIMITED: [i16; 12] = [9539, 0, 14686, -7942, 9539, -1747, -4366, 2458, 9539, 17305, 0, -9251];

const YCBCR_2020: [i16; 12] = [8192, 0, 12080, -6040, 8192, -1348, -4681, 3014, 8192, 15412, 0, -7706];

const YCBCR_2020_LIMITED: [i16; 12] = [9539, 0, 13752, -7474, 9539, -1535, -5328, 2833, 9539, 17545, 0, -9371];

// Hue/saturation constants for RGB inputs.
const LUMA: [f64; 3] = [0.299, 0.587, 0.114];
const K_COS: [[f64; 3]; 3] = [
    [0.701, -0.587, -0.114],
    [-0.299, 0.413, -0.114],
    [-0.299, -0.587, 0.886],
];
const K_SIN: [[f64; 3]; 3] = [
    [0.236568, 0.464432, -0.701],
    [-0.292569, -0.092482, 0.385051],
    [0.886, -0.741914, -0.144086],
];

const STUDIO_SCALE: f64 = 219.0 / 255.0;
const STUDIO_BIAS: f64 = 16.0 / 255.0;

/// Raw base matrix for a color space, `None` for [`ColorSpace::Unknown`].
pub fn base_registers(cs: ColorSpace) -> Option<&'static [i16; 12]> {
    Some(match cs {
        ColorSpace::Unknown => return None,
        ColorSpace::Srgb | ColorSpace::MsrefScrgb | ColorSpace::Bt2020Rgb => &IDENTITY,
        ColorSpace::SrgbLimited | ColorSpace::Bt2020RgbLimited => &RGB_LIMITED,
        ColorSpace::Ycbcr601 | ColorSpace::Jfif => &YCBCR_601,
        ColorSpace::Ycbcr601Limited => &YCBCR_601_LIMITED,
        ColorSpace::Ycbcr709 => &YCBCR_709,
        ColorSpace::Ycbcr709Limited => &YCBCR_709_LIMITED,
        ColorSpace::Bt2020Ycbcr => &YCBCR_2020,
        ColorSpace::Bt2020YcbcrLimited => &YCBCR_2020_LIMITED,
    })
}

/// Base matrix for a color space.
pub fn base_matrix(cs: ColorSpace) -> Option<Mat3x4> {
    base_registers(cs).map(Mat3x4::from_s2_13)
}

/// Adjustment matrix for R'G'B' inputs.
///
/// Rotates and scales chroma around the BT.601 luma axis, multiplies by
/// contrast and adds brightness. Identity at the neutral values.
pub fn rgb_adjust_matrix(hw: &HwAdjustments) -> Mat3x4 {
    let (sin, cos) = hw.hue_sin_cos();
    let mut m = Mat3x4::IDENTITY;
    for (r, row) in m.m.iter_mut().enumerate() {
        for c in 0..3 {
            row[c] = hw.contrast * (LUMA[c] + hw.saturation * (cos * K_COS[r][c] + sin * K_SIN[r][c]));
        }
        row[3] = hw.brightness;
    }
    m
}

/// Applies adjustments to a Y'CbCr base matrix.
///
/// Chroma is centered on zero before the hue rotation and re-biased
/// afterwards, so only the offset column absorbs the centering.
pub fn ycbcr_adjust_matrix(base: &Mat3x4, hw: &HwAdjustments) -> Mat3x4 {
    let (sin, cos) = hw.hue_sin_cos();
    let gain = hw.contrast * hw.saturation;
    let mut out = *base;
    for (dst, src) in out.m.iter_mut().zip(base.m.iter()) {
        let [y, cb, cr, offset] = *src;
        let cb_adj = gain * (cb * cos + cr * sin);
        let cr_adj = gain * (cr * cos - cb * sin);
        let centered = hw.contrast * (offset + 0.5 * (cb + cr));
        *dst = [
            hw.contrast * y,
            cb_adj,
            cr_adj,
            centered - 0.5 * (cb_adj + cr_adj) + hw.brightness,
        ];
    }
    out
}

/// Range compression applied after conversion for studio outputs.
pub fn output_range_matrix(limited: bool) -> Mat3x4 {
    if limited {
        Mat3x4::IDENTITY.scale_bias(STUDIO_SCALE, STUDIO_BIAS)
    } else {
        Mat3x4::IDENTITY
    }
}

/// A CSC matrix ready for register programming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CscMatrix {
    color_space: ColorSpace,
    regs: [S2_13; 12],
    scale: u32,
}

impl CscMatrix {
    /// Input color space.
    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Coefficients in row order.
    #[inline]
    pub fn regs(&self) -> &[S2_13; 12] {
        &self.regs
    }

    /// Raw register values in row order.
    pub fn raw(&self) -> [i16; 12] {
        self.regs.map(S2_13::raw)
    }

    /// Power-of-two divisor folded into the coefficients.
    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Coefficients as floats.
    pub fn to_mat3x4(&self) -> Mat3x4 {
        Mat3x4::from_s2_13(&self.raw())
    }
}

/// Builds the CSC matrix for `cs`.
///
/// Fails only when `cs` has no base matrix. Adjustments that cannot be
/// applied (scRGB) are skipped with a warning.
pub fn build_csc_matrix(
    cs: ColorSpace,
    adjustments: &ColorAdjustments,
    output_limited: bool,
    int_bits: u32,
) -> ColorResult<CscMatrix> {
    let base = base_matrix(cs).ok_or(ColorError::UnsupportedColorSpace(cs))?;
    trace!(%cs, ?adjustments, output_limited, int_bits, "build_csc_matrix");

    let adjusted = if adjustments.is_default() {
        base
    } else if cs == ColorSpace::MsrefScrgb {
        warn!(%cs, "color adjustments unsupported, using base matrix");
        base
    } else if cs.is_ycbcr() {
        ycbcr_adjust_matrix(&base, &adjustments.to_hw())
    } else {
        rgb_adjust_matrix(&adjustments.to_hw()).compose(&base)
    };

    let full = if output_limited {
        output_range_matrix(true).compose(&adjusted)
    } else {
        adjusted
    };

    let Rescaled { matrix, scale } = full.rescale(int_bits);
    if scale != 1 {
        debug!(%cs, scale, max = full.max_abs(), "CSC matrix rescaled");
    }
    Ok(CscMatrix {
        color_space: cs,
        regs: matrix.to_s2_13(),
        scale,
    })
}

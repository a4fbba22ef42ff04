//! Output color space conversion and denormalization clamp.
//!
//! For a Y'CbCr output the stream CSC lands in full-range R'G'B' and the
//! output CSC, placed after the output regamma, encodes it back as
//! Y'CbCr with the studio offsets folded in. It is the inverse of the base
//! matrix of the output color space. RGB outputs bypass it; their studio
//! range is already part of the stream CSC.
//!
//! The denorm clamp bounds the integer codes written at the output depth.
//! Channels follow the output CSC rows: R, G, B or Y, Cb, Cr.

use tracing::debug;
use vpe_core::ColorSpace;
use vpe_math::{Mat3x4, Rescaled, S2_13};

use crate::bias_scale::PixelDepth;
use crate::csc::base_matrix;
use crate::error::{ColorError, ColorResult};

/// Code range per channel at the output depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenormClamp {
    /// Output bit depth.
    pub bits: u32,
    /// Lowest code per channel.
    pub min: [u32; 3],
    /// Highest code per channel.
    pub max: [u32; 3],
}

impl DenormClamp {
    /// Clamp for `cs` at `depth`, `None` for float outputs.
    pub fn new(cs: ColorSpace, depth: PixelDepth) -> Option<Self> {
        let bits = depth.bits()?;
        if !cs.is_limited() {
            let top = (1 << bits) - 1;
            return Some(Self {
                bits,
                min: [0; 3],
                max: [top; 3],
            });
        }
        let shift = bits - 8;
        let (luma, chroma) = (235 << shift, 240 << shift);
        let max = if cs.is_ycbcr() {
            [luma, chroma, chroma]
        } else {
            [luma; 3]
        };
        Some(Self {
            bits,
            min: [16 << shift; 3],
            max,
        })
    }
}

/// Output CSC ready for register programming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCsc {
    color_space: ColorSpace,
    regs: Option<[S2_13; 12]>,
    clamp: Option<DenormClamp>,
}

impl OutputCsc {
    /// Output color space.
    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// True when the stage passes R'G'B' through.
    #[inline]
    pub fn is_bypass(&self) -> bool {
        self.regs.is_none()
    }

    /// Coefficients in row order, `None` in bypass.
    #[inline]
    pub fn regs(&self) -> Option<&[S2_13; 12]> {
        self.regs.as_ref()
    }

    /// Raw register values in row order, `None` in bypass.
    pub fn raw(&self) -> Option<[i16; 12]> {
        self.regs.map(|r| r.map(S2_13::raw))
    }

    /// Coefficients as floats; identity in bypass.
    pub fn to_mat3x4(&self) -> Mat3x4 {
        self.raw().map_or(Mat3x4::IDENTITY, |r| Mat3x4::from_s2_13(&r))
    }

    /// Denorm clamp, `None` for float outputs.
    #[inline]
    pub fn clamp(&self) -> Option<&DenormClamp> {
        self.clamp.as_ref()
    }
}

/// Builds the output CSC and clamp for `cs` at `depth`.
///
/// Nothing downstream can undo a rescale, so an inverse that leaves the
/// `int_bits` budget is rejected.
pub fn build_output_csc(cs: ColorSpace, depth: PixelDepth, int_bits: u32) -> ColorResult<OutputCsc> {
    let clamp = DenormClamp::new(cs, depth);
    if cs.is_rgb() {
        return Ok(OutputCsc {
            color_space: cs,
            regs: None,
            clamp,
        });
    }
    let base = base_matrix(cs).ok_or(ColorError::UnsupportedOutput(cs))?;
    let encode = base.inverse().ok_or(ColorError::UnsupportedOutput(cs))?;
    let Rescaled { matrix, scale } = encode.rescale(int_bits);
    if scale != 1 {
        return Err(ColorError::UnsupportedOutput(cs));
    }
    debug!(%cs, ?depth, "output CSC");
    Ok(OutputCsc {
        color_space: cs,
        regs: Some(matrix.to_s2_13()),
        clamp,
    })
}

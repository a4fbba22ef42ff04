//! Cached per-stream and output state.
//!
//! Everything here is owned by a [`ColorEngine`](crate::ColorEngine) and
//! only replaced by a successful build. Accessors expose the built
//! structures to the register writer.

use serde::Serialize;
use vpe_core::{ColorSpace, HdrMetadata, TransferFunction};
use vpe_math::Fixed31_32;
use vpe_transfer::TransferFunctionCurve;

use crate::adjust::ColorAdjustments;
use crate::bias_scale::{BiasScale, PixelDepth};
use crate::classify::Classification;
use crate::csc::CscMatrix;
use crate::gamut::GamutRemap;
use crate::output_csc::OutputCsc;
use crate::tonemap::ToneMapState;

/// What changed in one build call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct DirtyFlags {
    /// Color space, adjustments, pixel depth or tone-map switch changed,
    /// or the output forced a new CSC or gamut remap.
    pub color_space: bool,
    /// Transfer function changed or the input curve had to be rebuilt.
    pub transfer_function: bool,
    /// Tone-mapping stages were rebuilt or dropped. Never set on the output.
    pub tone_map: bool,
}

impl DirtyFlags {
    /// Nothing changed.
    pub const CLEAN: Self = Self {
        color_space: false,
        transfer_function: false,
        tone_map: false,
    };

    /// True if any flag is set.
    #[inline]
    pub fn any(&self) -> bool {
        self.color_space || self.transfer_function || self.tone_map
    }
}

/// Cached state of one input stream.
#[derive(Debug, Clone, Default)]
pub struct StreamColorState {
    pub(crate) classification: Classification,
    pub(crate) adjustments: ColorAdjustments,
    pub(crate) pixel_depth: PixelDepth,
    pub(crate) hdr: HdrMetadata,
    pub(crate) tone_map_enabled: bool,
    pub(crate) csc: Option<Box<CscMatrix>>,
    pub(crate) input_curve: Option<TransferFunctionCurve>,
    pub(crate) bias_scale: Option<Box<BiasScale>>,
    pub(crate) gamut: Option<Box<GamutRemap>>,
    pub(crate) tone_map: Option<Box<ToneMapState>>,
    pub(crate) white_point_gain: Fixed31_32,
    pub(crate) dirty: DirtyFlags,
}

impl StreamColorState {
    /// Internal color space.
    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.classification.color_space
    }

    /// Internal transfer function.
    #[inline]
    pub fn transfer_function(&self) -> TransferFunction {
        self.classification.transfer_function
    }

    /// Adjustments the CSC was built with.
    #[inline]
    pub fn adjustments(&self) -> &ColorAdjustments {
        &self.adjustments
    }

    /// Sample depth.
    #[inline]
    pub fn pixel_depth(&self) -> PixelDepth {
        self.pixel_depth
    }

    /// Whether the stream goes through the 3D LUT.
    #[inline]
    pub fn tone_map_enabled(&self) -> bool {
        self.tone_map_enabled
    }

    /// Input CSC.
    pub fn csc(&self) -> Option<&CscMatrix> {
        self.csc.as_deref()
    }

    /// CSC rescale factor, 1 before the first build.
    pub fn matrix_scale(&self) -> u32 {
        self.csc.as_ref().map_or(1, |m| m.scale())
    }

    /// Stream degamma.
    pub fn input_curve(&self) -> Option<&TransferFunctionCurve> {
        self.input_curve.as_ref()
    }

    /// Bias and scale ahead of the CSC.
    pub fn bias_scale(&self) -> Option<&BiasScale> {
        self.bias_scale.as_deref()
    }

    /// Stream primaries to output primaries.
    pub fn gamut(&self) -> Option<&GamutRemap> {
        self.gamut.as_deref()
    }

    /// Tone-mapping stages, present while tone mapping is enabled.
    pub fn tone_map(&self) -> Option<&ToneMapState> {
        self.tone_map.as_deref()
    }

    /// SDR/HDR white gain.
    #[inline]
    pub fn white_point_gain(&self) -> Fixed31_32 {
        self.white_point_gain
    }

    /// Flags of the last build.
    #[inline]
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }
}

/// Cached state of the output path.
#[derive(Debug, Clone, Default)]
pub struct OutputColorState {
    pub(crate) classification: Classification,
    pub(crate) hdr: HdrMetadata,
    pub(crate) pixel_depth: PixelDepth,
    pub(crate) regamma: Option<TransferFunctionCurve>,
    pub(crate) csc: Option<Box<OutputCsc>>,
    pub(crate) dirty: DirtyFlags,
}

impl OutputColorState {
    /// Internal color space.
    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.classification.color_space
    }

    /// Internal transfer function.
    #[inline]
    pub fn transfer_function(&self) -> TransferFunction {
        self.classification.transfer_function
    }

    /// HDR metadata of the output.
    #[inline]
    pub fn hdr(&self) -> &HdrMetadata {
        &self.hdr
    }

    /// Output sample depth.
    #[inline]
    pub fn pixel_depth(&self) -> PixelDepth {
        self.pixel_depth
    }

    /// Output regamma.
    pub fn regamma(&self) -> Option<&TransferFunctionCurve> {
        self.regamma.as_ref()
    }

    /// Output CSC and denorm clamp.
    pub fn csc(&self) -> Option<&OutputCsc> {
        self.csc.as_deref()
    }

    /// Flags of the last build.
    #[inline]
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }
}

//! 3D LUT tone mapping.
//!
//! With tone mapping enabled the stream input curve is bypassed and the
//! stream signal goes through:
//!
//! ```text
//! signal * hdr_multiplier -> shaper -> 3D LUT -> blend -> gamut remap
//! ```
//!
//! The shaper re-encodes stream light into the LUT input domain, the blend
//! curve linearizes the LUT output and the gamut remap moves the LUT output
//! primaries onto the output primaries.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vpe_core::{Allocator, ColorPrimaries, HdrMetadata, TransferFunction};
use vpe_lut::TetrahedralLut;
use vpe_math::Fixed31_32;
use vpe_transfer::{build_degamma, build_shaper, shaper_peak_signal, ColorTables, CurveParams, TransferFunctionCurve};

use crate::error::ColorResult;
use crate::gamut::GamutRemap;

/// Per-stream tone-mapping parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneMapParams {
    /// Tone mapping on or off.
    pub enabled: bool,
    /// Identity of `lut_data`; a new id forces a rebuild.
    pub lut_uid: u64,
    /// Encoding of the LUT input domain.
    pub shaper_tf: TransferFunction,
    /// Encoding of the LUT output.
    pub lut_out_tf: TransferFunction,
    /// Primaries of the LUT output.
    pub lut_out_primaries: ColorPrimaries,
    /// Content peak in cd/m2; 0 takes the stream mastering peak.
    pub peak_white_nits: u32,
    /// Flat lattice, 9^3 or 17^3 RGB triples.
    pub lut_data: Vec<u16>,
    /// 12-bit samples (10-bit otherwise).
    pub use_12bit: bool,
}

impl Default for ToneMapParams {
    fn default() -> Self {
        Self {
            enabled: false,
            lut_uid: 0,
            shaper_tf: TransferFunction::Pq2084,
            lut_out_tf: TransferFunction::Pq2084,
            lut_out_primaries: ColorPrimaries::Bt2020,
            peak_white_nits: 0,
            lut_data: Vec::new(),
            use_12bit: true,
        }
    }
}

impl ToneMapParams {
    /// Peak luminance driving the shaper.
    pub fn peak_nits(&self, hdr: &HdrMetadata) -> u32 {
        if self.peak_white_nits != 0 {
            self.peak_white_nits
        } else {
            hdr.peak_nits()
        }
    }
}

/// Built tone-mapping stages for one stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneMapState {
    /// Gain applied ahead of the shaper.
    pub hdr_multiplier: Fixed31_32,
    /// Stream signal to LUT input.
    pub shaper: TransferFunctionCurve,
    /// LUT output to linear.
    pub blend: TransferFunctionCurve,
    /// LUT output primaries to output primaries.
    pub gamut: GamutRemap,
    /// Interleaved lattice.
    pub lut: TetrahedralLut,
    /// `lut_uid` the lattice was built from.
    pub lut_uid: u64,
    /// Peak the shaper was built for.
    pub peak_nits: u32,
    /// CSC rescale divisor the shaper compensates.
    pub matrix_scale: u32,
}

impl ToneMapState {
    /// True if `params` at `peak_nits` behind a CSC divided by
    /// `matrix_scale` would build this state again.
    pub fn matches(&self, params: &ToneMapParams, peak_nits: u32, matrix_scale: u32) -> bool {
        self.lut_uid == params.lut_uid
            && self.peak_nits == peak_nits
            && self.matrix_scale == matrix_scale
            && self.shaper.tf() == Some(params.shaper_tf)
            && self.blend.tf() == Some(params.lut_out_tf)
            && self.gamut.from() == params.lut_out_primaries
            && self.lut.use_12bit() == params.use_12bit
    }
}

/// `2^exp_max / PQ(peak / 10000)`.
pub fn hdr_multiplier(peak_nits: u32, exp_max: u32) -> f64 {
    2f64.powi(exp_max as i32) / shaper_peak_signal(peak_nits)
}

/// Builds every tone-mapping stage of a stream.
///
/// The stream input curve is bypassed under tone mapping, so the shaper
/// takes over the compensation of the CSC rescale `matrix_scale`.
#[allow(clippy::too_many_arguments)]
pub fn build_tone_map<A: Allocator>(
    params: &ToneMapParams,
    stream_tf: TransferFunction,
    hdr: &HdrMetadata,
    matrix_scale: u32,
    output_primaries: ColorPrimaries,
    exp_max: u32,
    tables: &ColorTables,
    alloc: &A,
) -> ColorResult<ToneMapState> {
    let peak = params.peak_nits(hdr);
    let shaper_params = CurveParams {
        input_scale: matrix_scale as f64,
        peak_nits: peak,
    };
    let shaper = build_shaper(stream_tf, params.shaper_tf, exp_max, tables.regamma_grid(), &shaper_params, alloc)?;
    let blend = build_degamma(
        params.lut_out_tf,
        tables.degamma_grid(),
        &CurveParams {
            input_scale: 1.0,
            peak_nits: peak,
        },
        alloc,
    )?;
    let lut = TetrahedralLut::from_flat(&params.lut_data, params.use_12bit, alloc)?;
    let multiplier = hdr_multiplier(peak, exp_max);
    debug!(%stream_tf, peak, multiplier, matrix_scale, lut_uid = params.lut_uid, "built tone map");
    Ok(ToneMapState {
        hdr_multiplier: Fixed31_32::from_f64(multiplier),
        shaper: TransferFunctionCurve::DistributedPoints {
            tf: params.shaper_tf,
            points: shaper,
        },
        blend: TransferFunctionCurve::DistributedPoints {
            tf: params.lut_out_tf,
            points: blend,
        },
        gamut: GamutRemap::new(params.lut_out_primaries, output_primaries),
        lut,
        lut_uid: params.lut_uid,
        peak_nits: peak,
        matrix_scale,
    })
}

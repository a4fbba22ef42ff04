//! Curve representations and builders.
//!
//! A built curve is one of four variants:
//!
//! | Variant | Storage | Used for |
//! |---------|---------|----------|
//! | [`TransferFunctionCurve::Bypass`] | none | input curve while tone mapping |
//! | [`TransferFunctionCurve::PrecomputedTable`] | shared [`Arc`] | common stream degamma |
//! | [`TransferFunctionCurve::DistributedPoints`] | owned per channel | everything else |
//! | [`TransferFunctionCurve::HardwarePwl`] | region/segment table | register writer |
//!
//! Every stored point is clamped to [0, 1].

use std::sync::Arc;

use tracing::debug;
use vpe_core::{Allocator, TransferFunction, HDR_PEAK_WHITE_NITS};
use vpe_math::Fixed31_32;

use crate::cache::PowCache;
use crate::error::{TransferError, TransferResult};
use crate::grid::{Grid, GridKind};
use crate::power::{self, PowerCurve};
use crate::pwl::HardwarePwl;
use crate::{hlg, pq};

/// Capacity of a distributed-point curve.
pub const MAX_CURVE_POINTS: usize = 1025;
/// Capacity of a degamma curve.
pub const MAX_DEGAMMA_POINTS: usize = 257;

/// Per-channel fixed-point curve samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurvePoints {
    red: Vec<Fixed31_32>,
    green: Vec<Fixed31_32>,
    blue: Vec<Fixed31_32>,
}

impl CurvePoints {
    /// Samples `f` at `0..len` in order, storing clamped values in all
    /// three channels.
    pub fn try_from_fn<A: Allocator>(
        len: usize,
        capacity: usize,
        alloc: &A,
        mut f: impl FnMut(usize) -> f64,
    ) -> TransferResult<Self> {
        if len > capacity {
            return Err(TransferError::TooManyPoints { len, capacity });
        }
        let mut red = alloc.try_alloc(len, Fixed31_32::ZERO)?;
        for (i, v) in red.iter_mut().enumerate() {
            *v = Fixed31_32::from_f64(f(i)).clamp_unit();
        }
        let mut green = alloc.try_alloc(len, Fixed31_32::ZERO)?;
        green.copy_from_slice(&red);
        let mut blue = alloc.try_alloc(len, Fixed31_32::ZERO)?;
        blue.copy_from_slice(&red);
        Ok(Self { red, green, blue })
    }

    /// Number of samples per channel.
    #[inline]
    pub fn len(&self) -> usize {
        self.red.len()
    }

    /// True if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    /// Red channel.
    pub fn red(&self) -> &[Fixed31_32] {
        &self.red
    }

    /// Green channel.
    pub fn green(&self) -> &[Fixed31_32] {
        &self.green
    }

    /// Blue channel.
    pub fn blue(&self) -> &[Fixed31_32] {
        &self.blue
    }

    /// Sample `i` as `[r, g, b]`.
    pub fn get(&self, i: usize) -> Option<[Fixed31_32; 3]> {
        Some([*self.red.get(i)?, *self.green.get(i)?, *self.blue.get(i)?])
    }
}

/// A built transfer curve.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferFunctionCurve {
    /// No curve; the stage passes data through.
    Bypass,
    /// Shared table built once for a common transfer function.
    PrecomputedTable {
        /// Source transfer function.
        tf: TransferFunction,
        /// Shared samples.
        points: Arc<CurvePoints>,
    },
    /// Samples computed for this configuration.
    DistributedPoints {
        /// Source transfer function.
        tf: TransferFunction,
        /// Owned samples.
        points: CurvePoints,
    },
    /// Region/segment form.
    HardwarePwl(HardwarePwl),
}

impl TransferFunctionCurve {
    /// True for [`TransferFunctionCurve::Bypass`].
    pub fn is_bypass(&self) -> bool {
        matches!(self, Self::Bypass)
    }

    /// Distributed samples, if any.
    pub fn points(&self) -> Option<&CurvePoints> {
        match self {
            Self::PrecomputedTable { points, .. } => Some(points),
            Self::DistributedPoints { points, .. } => Some(points),
            Self::Bypass | Self::HardwarePwl(_) => None,
        }
    }

    /// Transfer function the samples were built from.
    pub fn tf(&self) -> Option<TransferFunction> {
        match self {
            Self::PrecomputedTable { tf, .. } | Self::DistributedPoints { tf, .. } => Some(*tf),
            Self::Bypass | Self::HardwarePwl(_) => None,
        }
    }

    /// Variant name for logging.
    pub fn variant(&self) -> &'static str {
        match self {
            Self::Bypass => "bypass",
            Self::PrecomputedTable { .. } => "precomputed",
            Self::DistributedPoints { .. } => "distributed",
            Self::HardwarePwl(_) => "pwl",
        }
    }
}

/// Build-time curve parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    /// Power-of-two factor applied to every grid position before
    /// evaluation (the CSC rescale compensation).
    pub input_scale: f64,
    /// Peak luminance for peak-relative curves; 0 means 10,000 cd/m2.
    pub peak_nits: u32,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            input_scale: 1.0,
            peak_nits: 0,
        }
    }
}

/// Formula selected for a transfer function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluator {
    /// Piecewise power law.
    Power(PowerCurve),
    /// Absolute PQ.
    Pq,
    /// Peak-relative PQ.
    NormalizedPq(pq::NormalizedPq),
    /// HLG on a 1000 cd/m2 display.
    Hlg,
    /// Identity.
    Linear,
}

impl Evaluator {
    /// Selects the formula for `tf`.
    pub fn new(tf: TransferFunction, peak_nits: u32) -> TransferResult<Self> {
        Ok(match tf {
            TransferFunction::Srgb => Self::Power(power::SRGB),
            TransferFunction::Bt709 => Self::Power(power::BT709),
            TransferFunction::Bt1886 => Self::Power(power::BT1886),
            TransferFunction::Pq2084 => Self::Pq,
            TransferFunction::NormalizedPq => Self::NormalizedPq(pq::NormalizedPq::new(peak_nits)),
            TransferFunction::Hlg => Self::Hlg,
            TransferFunction::Linear => Self::Linear,
            TransferFunction::Unknown => return Err(TransferError::Unsupported(tf)),
        })
    }

    /// Linear to signal.
    pub fn encode(&self, x: f64) -> f64 {
        match self {
            Self::Power(c) => c.encode(x),
            Self::Pq => pq::encode(x),
            Self::NormalizedPq(n) => n.encode(x),
            Self::Hlg => hlg::encode(x),
            Self::Linear => x,
        }
    }

    /// Linear to signal, caching the power segment.
    pub fn encode_cached(&self, x: f64, cache: &mut PowCache) -> f64 {
        match self {
            Self::Power(c) => c.encode_cached(x, cache),
            _ => self.encode(x),
        }
    }

    /// Signal to linear.
    pub fn decode(&self, x: f64) -> f64 {
        match self {
            Self::Power(c) => c.decode(x),
            Self::Pq => pq::decode(x),
            Self::NormalizedPq(n) => n.decode(x),
            Self::Hlg => hlg::decode(x),
            Self::Linear => x,
        }
    }
}

/// Builds an output (linear to signal) curve on the regamma grid.
///
/// Region points go through a fresh [`PowCache`]; the cache is finalized
/// before the terminal points.
pub fn build_regamma<A: Allocator>(
    tf: TransferFunction,
    grid: &Grid,
    params: &CurveParams,
    alloc: &A,
) -> TransferResult<CurvePoints> {
    debug_assert_eq!(grid.kind(), GridKind::Regamma);
    debug_assert!(params.input_scale > 0.0 && params.input_scale.log2().fract() == 0.0);
    let eval = Evaluator::new(tf, params.peak_nits)?;
    let mut cache = PowCache::new();
    let hw_points = grid.hw_points();
    let points = CurvePoints::try_from_fn(grid.len(), MAX_CURVE_POINTS, alloc, |i| {
        if i == hw_points {
            cache.finalize();
        }
        eval.encode_cached(grid.points()[i] * params.input_scale, &mut cache)
    })?;
    debug!(%tf, len = points.len(), "built regamma");
    Ok(points)
}

/// Builds a signal to linear curve on the degamma grid.
///
/// Each position is multiplied by `params.input_scale` before decoding.
pub fn build_degamma<A: Allocator>(
    tf: TransferFunction,
    grid: &Grid,
    params: &CurveParams,
    alloc: &A,
) -> TransferResult<CurvePoints> {
    let eval = Evaluator::new(tf, params.peak_nits)?;
    let points = CurvePoints::try_from_fn(grid.len(), MAX_DEGAMMA_POINTS, alloc, |i| {
        eval.decode(grid.points()[i] * params.input_scale)
    })?;
    debug!(%tf, len = points.len(), scale = params.input_scale, "built degamma");
    Ok(points)
}

/// Builds the 3D LUT shaper on the regamma grid.
///
/// The shaper input is the stream signal multiplied by the HDR
/// multiplier `2^exp_max / PQ(peak)`. It undoes that multiplier, decodes
/// the stream curve, re-encodes with `shaper_tf` and normalizes so the
/// content peak lands on 1.0.
///
/// `params.input_scale` is the CSC rescale divisor; it multiplies each
/// grid position as in [`build_degamma`]. `params.peak_nits` is the
/// content peak.
pub fn build_shaper<A: Allocator>(
    stream_tf: TransferFunction,
    shaper_tf: TransferFunction,
    exp_max: u32,
    grid: &Grid,
    params: &CurveParams,
    alloc: &A,
) -> TransferResult<CurvePoints> {
    let peak_nits = params.peak_nits;
    let stream = Evaluator::new(stream_tf, peak_nits)?;
    let shaper = Evaluator::new(shaper_tf, peak_nits)?;
    let in_scale = params.input_scale * shaper_peak_signal(peak_nits) / 2f64.powi(exp_max as i32);
    let out_norm = shaper.encode(peak_linear(peak_nits));
    let points = CurvePoints::try_from_fn(grid.len(), MAX_CURVE_POINTS, alloc, |i| {
        let linear = stream.decode(grid.points()[i] * in_scale);
        if out_norm > 0.0 { shaper.encode(linear) / out_norm } else { 0.0 }
    })?;
    debug!(%stream_tf, %shaper_tf, peak_nits, exp_max, scale = params.input_scale, "built shaper");
    Ok(points)
}

/// PQ signal of the content peak; zero peak means 10,000 cd/m2.
pub fn shaper_peak_signal(peak_nits: u32) -> f64 {
    pq::encode(peak_linear(peak_nits))
}

fn peak_linear(peak_nits: u32) -> f64 {
    if peak_nits == 0 {
        1.0
    } else {
        peak_nits as f64 / HDR_PEAK_WHITE_NITS as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vpe_core::SystemAllocator;

    fn as_f64(p: &[Fixed31_32]) -> Vec<f64> {
        p.iter().map(|v| v.to_f64()).collect()
    }

    #[test]
    fn test_regamma_monotonic_and_clamped() {
        let grid = Grid::regamma();
        for tf in [TransferFunction::Srgb, TransferFunction::Bt709, TransferFunction::Pq2084, TransferFunction::Hlg] {
            let c = build_regamma(tf, &grid, &CurveParams::default(), &SystemAllocator).unwrap();
            let v = as_f64(c.red());
            assert!(v.windows(2).all(|w| w[0] <= w[1]), "{tf}");
            assert!(v.iter().all(|x| (0.0..=1.0).contains(x)), "{tf}");
            assert_eq!(c.red(), c.green());
            assert_eq!(c.red(), c.blue());
        }
    }

    #[test]
    fn test_regamma_cache_matches_direct() {
        let grid = Grid::regamma();
        let c = build_regamma(TransferFunction::Srgb, &grid, &CurveParams::default(), &SystemAllocator).unwrap();
        for (i, &x) in grid.points().iter().enumerate() {
            let direct = Fixed31_32::from_f64(power::SRGB.encode(x)).clamp_unit();
            assert!((c.red()[i].raw() - direct.raw()).abs() <= 2, "i={i}");
        }
    }

    #[test]
    fn test_degamma_endpoints() {
        let grid = Grid::degamma();
        let c = build_degamma(TransferFunction::Srgb, &grid, &CurveParams::default(), &SystemAllocator).unwrap();
        assert_eq!(c.len(), 257);
        assert_eq!(c.red()[0], Fixed31_32::ZERO);
        assert_eq!(c.red()[256], Fixed31_32::ONE);
    }

    #[test]
    fn test_degamma_input_scale() {
        let grid = Grid::degamma();
        let params = CurveParams {
            input_scale: 2.0,
            ..Default::default()
        };
        let c = build_degamma(TransferFunction::Bt709, &grid, &params, &SystemAllocator).unwrap();
        let x = grid.points()[100];
        let expected = power::BT709.decode(2.0 * x).min(1.0);
        assert!((c.red()[100].to_f64() - expected).abs() < 1e-9);
        // everything at or above 0.5 saturates
        assert_eq!(c.red()[224], Fixed31_32::ONE);
    }

    #[test]
    fn test_pq_inverse() {
        let rg = Grid::regamma();
        let dg = Grid::degamma();
        let enc = build_regamma(TransferFunction::Pq2084, &rg, &CurveParams::default(), &SystemAllocator).unwrap();
        let dec = build_degamma(TransferFunction::Pq2084, &dg, &CurveParams::default(), &SystemAllocator).unwrap();
        // sample 0.5 on the degamma grid is index 224
        let linear = dec.red()[224].to_f64();
        let eval = Evaluator::new(TransferFunction::Pq2084, 0).unwrap();
        assert!((eval.encode(linear) - 0.5).abs() < 1e-6);
        assert!(enc.red()[0] > Fixed31_32::ZERO);
    }

    #[test]
    fn test_unknown_is_unsupported() {
        let grid = Grid::degamma();
        let r = build_degamma(TransferFunction::Unknown, &grid, &CurveParams::default(), &SystemAllocator);
        assert!(matches!(r, Err(TransferError::Unsupported(TransferFunction::Unknown))));
    }

    #[test]
    fn test_capacity_enforced() {
        let r = CurvePoints::try_from_fn(MAX_CURVE_POINTS + 1, MAX_CURVE_POINTS, &SystemAllocator, |_| 0.0);
        assert!(matches!(r, Err(TransferError::TooManyPoints { .. })));
    }

    #[test]
    fn test_shaper_peak_maps_to_one() {
        let grid = Grid::regamma();
        let params = CurveParams {
            input_scale: 1.0,
            peak_nits: 1000,
        };
        let c = build_shaper(TransferFunction::Pq2084, TransferFunction::Pq2084, 1, &grid, &params, &SystemAllocator).unwrap();
        // grid point 2.0 = 2^exp_max is the stream signal at the peak
        let i = grid.points().iter().position(|&x| x == 2.0).unwrap();
        assert!((c.red()[i].to_f64() - 1.0).abs() < 1e-6);
        assert_eq!(c.red()[grid.len() - 1], Fixed31_32::ONE);
    }

    #[test]
    fn test_shaper_other_encoding() {
        let grid = Grid::regamma();
        let c = build_shaper(TransferFunction::Pq2084, TransferFunction::Srgb, 1, &grid, &CurveParams::default(), &SystemAllocator)
            .unwrap();
        // below C1^M2 the PQ decode is mirrored, so start past it
        let start = grid.points().iter().position(|&x| x >= 2f64.powi(-16)).unwrap();
        let v = as_f64(&c.red()[start..]);
        assert!(v.windows(2).all(|w| w[0] <= w[1]));
        let i = grid.points().iter().position(|&x| x == 2.0).unwrap();
        assert_eq!(c.red()[i], Fixed31_32::ONE);
    }

    #[test]
    fn test_shaper_compensates_matrix_scale() {
        let grid = Grid::regamma();
        let base = CurveParams {
            input_scale: 1.0,
            peak_nits: 1000,
        };
        let scaled = CurveParams {
            input_scale: 4.0,
            ..base
        };
        let one = build_shaper(TransferFunction::Pq2084, TransferFunction::Pq2084, 1, &grid, &base, &SystemAllocator).unwrap();
        let four = build_shaper(TransferFunction::Pq2084, TransferFunction::Pq2084, 1, &grid, &scaled, &SystemAllocator).unwrap();
        assert_ne!(one, four);
        // a signal divided by 4 in the matrix lands on the same shaper value
        let at = |x: f64| grid.points().iter().position(|&p| p == x).unwrap();
        assert_eq!(four.red()[at(0.5)], one.red()[at(2.0)]);
        assert_eq!(four.red()[at(0.125)], one.red()[at(0.5)]);
    }
}

//! Hardware piecewise-linear (PWL) form.
//!
//! A regamma curve sampled on the regamma grid is re-expressed as a run
//! of power-of-two regions, each split into `2^k` equal segments. Each
//! segment start keeps the source sample exactly and carries the delta to
//! the next one:
//!
//! ```text
//! region e: [2^e, 2^(e+1)), segments of width 2^e / 2^k
//! below the first region: y = start_slope * x
//! at and above the last region end: y = end
//! ```

use tracing::debug;
use vpe_math::Fixed31_32;

use crate::curve::CurvePoints;
use crate::error::{TransferError, TransferResult};
use crate::grid::{Grid, GridKind, REGAMMA_MIN_SEGMENT, REGAMMA_POINTS_PER_REGION, REGAMMA_REGIONS};

/// Which regions of the regamma grid to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwlLayout {
    /// First kept region (0 is `2^-25`).
    pub first_region: usize,
    /// One past the last kept region.
    pub end_region: usize,
    /// Segments per region, as a power of two (at most 4).
    pub segments_log2: u32,
}

impl PwlLayout {
    /// Every region at full resolution.
    pub const FULL: Self = Self {
        first_region: 0,
        end_region: REGAMMA_REGIONS,
        segments_log2: 4,
    };

    fn validate(&self) -> TransferResult<()> {
        if self.first_region >= self.end_region || self.end_region > REGAMMA_REGIONS {
            return Err(TransferError::InvalidPwlLayout(format!(
                "regions {}..{} outside 0..{REGAMMA_REGIONS}",
                self.first_region, self.end_region
            )));
        }
        if (1usize << self.segments_log2) > REGAMMA_POINTS_PER_REGION {
            return Err(TransferError::InvalidPwlLayout(format!(
                "2^{} segments exceed {REGAMMA_POINTS_PER_REGION} points per region",
                self.segments_log2
            )));
        }
        Ok(())
    }
}

impl Default for PwlLayout {
    /// `[2^-12, 1)` at 16 segments per region.
    fn default() -> Self {
        Self {
            first_region: (-12 - REGAMMA_MIN_SEGMENT) as usize,
            end_region: (-REGAMMA_MIN_SEGMENT) as usize,
            segments_log2: 4,
        }
    }
}

/// One power-of-two region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwlRegion {
    /// Region starts at `2^exponent`.
    pub exponent: i32,
    /// Segment count.
    pub segments: u32,
}

/// One segment start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwlPoint {
    /// Value at the segment start, per channel.
    pub value: [Fixed31_32; 3],
    /// Difference to the next segment start, per channel.
    pub delta: [Fixed31_32; 3],
}

/// Curve in hardware PWL form.
#[derive(Debug, Clone, PartialEq)]
pub struct HardwarePwl {
    regions: Vec<PwlRegion>,
    points: Vec<PwlPoint>,
    start_x: f64,
    end_x: f64,
    start_slope: [Fixed31_32; 3],
    end: [Fixed31_32; 3],
}

impl HardwarePwl {
    /// Converts regamma samples to PWL form.
    pub fn from_points(points: &CurvePoints, grid: &Grid, layout: &PwlLayout) -> TransferResult<Self> {
        layout.validate()?;
        if grid.kind() != GridKind::Regamma || points.len() != grid.len() {
            return Err(TransferError::InvalidPwlLayout(format!(
                "{} points do not match a {:?} grid of {}",
                points.len(),
                grid.kind(),
                grid.len()
            )));
        }

        let segments = 1usize << layout.segments_log2;
        let step = REGAMMA_POINTS_PER_REGION / segments;
        let sample = |i: usize| -> TransferResult<[Fixed31_32; 3]> {
            points
                .get(i)
                .ok_or_else(|| TransferError::InvalidPwlLayout(format!("missing sample {i}")))
        };

        let regions: Vec<PwlRegion> = (layout.first_region..layout.end_region)
            .map(|r| PwlRegion {
                exponent: r as i32 + REGAMMA_MIN_SEGMENT,
                segments: segments as u32,
            })
            .collect();

        let first_index = layout.first_region * REGAMMA_POINTS_PER_REGION;
        let end_index = layout.end_region * REGAMMA_POINTS_PER_REGION;
        let mut values = Vec::with_capacity(regions.len() * segments + 1);
        for i in (first_index..end_index).step_by(step) {
            values.push(sample(i)?);
        }
        let end = sample(end_index)?;
        values.push(end);

        let pwl_points = values
            .windows(2)
            .map(|w| PwlPoint {
                value: w[0],
                delta: std::array::from_fn(|c| w[1][c] - w[0][c]),
            })
            .collect();

        let start_x = grid.points()[first_index];
        let start = values[0];
        let start_slope = start.map(|v| Fixed31_32::from_f64(v.to_f64() / start_x));
        let end_x = grid.points()[end_index];

        debug!(
            regions = regions.len(),
            segments,
            start_x,
            end_x,
            "built hardware PWL"
        );
        Ok(Self {
            regions,
            points: pwl_points,
            start_x,
            end_x,
            start_slope,
            end,
        })
    }

    /// Regions in ascending order.
    pub fn regions(&self) -> &[PwlRegion] {
        &self.regions
    }

    /// Segment starts in ascending order.
    pub fn points(&self) -> &[PwlPoint] {
        &self.points
    }

    /// Slope below the first region.
    pub fn start_slope(&self) -> [Fixed31_32; 3] {
        self.start_slope
    }

    /// Value at and above the end of the last region.
    pub fn end(&self) -> [Fixed31_32; 3] {
        self.end
    }

    /// Evaluates one channel.
    pub fn evaluate(&self, channel: usize, x: f64) -> f64 {
        if x < self.start_x {
            return (x * self.start_slope[channel].to_f64()).max(0.0);
        }
        if x >= self.end_x {
            return self.end[channel].to_f64();
        }
        let exponent = x.log2().floor() as i32;
        let Some(region) = self.regions.iter().position(|r| r.exponent == exponent) else {
            return self.end[channel].to_f64();
        };
        let segments = self.regions[region].segments as usize;
        let base = 2f64.powi(exponent);
        let width = base / segments as f64;
        let pos = (x - base) / width;
        let seg = (pos.floor() as usize).min(segments - 1);
        let frac = pos - seg as f64;
        let p = &self.points[region * segments + seg];
        p.value[channel].to_f64() + frac * p.delta[channel].to_f64()
    }
}

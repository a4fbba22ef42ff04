//! Sampling grids for distributed-point curves.
//!
//! Grids are computed once (see [`crate::ColorTables`]) and shared by
//! every curve build.
//!
//! # Regamma
//!
//! Logarithmically spaced: 32 regions covering `[2^-25, 2^7)`, each split
//! into 16 equal steps, followed by two terminal points at 128.
//!
//! ```text
//! region r: 2^(r-25) * (1 + j/16), j in 0..16
//! ```
//!
//! # Degamma
//!
//! 32 linear points on `[0, 2^-7)`, then seven doubling regions of 32
//! points up to 1.0, plus 1.0 itself.

use tracing::trace;

/// Lowest regamma segment exponent.
pub const REGAMMA_MIN_SEGMENT: i32 = -25;
/// Highest regamma segment exponent.
pub const REGAMMA_MAX_SEGMENT: i32 = 6;
/// Regamma points per region.
pub const REGAMMA_POINTS_PER_REGION: usize = 16;
/// Regamma region count.
pub const REGAMMA_REGIONS: usize = (REGAMMA_MAX_SEGMENT - REGAMMA_MIN_SEGMENT + 1) as usize;
/// Points after the last regamma region.
pub const REGAMMA_TERMINAL_POINTS: usize = 2;

/// Degamma points per region.
pub const DEGAMMA_POINTS_PER_REGION: usize = 32;
/// Degamma regions, counting the linear region below 2^-7.
pub const DEGAMMA_REGIONS: usize = 8;

/// Which curve family a grid samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKind {
    /// Linear-light input (output regamma, shaper).
    Regamma,
    /// Encoded input (stream degamma, blend).
    Degamma,
}

/// Precomputed sample positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    kind: GridKind,
    points: Vec<f64>,
    hw_points: usize,
    points_per_region: usize,
}

impl Grid {
    /// Regamma grid: 32 x 16 points plus 2 terminal points.
    pub fn regamma() -> Self {
        let mut points = Vec::with_capacity(REGAMMA_REGIONS * REGAMMA_POINTS_PER_REGION + REGAMMA_TERMINAL_POINTS);
        for segment in REGAMMA_MIN_SEGMENT..=REGAMMA_MAX_SEGMENT {
            let base = 2f64.powi(segment);
            let step = base / REGAMMA_POINTS_PER_REGION as f64;
            points.extend((0..REGAMMA_POINTS_PER_REGION).map(|j| base + j as f64 * step));
        }
        let hw_points = points.len();
        let end = 2f64.powi(REGAMMA_MAX_SEGMENT + 1);
        points.extend(std::iter::repeat_n(end, REGAMMA_TERMINAL_POINTS));
        trace!(len = points.len(), hw_points, "regamma grid");
        Self {
            kind: GridKind::Regamma,
            points,
            hw_points,
            points_per_region: REGAMMA_POINTS_PER_REGION,
        }
    }

    /// Degamma grid: linear region, seven doubling regions, then 1.0.
    pub fn degamma() -> Self {
        let mut points = Vec::with_capacity(DEGAMMA_REGIONS * DEGAMMA_POINTS_PER_REGION + 1);
        let first = 2f64.powi(-7);
        let step = first / DEGAMMA_POINTS_PER_REGION as f64;
        points.extend((0..DEGAMMA_POINTS_PER_REGION).map(|j| j as f64 * step));
        for segment in -7..=-1 {
            let base = 2f64.powi(segment);
            let step = base / DEGAMMA_POINTS_PER_REGION as f64;
            points.extend((0..DEGAMMA_POINTS_PER_REGION).map(|j| base + j as f64 * step));
        }
        let hw_points = points.len();
        points.push(1.0);
        trace!(len = points.len(), hw_points, "degamma grid");
        Self {
            kind: GridKind::Degamma,
            points,
            hw_points,
            points_per_region: DEGAMMA_POINTS_PER_REGION,
        }
    }

    /// Grid family.
    #[inline]
    pub fn kind(&self) -> GridKind {
        self.kind
    }

    /// Sample positions.
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of sample positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the grid has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points inside the regions, excluding terminal points.
    #[inline]
    pub fn hw_points(&self) -> usize {
        self.hw_points
    }

    /// Points per region.
    #[inline]
    pub fn points_per_region(&self) -> usize {
        self.points_per_region
    }
}

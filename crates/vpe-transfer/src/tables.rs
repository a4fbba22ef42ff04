//! Process-wide read-only tables.
//!
//! Grids and the most common stream degamma curves are computed once and
//! shared. Nothing here is mutated after construction, so a single
//! [`ColorTables`] can be shared across threads behind an [`Arc`].

use std::sync::Arc;

use tracing::debug;
use vpe_core::{Allocator, TransferFunction};

use crate::curve::{build_degamma, CurveParams, CurvePoints};
use crate::error::TransferResult;
use crate::grid::Grid;

/// Transfer functions with a precomputed degamma table.
pub const PRECOMPUTED: [TransferFunction; 3] = [
    TransferFunction::Srgb,
    TransferFunction::Bt709,
    TransferFunction::Pq2084,
];

/// Shared grids and precomputed curves.
#[derive(Debug)]
pub struct ColorTables {
    regamma_grid: Grid,
    degamma_grid: Grid,
    degamma: Vec<(TransferFunction, Arc<CurvePoints>)>,
}

impl ColorTables {
    /// Computes all grids and tables.
    pub fn new<A: Allocator>(alloc: &A) -> TransferResult<Self> {
        let regamma_grid = Grid::regamma();
        let degamma_grid = Grid::degamma();
        let params = CurveParams::default();
        let mut degamma = Vec::with_capacity(PRECOMPUTED.len());
        for tf in PRECOMPUTED {
            let points = build_degamma(tf, &degamma_grid, &params, alloc)?;
            degamma.push((tf, Arc::new(points)));
        }
        debug!(tables = degamma.len(), "color tables ready");
        Ok(Self {
            regamma_grid,
            degamma_grid,
            degamma,
        })
    }

    /// Regamma sampling grid.
    #[inline]
    pub fn regamma_grid(&self) -> &Grid {
        &self.regamma_grid
    }

    /// Degamma sampling grid.
    #[inline]
    pub fn degamma_grid(&self) -> &Grid {
        &self.degamma_grid
    }

    /// Precomputed unscaled degamma for `tf`, if one exists.
    pub fn degamma(&self, tf: TransferFunction) -> Option<Arc<CurvePoints>> {
        self.degamma
            .iter()
            .find(|(t, _)| *t == tf)
            .map(|(_, p)| Arc::clone(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vpe_core::SystemAllocator;

    #[test]
    fn test_lookup() {
        let t = ColorTables::new(&SystemAllocator).unwrap();
        for tf in PRECOMPUTED {
            let shared = t.degamma(tf).unwrap();
            let fresh = build_degamma(tf, t.degamma_grid(), &CurveParams::default(), &SystemAllocator).unwrap();
            assert_eq!(*shared, fresh);
        }
        assert!(t.degamma(TransferFunction::Hlg).is_none());
        assert_eq!(t.regamma_grid().len(), 514);
    }

    #[test]
    fn test_shared_not_copied() {
        let t = ColorTables::new(&SystemAllocator).unwrap();
        let a = t.degamma(TransferFunction::Srgb).unwrap();
        let b = t.degamma(TransferFunction::Srgb).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}

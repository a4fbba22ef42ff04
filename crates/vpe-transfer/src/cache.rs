//! Rolling power cache for regamma builds.
//!
//! The regamma grid is 32 regions of 16 points where every region is the
//! previous one scaled by two. For a fixed exponent `e`:
//!
//! ```text
//! (2x)^e = 2^e * x^e
//! ```
//!
//! so after the first 16 powered points each new value is the value 16
//! points back multiplied by `2^e`. The cache keeps those 16 values in a
//! ring and recomputes one region exactly (points 224..240) to bound the
//! accumulated error.
//!
//! The cache is only valid for consecutive grid points of one build with
//! a single exponent. It is reset at the start of each build and finalized
//! before the terminal points, which are always computed exactly.

use std::ops::RangeInclusive;

/// Ring size, equal to the points per regamma region.
pub const CACHE_LEN: usize = 16;

/// Accumulation indices that are always computed exactly.
pub const PRECISE_REGION: RangeInclusive<usize> = 224..=239;

/// Cache lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No value computed yet.
    Empty,
    /// Values are being accumulated; `index` is the next point.
    Accumulating {
        /// Next accumulation index.
        index: usize,
    },
    /// Every further value is computed exactly and not stored.
    Finalized,
}

/// Power cache for one curve build.
#[derive(Debug, Clone)]
pub struct PowCache {
    state: CacheState,
    buffer: [f64; CACHE_LEN],
    exponent: f64,
    gamma_of_2: f64,
}

impl PowCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            state: CacheState::Empty,
            buffer: [0.0; CACHE_LEN],
            exponent: 0.0,
            gamma_of_2: 1.0,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> CacheState {
        self.state
    }

    /// Clears the cache for a new build.
    pub fn reset(&mut self) {
        self.state = CacheState::Empty;
    }

    /// Stops accumulating.
    pub fn finalize(&mut self) {
        self.state = CacheState::Finalized;
    }

    /// `x^exponent`, reusing the value 16 points back when possible.
    pub fn pow(&mut self, x: f64, exponent: f64) -> f64 {
        match self.state {
            CacheState::Finalized => x.powf(exponent),
            CacheState::Empty => {
                self.exponent = exponent;
                self.gamma_of_2 = 2f64.powf(exponent);
                let v = x.powf(exponent);
                self.buffer[0] = v;
                self.state = CacheState::Accumulating { index: 1 };
                v
            }
            CacheState::Accumulating { index } => {
                debug_assert_eq!(self.exponent, exponent, "exponent changed mid-build");
                let slot = index % CACHE_LEN;
                let v = if index < CACHE_LEN || PRECISE_REGION.contains(&index) {
                    x.powf(exponent)
                } else {
                    self.gamma_of_2 * self.buffer[slot]
                };
                self.buffer[slot] = v;
                self.state = CacheState::Accumulating { index: index + 1 };
                v
            }
        }
    }
}

impl Default for PowCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doubling_grid() -> Vec<f64> {
        (0..32)
            .flat_map(|r| {
                let base = 2f64.powi(r - 25);
                (0..16).map(move |j| base + j as f64 * base / 16.0)
            })
            .collect()
    }

    #[test]
    fn test_lifecycle() {
        let mut c = PowCache::new();
        assert_eq!(c.state(), CacheState::Empty);
        c.pow(0.5, 0.4);
        assert_eq!(c.state(), CacheState::Accumulating { index: 1 });
        c.finalize();
        assert_eq!(c.state(), CacheState::Finalized);
        c.reset();
        assert_eq!(c.state(), CacheState::Empty);
    }

    #[test]
    fn test_matches_direct_pow() {
        let e = 1.0 / 2.4;
        let mut c = PowCache::new();
        for (i, x) in doubling_grid().into_iter().enumerate() {
            let cached = c.pow(x, e);
            let direct = x.powf(e);
            assert!((cached - direct).abs() <= direct * 1e-12, "i={i} {cached} vs {direct}");
        }
    }

    #[test]
    fn test_precise_region_is_exact() {
        let e = 1.0 / 2.222;
        let mut c = PowCache::new();
        for (i, x) in doubling_grid().into_iter().enumerate() {
            let v = c.pow(x, e);
            if i < CACHE_LEN || PRECISE_REGION.contains(&i) {
                assert_eq!(v, x.powf(e));
            }
        }
    }

    #[test]
    fn test_finalized_not_stored() {
        let mut c = PowCache::new();
        c.pow(0.25, 0.5);
        c.finalize();
        assert_eq!(c.pow(128.0, 0.5), 128f64.sqrt());
        assert_eq!(c.state(), CacheState::Finalized);
    }
}

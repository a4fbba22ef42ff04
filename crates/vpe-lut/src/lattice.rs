//! Flat N^3 RGB lattice.
//!
//! Samples are enumerated with blue in the outer loop, green in the
//! middle and red innermost, so red varies fastest:
//!
//! ```text
//! index(r, g, b) = b * N * N + g * N + r
//! flat[3 * index + c] = channel c of sample index
//! ```

use vpe_core::Allocator;

use crate::{LutError, LutResult};

/// Supported lattice dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LatticeSize {
    /// 9 x 9 x 9
    Size9,
    /// 17 x 17 x 17
    Size17,
}

impl LatticeSize {
    /// Samples per axis.
    #[inline]
    pub const fn dim(self) -> usize {
        match self {
            Self::Size9 => 9,
            Self::Size17 => 17,
        }
    }

    /// Total samples.
    #[inline]
    pub const fn entries(self) -> usize {
        let n = self.dim();
        n * n * n
    }

    /// Size with exactly `entries` samples.
    pub const fn from_entries(entries: usize) -> Option<Self> {
        match entries {
            729 => Some(Self::Size9),
            4913 => Some(Self::Size17),
            _ => None,
        }
    }
}

/// Largest sample value for a bit depth.
#[inline]
pub const fn max_value(use_12bit: bool) -> u16 {
    if use_12bit { 4095 } else { 1023 }
}

/// A 3D lattice of integer RGB samples.
///
/// # Example
///
/// ```rust
/// use vpe_core::SystemAllocator;
/// use vpe_lut::{Lattice, LatticeSize};
///
/// let lut = Lattice::identity(LatticeSize::Size9, true, &SystemAllocator).unwrap();
/// assert_eq!(lut.samples()[lut.index(8, 0, 0)], [4095, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    data: Vec<[u16; 3]>,
    size: LatticeSize,
}

impl Lattice {
    /// Creates a lattice from a flat RGB array of 729*3 or 4913*3 values.
    pub fn from_flat<A: Allocator>(flat: &[u16], alloc: &A) -> LutResult<Self> {
        if flat.len() % 3 != 0 {
            return Err(LutError::InvalidSize(format!(
                "{} values is not a whole number of RGB triples",
                flat.len()
            )));
        }
        let size = LatticeSize::from_entries(flat.len() / 3).ok_or_else(|| {
            LutError::InvalidSize(format!("expected 729 or 4913 samples, got {}", flat.len() / 3))
        })?;
        let mut data = alloc.try_alloc(size.entries(), [0u16; 3])?;
        for (dst, src) in data.iter_mut().zip(flat.chunks_exact(3)) {
            *dst = [src[0], src[1], src[2]];
        }
        Ok(Self { data, size })
    }

    /// Wraps samples already in lattice order.
    pub fn from_samples(data: Vec<[u16; 3]>) -> LutResult<Self> {
        let size = LatticeSize::from_entries(data.len())
            .ok_or_else(|| LutError::InvalidSize(format!("expected 729 or 4913 samples, got {}", data.len())))?;
        Ok(Self { data, size })
    }

    /// Creates an identity (pass-through) lattice.
    pub fn identity<A: Allocator>(size: LatticeSize, use_12bit: bool, alloc: &A) -> LutResult<Self> {
        let n = size.dim();
        let max = max_value(use_12bit) as usize;
        let level = |i: usize| ((i * max + (n - 1) / 2) / (n - 1)) as u16;
        let mut data = alloc.try_alloc(size.entries(), [0u16; 3])?;
        let mut idx = 0;
        for b in 0..n {
            for g in 0..n {
                for r in 0..n {
                    data[idx] = [level(r), level(g), level(b)];
                    idx += 1;
                }
            }
        }
        Ok(Self { data, size })
    }

    /// Lattice dimension.
    #[inline]
    pub fn size(&self) -> LatticeSize {
        self.size
    }

    /// Samples in lattice order.
    #[inline]
    pub fn samples(&self) -> &[[u16; 3]] {
        &self.data
    }

    /// Flat RGB values in lattice order.
    pub fn to_flat(&self) -> Vec<u16> {
        self.data.iter().flatten().copied().collect()
    }

    /// Returns the index for a given (r, g, b) grid position.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        let n = self.size.dim();
        b * n * n + g * n + r
    }

    /// First sample above `max_value(use_12bit)`, as (flat index, value).
    pub fn find_out_of_range(&self, use_12bit: bool) -> Option<(usize, u16)> {
        let max = max_value(use_12bit);
        self.data
            .iter()
            .flatten()
            .enumerate()
            .find(|(_, v)| **v > max)
            .map(|(i, v)| (i, *v))
    }
}

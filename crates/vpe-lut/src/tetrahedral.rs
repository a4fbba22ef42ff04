//! Four-way interleaved layout for tetrahedral interpolation hardware.
//!
//! The interpolator reads four sample streams in parallel. Lattice sample
//! `i` goes to bank `i % 4` at position `i / 4`:
//!
//! ```text
//! lattice: s0 s1 s2 s3 s4 s5 s6 s7 s8 ...
//! lut0:    s0          s4          s8
//! lut1:       s1          s5
//! lut2:          s2          s6
//! lut3:             s3          s7
//! ```
//!
//! 17^3 = 4913 samples split 1229/1228/1228/1228; 9^3 = 729 split
//! 183/182/182/182. Values are copied unchanged.

use tracing::debug;
use vpe_core::Allocator;

use crate::lattice::{max_value, Lattice, LatticeSize};
use crate::{LutError, LutResult};

/// Number of interleaved banks.
pub const BANKS: usize = 4;

/// Samples in `bank` for a lattice of `size`.
#[inline]
pub const fn bank_len(size: LatticeSize, bank: usize) -> usize {
    (size.entries() + BANKS - 1 - bank) / BANKS
}

/// A lattice split into four interleaved banks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TetrahedralLut {
    banks: [Vec<[u16; 3]>; BANKS],
    use_12bit: bool,
    size: LatticeSize,
}

impl TetrahedralLut {
    /// Splits `lattice` round-robin, rejecting samples wider than the
    /// selected bit depth.
    pub fn convert<A: Allocator>(lattice: &Lattice, use_12bit: bool, alloc: &A) -> LutResult<Self> {
        if let Some((index, value)) = lattice.find_out_of_range(use_12bit) {
            return Err(LutError::OutOfRange {
                index,
                value,
                max: max_value(use_12bit),
            });
        }
        let size = lattice.size();
        let mut banks = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
        for (bank, dst) in banks.iter_mut().enumerate() {
            *dst = alloc.try_alloc(bank_len(size, bank), [0u16; 3])?;
        }
        for (i, sample) in lattice.samples().iter().enumerate() {
            banks[i % BANKS][i / BANKS] = *sample;
        }
        debug!(
            dim = size.dim(),
            use_12bit,
            lut0 = banks[0].len(),
            lut1 = banks[1].len(),
            "converted 3D LUT to tetrahedral layout"
        );
        Ok(Self { banks, use_12bit, size })
    }

    /// Parses a flat RGB array and converts it.
    pub fn from_flat<A: Allocator>(flat: &[u16], use_12bit: bool, alloc: &A) -> LutResult<Self> {
        let lattice = Lattice::from_flat(flat, alloc)?;
        Self::convert(&lattice, use_12bit, alloc)
    }

    /// Bank `i` (0..4).
    #[inline]
    pub fn bank(&self, i: usize) -> &[[u16; 3]] {
        &self.banks[i]
    }

    /// All four banks.
    pub fn banks(&self) -> &[Vec<[u16; 3]>; BANKS] {
        &self.banks
    }

    /// True for 12-bit samples, false for 10-bit.
    #[inline]
    pub fn use_12bit(&self) -> bool {
        self.use_12bit
    }

    /// Lattice dimension.
    #[inline]
    pub fn size(&self) -> LatticeSize {
        self.size
    }

    /// Rebuilds the flat lattice by reading the banks round-robin.
    pub fn reassemble(&self) -> LutResult<Lattice> {
        let data = (0..self.size.entries())
            .map(|i| self.banks[i % BANKS][i / BANKS])
            .collect();
        Lattice::from_samples(data)
    }
}

//! # vpe-lut
//!
//! 3D LUT lattice handling for the VPE color pipeline.
//!
//! The tone-mapping stage carries a 3D LUT as raw integer samples. This
//! crate validates the lattice and reorders it into the four interleaved
//! banks a tetrahedral interpolation unit reads.
//!
//! # LUT Types
//!
//! - [`Lattice`] - Flat N^3 RGB lattice (N = 9 or 17)
//! - [`TetrahedralLut`] - The same samples split across four banks
//!
//! # Usage
//!
//! ```rust
//! use vpe_core::SystemAllocator;
//! use vpe_lut::{Lattice, LatticeSize, TetrahedralLut};
//!
//! let lattice = Lattice::identity(LatticeSize::Size17, true, &SystemAllocator).unwrap();
//! let hw = TetrahedralLut::convert(&lattice, true, &SystemAllocator).unwrap();
//! assert_eq!(hw.bank(0).len(), 1229);
//! assert_eq!(hw.reassemble().unwrap(), lattice);
//! ```
//!
//! # Dependencies
//!
//! - `vpe-core` - Allocator
//! - [`thiserror`] - Error handling
//!
//! # Used By
//!
//! - `vpe-color` - Tone-map state

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod lattice;
mod tetrahedral;

pub use error::{LutError, LutResult};
pub use lattice::{max_value, Lattice, LatticeSize};
pub use tetrahedral::{bank_len, TetrahedralLut, BANKS};

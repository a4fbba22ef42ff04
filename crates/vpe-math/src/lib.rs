//! # vpe-math
//!
//! Math primitives for the VPE color pipeline:
//!
//! - [`Mat3`] - 3x3 matrices for gamut (primaries) conversions
//! - [`Vec3`] - XYZ/RGB triplets
//! - [`Mat3x4`] - 3x4 affine matrices for color space conversion, with the
//!   dynamic power-of-two rescale that keeps coefficients inside the
//!   hardware Q-format
//! - [`Fixed31_32`], [`S2_13`] - fixed-point storage types
//!
//! # Design
//!
//! All matrix math runs in `f64`; values are quantized to fixed point only
//! when a result is stored. Matrices are **row-major** and use **column
//! vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Inversion goes through [`glam::DMat3`].
//!
//! # Usage
//!
//! ```rust
//! use vpe_math::{Mat3x4, S2_13};
//!
//! let m = Mat3x4::IDENTITY;
//! let regs = m.to_s2_13();
//! assert_eq!(regs[0], S2_13::ONE);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod affine;
mod fixed;
mod mat3;
mod vec3;

pub use affine::{Mat3x4, Rescaled};
pub use fixed::{Fixed31_32, S2_13};
pub use mat3::*;
pub use vec3::*;

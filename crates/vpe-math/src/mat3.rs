//! 3x3 matrices for primaries conversions.
//!
//! Row-major storage, column vectors (`out = m * v`). Products and
//! inverses go through [`glam::DMat3`].

use crate::Vec3;
use glam::{DMat3, DVec3};
use std::ops::Mul;

/// Row-major 3x3 matrix.
///
/// ```rust
/// use vpe_math::{Mat3, Vec3};
///
/// let v = Vec3::new(0.2, 0.4, 0.6);
/// assert_eq!(Mat3::IDENTITY * v, v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    /// Rows.
    pub m: [[f64; 3]; 3],
}

impl Mat3 {
    /// Identity.
    pub const IDENTITY: Self = Self::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Builds a matrix from rows.
    #[inline]
    pub const fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// Builds a matrix whose columns are `c0`, `c1`, `c2`.
    pub fn from_col_vecs(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self::from_rows([[c0.x, c1.x, c2.x], [c0.y, c1.y, c2.y], [c0.z, c1.z, c2.z]])
    }

    /// Inverse, or `None` for a singular matrix.
    pub fn inverse(&self) -> Option<Self> {
        let g = self.to_glam();
        (g.determinant().abs() >= 1e-12).then(|| Self::from_glam(g.inverse()))
    }

    fn to_glam(self) -> DMat3 {
        DMat3::from_cols_array_2d(&self.m).transpose()
    }

    fn from_glam(g: DMat3) -> Self {
        Self::from_rows(g.transpose().to_cols_array_2d())
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        let r = self.to_glam() * DVec3::new(v.x, v.y, v.z);
        Vec3::new(r.x, r.y, r.z)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_glam(self.to_glam() * rhs.to_glam())
    }
}

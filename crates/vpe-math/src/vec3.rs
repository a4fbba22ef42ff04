//! RGB / XYZ triplets.

use std::ops::Mul;

/// Three components: R, G, B or X, Y, Z.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// R or X.
    pub x: f64,
    /// G or Y.
    pub y: f64,
    /// B or Z.
    pub z: f64,
}

impl Vec3 {
    /// All zero.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// All one; linear white.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a triplet.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

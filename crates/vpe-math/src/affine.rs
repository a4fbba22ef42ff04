//! 3x4 affine matrices and dynamic rescale.
//!
//! A color space conversion in hardware is a 3x3 matrix plus an offset
//! column, with every coefficient stored as [`S2_13`]. Adjusted matrices
//! can leave that range; [`Mat3x4::rescale`] divides all twelve
//! coefficients by the smallest power of two that brings them back and
//! reports the divisor, which the transfer curve downstream must multiply
//! back in.
//!
//! # Layout
//!
//! ```text
//! | c0  c1  c2  c3  |   | a |   | c0*a + c1*b + c2*c + c3  |
//! | c4  c5  c6  c7  | * | b | = | c4*a + c5*b + c6*c + c7  |
//! | c8  c9  c10 c11 |   | c |   | c8*a + c9*b + c10*c + c11|
//!                       | 1 |
//! ```

use crate::{Mat3, Vec3, S2_13};

/// A 3x4 affine matrix (3x3 linear part plus offset column).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3x4 {
    /// Rows: `[c0, c1, c2, offset]`.
    pub m: [[f64; 4]; 3],
}

/// Result of [`Mat3x4::rescale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescaled {
    /// Matrix with every coefficient inside the budget.
    pub matrix: Mat3x4,
    /// Power-of-two divisor applied to every coefficient (1 when untouched).
    pub scale: u32,
}

impl Mat3x4 {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ],
    };

    /// Creates from rows.
    #[inline]
    pub const fn from_rows(rows: [[f64; 4]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates from twelve coefficients in row order.
    pub const fn from_coeffs(c: [f64; 12]) -> Self {
        Self {
            m: [
                [c[0], c[1], c[2], c[3]],
                [c[4], c[5], c[6], c[7]],
                [c[8], c[9], c[10], c[11]],
            ],
        }
    }

    /// Creates from raw S2.13 register values in row order.
    pub fn from_s2_13(regs: &[i16; 12]) -> Self {
        let mut c = [0.0; 12];
        for (dst, &raw) in c.iter_mut().zip(regs) {
            *dst = S2_13::from_raw(raw).to_f64();
        }
        Self::from_coeffs(c)
    }

    /// Embeds a 3x3 matrix with zero offsets.
    pub fn from_mat3(m: &Mat3) -> Self {
        let mut out = Self::IDENTITY;
        for r in 0..3 {
            out.m[r][..3].copy_from_slice(&m.m[r]);
            out.m[r][3] = 0.0;
        }
        out
    }

    /// Twelve coefficients in row order.
    pub fn coeffs(&self) -> [f64; 12] {
        let mut c = [0.0; 12];
        for r in 0..3 {
            c[r * 4..r * 4 + 4].copy_from_slice(&self.m[r]);
        }
        c
    }

    /// Returns `self ∘ inner`: applies `inner` first, then `self`.
    pub fn compose(&self, inner: &Self) -> Self {
        let mut out = [[0.0; 4]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for c in 0..4 {
                let mut acc = (0..3).map(|k| self.m[r][k] * inner.m[k][c]).sum::<f64>();
                if c == 3 {
                    acc += self.m[r][3];
                }
                row[c] = acc;
            }
        }
        Self { m: out }
    }

    /// Scales every row by `scale` and adds `bias` to the offsets.
    pub fn scale_bias(&self, scale: f64, bias: f64) -> Self {
        let mut out = *self;
        for row in out.m.iter_mut() {
            for v in row.iter_mut() {
                *v *= scale;
            }
            row[3] += bias;
        }
        out
    }

    /// Inverse transform, or `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<Self> {
        let linear = Mat3::from_rows(self.m.map(|r| [r[0], r[1], r[2]]));
        let inv = linear.inverse()?;
        let offset = inv * Vec3::new(self.m[0][3], self.m[1][3], self.m[2][3]);
        let mut out = Self::from_mat3(&inv);
        out.m[0][3] = -offset.x;
        out.m[1][3] = -offset.y;
        out.m[2][3] = -offset.z;
        Some(out)
    }

    /// Transforms a triplet.
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (r, o) in out.iter_mut().enumerate() {
            let m = &self.m[r];
            *o = m[0] * v[0] + m[1] * v[1] + m[2] * v[2] + m[3];
        }
        out
    }

    /// Largest coefficient magnitude.
    pub fn max_abs(&self) -> f64 {
        self.m.iter().flatten().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Returns true if all elements are finite.
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }

    /// Brings every coefficient inside `int_bits` integer bits.
    ///
    /// Leaves an in-budget matrix untouched (`scale == 1`). Otherwise all
    /// coefficients are divided by the smallest power of two that brings
    /// the largest one into budget.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vpe_math::Mat3x4;
    ///
    /// let m = Mat3x4::IDENTITY.scale_bias(5.0, 0.0);
    /// let r = m.rescale(2);
    /// assert_eq!(r.scale, 2);
    /// assert_eq!(r.matrix.m[0][0], 2.5);
    /// ```
    pub fn rescale(&self, int_bits: u32) -> Rescaled {
        let limit = S2_13::limit(int_bits.min(S2_13::INT_BITS));
        let max = self.max_abs();
        let mut scale = 1u32;
        while max / scale as f64 > limit && scale < 1 << 16 {
            scale <<= 1;
        }
        let matrix = if scale == 1 {
            *self
        } else {
            self.scale_bias(1.0 / scale as f64, 0.0)
        };
        Rescaled { matrix, scale }
    }

    /// Quantizes to S2.13 registers in row order.
    pub fn to_s2_13(&self) -> [S2_13; 12] {
        self.coeffs().map(S2_13::from_f64)
    }
}

impl Default for Mat3x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

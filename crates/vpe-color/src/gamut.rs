//! Gamut remap between primaries.

use tracing::trace;
use vpe_core::ColorPrimaries;
use vpe_math::{Mat3x4, S2_13};
use vpe_primaries::gamut_remap_matrix;

/// Linear-light primaries conversion, stored as a 3x4 S2.13 matrix with
/// zero offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamutRemap {
    from: ColorPrimaries,
    to: ColorPrimaries,
    regs: [S2_13; 12],
}

impl GamutRemap {
    /// Builds the remap `from -> to`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vpe_color::GamutRemap;
    /// use vpe_core::ColorPrimaries;
    ///
    /// let g = GamutRemap::new(ColorPrimaries::Bt709, ColorPrimaries::Bt709);
    /// assert!(g.is_identity());
    /// ```
    pub fn new(from: ColorPrimaries, to: ColorPrimaries) -> Self {
        let m = gamut_remap_matrix(from, to);
        trace!(?from, ?to, "gamut remap");
        Self {
            from,
            to,
            regs: Mat3x4::from_mat3(&m).to_s2_13(),
        }
    }

    /// Source primaries.
    #[inline]
    pub fn from(&self) -> ColorPrimaries {
        self.from
    }

    /// Destination primaries.
    #[inline]
    pub fn to(&self) -> ColorPrimaries {
        self.to
    }

    /// Coefficients in row order.
    #[inline]
    pub fn regs(&self) -> &[S2_13; 12] {
        &self.regs
    }

    /// Coefficients as floats.
    pub fn to_mat3x4(&self) -> Mat3x4 {
        Mat3x4::from_s2_13(&self.regs.map(S2_13::raw))
    }

    /// True when the matrix is the identity.
    pub fn is_identity(&self) -> bool {
        self.regs == Mat3x4::IDENTITY.to_s2_13()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bt2020_to_bt709() {
        let g = GamutRemap::new(ColorPrimaries::Bt2020, ColorPrimaries::Bt709);
        let m = g.to_mat3x4();
        assert_abs_diff_eq!(m.m[0][0], 1.6605, epsilon = 1e-3);
        assert_abs_diff_eq!(m.m[0][1], -0.5876, epsilon = 1e-3);
        for row in m.m {
            assert_eq!(row[3], 0.0);
        }
        assert!(!g.is_identity());
    }

    #[test]
    fn test_white_preserved() {
        let g = GamutRemap::new(ColorPrimaries::Bt709, ColorPrimaries::Bt2020);
        let w = g.to_mat3x4().apply([1.0, 1.0, 1.0]);
        for c in w {
            assert_abs_diff_eq!(c, 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_jfif_shares_bt601() {
        let a = GamutRemap::new(ColorPrimaries::Jfif, ColorPrimaries::Bt709);
        let b = GamutRemap::new(ColorPrimaries::Bt601, ColorPrimaries::Bt709);
        assert_eq!(a.regs(), b.regs());
    }
}

//! Piecewise power-law curves (sRGB, BT.709, BT.1886).
//!
//! All three share one parameterization: a linear toe below a threshold
//! and an offset power segment above it.
//!
//! # Formula
//!
//! ```text
//! encode (linear -> signal):
//!   x >= 1        : 1
//!   x <= -a0      : a2 - (1 + a3) * (-x)^(1/gamma)
//!   x >= a0       : (1 + a3) * x^(1/gamma) - a2
//!   otherwise     : a1 * x
//!
//! decode (signal -> linear):
//!   x <= a0 * a1  : x / a1
//!   otherwise     : ((x + a2) / (1 + a3))^gamma
//! ```
//!
//! Negative inputs are mirrored. BT.1886 is a pure power with no toe.

use crate::cache::PowCache;

/// Coefficients of a piecewise power-law curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerCurve {
    /// Linear-domain threshold of the toe.
    pub a0: f64,
    /// Toe slope.
    pub a1: f64,
    /// Offset subtracted after exponentiation.
    pub a2: f64,
    /// Scale minus one applied after exponentiation.
    pub a3: f64,
    /// Decoding exponent.
    pub gamma: f64,
}

/// IEC 61966-2-1 sRGB.
pub const SRGB: PowerCurve = PowerCurve {
    a0: 0.0031308,
    a1: 12.92,
    a2: 0.055,
    a3: 0.055,
    gamma: 2.4,
};

/// ITU-R BT.709.
pub const BT709: PowerCurve = PowerCurve {
    a0: 0.018,
    a1: 4.5,
    a2: 0.099,
    a3: 0.099,
    gamma: 2.222,
};

/// ITU-R BT.1886 (pure 2.4 power).
pub const BT1886: PowerCurve = PowerCurve {
    a0: 0.0,
    a1: 0.0,
    a2: 0.0,
    a3: 0.0,
    gamma: 2.4,
};

impl PowerCurve {
    /// Encoding exponent.
    #[inline]
    pub fn inv_gamma(&self) -> f64 {
        1.0 / self.gamma
    }

    /// Linear to signal, exact.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vpe_transfer::power::SRGB;
    ///
    /// assert!((SRGB.encode(0.214041) - 0.5).abs() < 1e-4);
    /// ```
    pub fn encode(&self, x: f64) -> f64 {
        self.encode_with(x, |v, e| v.powf(e))
    }

    /// Linear to signal, routing the power segment through `cache`.
    ///
    /// Only valid when called in grid order during a single curve build.
    pub fn encode_cached(&self, x: f64, cache: &mut PowCache) -> f64 {
        self.encode_with(x, |v, e| cache.pow(v, e))
    }

    fn encode_with(&self, x: f64, mut pow: impl FnMut(f64, f64) -> f64) -> f64 {
        let scale = 1.0 + self.a3;
        if x >= 1.0 {
            1.0
        } else if x <= -self.a0 {
            self.a2 - scale * (-x).powf(self.inv_gamma())
        } else if x >= self.a0 {
            scale * pow(x, self.inv_gamma()) - self.a2
        } else {
            x * self.a1
        }
    }

    /// Signal to linear.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vpe_transfer::power::SRGB;
    ///
    /// assert!((SRGB.decode(0.5) - 0.214041).abs() < 1e-5);
    /// ```
    pub fn decode(&self, x: f64) -> f64 {
        let threshold = self.a0 * self.a1;
        let scale = 1.0 + self.a3;
        if x <= -threshold {
            -((-x + self.a2) / scale).powf(self.gamma)
        } else if x <= threshold {
            x / self.a1
        } else {
            ((x + self.a2) / scale).powf(self.gamma)
        }
    }
}

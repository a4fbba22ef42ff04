//! Fixed-point storage types.
//!
//! Computation happens in `f64`; results are stored in the formats the
//! register writer consumes:
//!
//! - [`Fixed31_32`] - 64-bit signed, 32 fractional bits (curve points, gains)
//! - [`S2_13`] - 16-bit signed, 2 integer + 13 fractional bits (matrix
//!   coefficients)
//!
//! Both conversions round to nearest and saturate at the format limits.

use std::fmt;
use std::ops::{Add, Sub};

/// Signed 31.32 fixed-point value.
///
/// # Example
///
/// ```rust
/// use vpe_math::Fixed31_32;
///
/// let half = Fixed31_32::from_f64(0.5);
/// assert_eq!(half.raw(), 1 << 31);
/// assert_eq!(half.to_f64(), 0.5);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed31_32(i64);

impl Fixed31_32 {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = 32;
    /// 0.0
    pub const ZERO: Self = Self(0);
    /// 1.0
    pub const ONE: Self = Self(1 << Self::FRAC_BITS);

    /// Wraps a raw 31.32 value.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw 31.32 value.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Converts an integer.
    #[inline]
    pub const fn from_int(v: i32) -> Self {
        Self((v as i64) << Self::FRAC_BITS)
    }

    /// Converts a float, rounding to nearest and saturating. NaN maps to zero.
    pub fn from_f64(v: f64) -> Self {
        if v.is_nan() {
            return Self::ZERO;
        }
        let scaled = (v * (1u64 << Self::FRAC_BITS) as f64).round();
        if scaled >= i64::MAX as f64 {
            Self(i64::MAX)
        } else if scaled <= i64::MIN as f64 {
            Self(i64::MIN)
        } else {
            Self(scaled as i64)
        }
    }

    /// Converts to a float.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1u64 << Self::FRAC_BITS) as f64
    }

    /// Clamps to [0, 1].
    #[inline]
    pub fn clamp_unit(self) -> Self {
        Self(self.0.clamp(0, Self::ONE.0))
    }

    /// Fixed-point product.
    #[inline]
    pub fn saturating_mul(self, rhs: Self) -> Self {
        let wide = (self.0 as i128 * rhs.0 as i128) >> Self::FRAC_BITS;
        Self(wide.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

impl Add for Fixed31_32 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fixed31_32 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Debug for Fixed31_32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed31_32({})", self.to_f64())
    }
}

impl fmt::Display for Fixed31_32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.to_f64())
    }
}

/// Signed S2.13 register coefficient.
///
/// Representable range is [-4, 4 - 2^-13].
///
/// # Example
///
/// ```rust
/// use vpe_math::S2_13;
///
/// assert_eq!(S2_13::from_f64(1.0).raw(), 0x2000);
/// assert_eq!(S2_13::from_f64(10.0), S2_13::MAX);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct S2_13(i16);

impl S2_13 {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = 13;
    /// Number of integer bits (excluding sign).
    pub const INT_BITS: u32 = 2;
    /// 0.0
    pub const ZERO: Self = Self(0);
    /// 1.0
    pub const ONE: Self = Self(1 << Self::FRAC_BITS);
    /// Largest representable value.
    pub const MAX: Self = Self(i16::MAX);
    /// Smallest representable value.
    pub const MIN: Self = Self(i16::MIN);

    /// Wraps a raw register value.
    #[inline]
    pub const fn from_raw(raw: i16) -> Self {
        Self(raw)
    }

    /// Raw register value.
    #[inline]
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Converts a float, rounding to nearest and saturating. NaN maps to zero.
    pub fn from_f64(v: f64) -> Self {
        if v.is_nan() {
            return Self::ZERO;
        }
        let scaled = (v * (1 << Self::FRAC_BITS) as f64).round();
        Self(scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16)
    }

    /// Converts to a float.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1 << Self::FRAC_BITS) as f64
    }

    /// Largest magnitude that fits when only `int_bits` integer bits are used.
    #[inline]
    pub fn limit(int_bits: u32) -> f64 {
        (1u32 << int_bits) as f64 - 1.0 / (1 << Self::FRAC_BITS) as f64
    }
}

impl fmt::Debug for S2_13 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S2_13({:#06x} = {})", self.0 as u16, self.to_f64())
    }
}

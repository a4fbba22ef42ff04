//! SMPTE ST 2084 Perceptual Quantizer (PQ).
//!
//! Linear values are normalized so that 1.0 is 10,000 cd/m2.
//!
//! # Range
//!
//! - Encoded: [0, 1]
//! - Linear: [0, 1] (x 10000 cd/m2)
//!
//! # Usage
//!
//! ```rust
//! use vpe_transfer::pq;
//!
//! // 100 nits reference white
//! let signal = pq::encode(0.01);
//! assert!((signal - 0.508).abs() < 0.001);
//! ```

use vpe_core::HDR_PEAK_WHITE_NITS;

const M1: f64 = 2610.0 / 16384.0;
const M2: f64 = 2523.0 / 4096.0 * 128.0;
const C1: f64 = 3424.0 / 4096.0;
const C2: f64 = 2413.0 / 4096.0 * 32.0;
const C3: f64 = 2392.0 / 4096.0 * 32.0;

/// Linear to PQ signal. Input and output are clamped to [0, 1].
pub fn encode(l: f64) -> f64 {
    let y = l.clamp(0.0, 1.0);
    let yp = y.powf(M1);
    let num = C1 + C2 * yp;
    let den = 1.0 + C3 * yp;
    (num / den).powf(M2).clamp(0.0, 1.0)
}

/// PQ signal to linear. Input and output are clamped to [0, 1].
///
/// Signals below `C1^M2` give a negative base, which is mirrored rather
/// than flushed to zero.
pub fn decode(v: f64) -> f64 {
    let vp = v.clamp(0.0, 1.0).powf(1.0 / M2);
    let base = (vp - C1) / (C2 - C3 * vp);
    base.abs().powf(1.0 / M1).clamp(0.0, 1.0)
}

/// Absolute luminance to PQ signal.
#[inline]
pub fn nits_to_signal(nits: f64) -> f64 {
    encode(nits / HDR_PEAK_WHITE_NITS as f64)
}

/// PQ relative to a display peak.
///
/// Linear 1.0 maps to `peak_nits` instead of 10,000 cd/m2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPq {
    scale: f64,
}

impl NormalizedPq {
    /// Normalizes to `peak_nits`; zero falls back to 10,000.
    pub fn new(peak_nits: u32) -> Self {
        let peak = if peak_nits == 0 { HDR_PEAK_WHITE_NITS } else { peak_nits };
        Self {
            scale: peak as f64 / HDR_PEAK_WHITE_NITS as f64,
        }
    }

    /// Peak-relative linear to PQ signal.
    pub fn encode(&self, l: f64) -> f64 {
        encode(l * self.scale)
    }

    /// PQ signal to peak-relative linear, clamped to [0, 1].
    pub fn decode(&self, v: f64) -> f64 {
        (decode(v) / self.scale).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_roundtrip() {
        for &l in &[0.0, 1e-5, 1e-4, 0.001, 0.01, 0.1, 0.5, 1.0] {
            let decoded = decode(encode(l));
            assert!((l - decoded).abs() < l * 1e-6 + 1e-8, "l={l}, decoded={decoded}");
        }
    }

    #[test]
    fn test_reference_points() {
        assert_abs_diff_eq!(nits_to_signal(100.0), 0.508078, epsilon = 1e-5);
        assert_abs_diff_eq!(nits_to_signal(1000.0), 0.751827, epsilon = 1e-5);
        assert_abs_diff_eq!(encode(1.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clamps_input() {
        assert_eq!(encode(-1.0), encode(0.0));
        assert_eq!(encode(2.0), encode(1.0));
        assert_eq!(decode(1.5), decode(1.0));
    }

    #[test]
    fn test_decode_below_c1_stays_tiny() {
        let v = decode(0.0);
        assert!(v > 0.0 && v < 1e-8);
    }

    #[test]
    fn test_normalized_peak() {
        let npq = NormalizedPq::new(1000);
        assert_abs_diff_eq!(npq.encode(1.0), nits_to_signal(1000.0), epsilon = 1e-12);
        assert_abs_diff_eq!(npq.decode(nits_to_signal(500.0)), 0.5, epsilon = 1e-6);
        assert_eq!(NormalizedPq::new(0), NormalizedPq::new(10_000));
    }
}

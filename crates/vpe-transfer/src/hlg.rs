//! Hybrid Log-Gamma (HLG), display referred.
//!
//! The signal is decoded with the inverse OETF and then the OOTF of a
//! 1000 cd/m2 display (system gamma 1.2), applied per channel. The result
//! is normalized so that linear 1.0 is 10,000 cd/m2, matching PQ.
//!
//! # Reference
//!
//! ITU-R BT.2100-2

use vpe_core::HDR_PEAK_WHITE_NITS;

const A: f64 = 0.17883277;
const B: f64 = 0.28466892; // 1 - 4*A
const C: f64 = 0.55991073; // 0.5 - A*ln(4*A)

/// Nominal display peak.
pub const DISPLAY_PEAK_NITS: f64 = 1000.0;
/// System gamma at the nominal peak.
pub const SYSTEM_GAMMA: f64 = 1.2;

/// Scene light to HLG signal.
#[inline]
pub fn oetf(e: f64) -> f64 {
    if e <= 0.0 {
        0.0
    } else if e <= 1.0 / 12.0 {
        (3.0 * e).sqrt()
    } else {
        A * (12.0 * e - B).ln() + C
    }
}

/// HLG signal to scene light.
#[inline]
pub fn inverse_oetf(ep: f64) -> f64 {
    if ep <= 0.0 {
        0.0
    } else if ep <= 0.5 {
        ep * ep / 3.0
    } else {
        (((ep - C) / A).exp() + B) / 12.0
    }
}

/// Signal to display linear (1.0 = 10,000 cd/m2).
pub fn decode(v: f64) -> f64 {
    let scene = inverse_oetf(v.clamp(0.0, 1.0));
    let display = scene.powf(SYSTEM_GAMMA) * DISPLAY_PEAK_NITS;
    (display / HDR_PEAK_WHITE_NITS as f64).clamp(0.0, 1.0)
}

/// Display linear (1.0 = 10,000 cd/m2) to signal.
pub fn encode(l: f64) -> f64 {
    let relative = (l * HDR_PEAK_WHITE_NITS as f64 / DISPLAY_PEAK_NITS).clamp(0.0, 1.0);
    if relative >= 1.0 {
        return 1.0;
    }
    oetf(relative.powf(1.0 / SYSTEM_GAMMA)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_oetf_knee() {
        assert_abs_diff_eq!(oetf(1.0 / 12.0), 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(oetf(1.0), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(inverse_oetf(0.5), 1.0 / 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_peak_is_display_peak() {
        assert_abs_diff_eq!(decode(1.0), 0.1, epsilon = 1e-6);
        assert_eq!(decode(0.0), 0.0);
    }

    #[test]
    fn test_roundtrip() {
        for i in 1..=20 {
            let v = i as f64 / 20.0;
            assert_abs_diff_eq!(encode(decode(v)), v, epsilon = 1e-6);
        }
    }
}

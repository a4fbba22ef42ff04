//! HDR static metadata.

use serde::{Deserialize, Serialize};

/// Peak luminance of the PQ signal range, in cd/m2.
pub const HDR_PEAK_WHITE_NITS: u32 = 10000;

/// Static HDR metadata (SMPTE ST.2086 / CTA-861.3 light levels).
///
/// Luminance values are in cd/m2. A zero `max_mastering` means the
/// metadata is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HdrMetadata {
    /// Maximum mastering display luminance.
    pub max_mastering: u32,
    /// Minimum mastering display luminance, in 0.0001 cd/m2 units.
    pub min_mastering: u32,
    /// Maximum content light level.
    pub max_content: u32,
    /// Maximum frame-average light level.
    pub avg_content: u32,
}

impl HdrMetadata {
    /// Whether the mastering luminance is known.
    #[inline]
    pub fn has_mastering(&self) -> bool {
        self.max_mastering != 0
    }

    /// Peak luminance used to normalize PQ curves, falling back to the full
    /// PQ range when the mastering peak is unknown.
    #[inline]
    pub fn peak_nits(&self) -> u32 {
        if self.has_mastering() {
            self.max_mastering
        } else {
            HDR_PEAK_WHITE_NITS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_fallback() {
        assert_eq!(HdrMetadata::default().peak_nits(), HDR_PEAK_WHITE_NITS);
        let m = HdrMetadata {
            max_mastering: 1000,
            ..Default::default()
        };
        assert_eq!(m.peak_nits(), 1000);
    }
}

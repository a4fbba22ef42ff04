//! Engine configuration.
//!
//! # YAML
//!
//! ```yaml
//! matrix_int_bits: 1
//! use_precomputed_tables: false
//! shaper_exp_max: 1
//! output_pwl: true
//! ```
//!
//! Missing keys take their defaults.

use serde::{Deserialize, Serialize};
use vpe_math::S2_13;

use crate::error::{ColorError, ColorResult};

/// Upper bound for [`EngineConfig::shaper_exp_max`].
pub const MAX_SHAPER_EXP: u32 = 8;

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Integer bits the CSC coefficients may use before rescaling.
    pub matrix_int_bits: u32,
    /// Use shared degamma tables for unscaled stream curves.
    pub use_precomputed_tables: bool,
    /// Exponent of the shaper input range.
    pub shaper_exp_max: u32,
    /// Store the output regamma in hardware PWL form.
    pub output_pwl: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            matrix_int_bits: S2_13::INT_BITS,
            use_precomputed_tables: true,
            shaper_exp_max: 1,
            output_pwl: false,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a YAML config.
    pub fn from_yaml(yaml: &str) -> ColorResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> ColorResult<()> {
        if self.matrix_int_bits > S2_13::INT_BITS {
            return Err(ColorError::Config(format!(
                "matrix_int_bits {} exceeds the {} integer bits of S2.13",
                self.matrix_int_bits,
                S2_13::INT_BITS
            )));
        }
        if self.shaper_exp_max > MAX_SHAPER_EXP {
            return Err(ColorError::Config(format!(
                "shaper_exp_max {} exceeds {MAX_SHAPER_EXP}",
                self.shaper_exp_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = EngineConfig::from_yaml("{}").unwrap();
        assert_eq!(c, EngineConfig::default());
        assert_eq!(c.matrix_int_bits, 2);
        assert!(c.use_precomputed_tables);
    }

    #[test]
    fn test_partial_yaml() {
        let c = EngineConfig::from_yaml("matrix_int_bits: 1\noutput_pwl: true\n").unwrap();
        assert_eq!(c.matrix_int_bits, 1);
        assert!(c.output_pwl);
        assert_eq!(c.shaper_exp_max, 1);
    }

    #[test]
    fn test_rejects_wide_matrix() {
        let r = EngineConfig::from_yaml("matrix_int_bits: 3");
        assert!(matches!(r, Err(ColorError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_yaml() {
        assert!(matches!(
            EngineConfig::from_yaml("matrix_int_bits: [1"),
            Err(ColorError::Config(_))
        ));
    }
}

//! Build request.
//!
//! # YAML
//!
//! ```yaml
//! output:
//!   descriptor: { primaries: bt709, transfer: srgb }
//! streams:
//!   - descriptor:
//!       primaries: bt709
//!       transfer: bt709
//!       range: studio
//!       encoding: ycbcr
//!     pixel_depth: bits10
//!     adjustments: { brightness: 10.0 }
//! ```

use serde::{Deserialize, Serialize};
use vpe_core::{ColorDescriptor, HdrMetadata};

use crate::adjust::ColorAdjustments;
use crate::bias_scale::PixelDepth;
use crate::error::ColorResult;
use crate::tonemap::ToneMapParams;

/// One input stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamParams {
    /// Surface descriptor.
    pub descriptor: ColorDescriptor,
    /// Brightness, contrast, hue and saturation.
    #[serde(default)]
    pub adjustments: ColorAdjustments,
    /// Sample depth.
    #[serde(default)]
    pub pixel_depth: PixelDepth,
    /// Static HDR metadata.
    #[serde(default)]
    pub hdr: HdrMetadata,
    /// 3D LUT tone mapping.
    #[serde(default)]
    pub tone_map: ToneMapParams,
}

impl StreamParams {
    /// A stream with default adjustments, 8-bit samples and no tone mapping.
    pub fn new(descriptor: ColorDescriptor) -> Self {
        Self {
            descriptor,
            adjustments: ColorAdjustments::default(),
            pixel_depth: PixelDepth::default(),
            hdr: HdrMetadata::default(),
            tone_map: ToneMapParams::default(),
        }
    }
}

/// The output path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputParams {
    /// Surface descriptor.
    pub descriptor: ColorDescriptor,
    /// Static HDR metadata of the target.
    #[serde(default)]
    pub hdr: HdrMetadata,
    /// Sample depth written; sets the denorm clamp.
    #[serde(default)]
    pub pixel_depth: PixelDepth,
}

impl OutputParams {
    /// An 8-bit output without HDR metadata.
    pub fn new(descriptor: ColorDescriptor) -> Self {
        Self {
            descriptor,
            hdr: HdrMetadata::default(),
            pixel_depth: PixelDepth::default(),
        }
    }
}

/// Everything one build call needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildParams {
    /// Input streams in blend order.
    #[serde(default)]
    pub streams: Vec<StreamParams>,
    /// Output path.
    pub output: OutputParams,
}

impl BuildParams {
    /// A request with no streams.
    pub fn new(output: OutputParams) -> Self {
        Self {
            streams: Vec::new(),
            output,
        }
    }

    /// Adds a stream.
    pub fn with_stream(mut self, stream: StreamParams) -> Self {
        self.streams.push(stream);
        self
    }

    /// Parses a YAML request.
    pub fn from_yaml(yaml: &str) -> ColorResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vpe_core::{ColorRange, PixelEncoding};

    #[test]
    fn test_yaml_request() {
        let yaml = r#"
output:
  descriptor: { primaries: bt709, transfer: srgb }
streams:
  - descriptor:
      primaries: bt709
      transfer: bt709
      range: studio
      encoding: ycbcr
    pixel_depth: bits10
    adjustments: { brightness: 10.0 }
"#;
        let p = BuildParams::from_yaml(yaml).unwrap();
        assert_eq!(p.output.descriptor, ColorDescriptor::srgb());
        assert_eq!(p.streams.len(), 1);
        let s = &p.streams[0];
        assert_eq!(s.descriptor.range, ColorRange::Studio);
        assert_eq!(s.descriptor.encoding, PixelEncoding::YCbCr);
        assert_eq!(s.pixel_depth, PixelDepth::Bits10);
        assert_eq!(s.adjustments.brightness, 10.0);
        assert_eq!(s.adjustments.contrast, 1.0);
        assert!(!s.tone_map.enabled);
    }

    #[test]
    fn test_missing_output_rejected() {
        assert!(BuildParams::from_yaml("streams: []").is_err());
    }
}

//! SDR/HDR nominal white gain.

use vpe_core::{ColorSpace, HdrMetadata, TransferFunction, HDR_PEAK_WHITE_NITS};
use vpe_math::Fixed31_32;

/// Nominal white of SDR video content.
pub const SDR_VIDEO_WHITE_NITS: u32 = 100;
/// Nominal white of SDR desktop content.
pub const SDR_WHITE_NITS: u32 = 80;

/// Gain applied to stream linear light before the output curve.
///
/// - HDR stream on an SDR output: `10000 / max_mastering`, or 1 without
///   mastering metadata.
/// - SDR stream on an HDR output: SDR white over the PQ peak, using
///   video white for Y'CbCr or BT.709 streams and desktop white
///   otherwise.
/// - Otherwise 1.
pub fn white_point_gain(
    stream_cs: ColorSpace,
    stream_tf: TransferFunction,
    output_tf: TransferFunction,
    metadata: &HdrMetadata,
) -> Fixed31_32 {
    match (stream_tf.is_hdr(), output_tf.is_hdr()) {
        (true, false) if metadata.has_mastering() => {
            Fixed31_32::from_f64(HDR_PEAK_WHITE_NITS as f64 / metadata.max_mastering as f64)
        }
        (false, true) => {
            let white = if stream_cs.is_ycbcr() || stream_tf == TransferFunction::Bt709 {
                SDR_VIDEO_WHITE_NITS
            } else {
                SDR_WHITE_NITS
            };
            Fixed31_32::from_f64(white as f64 / HDR_PEAK_WHITE_NITS as f64)
        }
        _ => Fixed31_32::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mastering(nits: u32) -> HdrMetadata {
        HdrMetadata {
            max_mastering: nits,
            ..Default::default()
        }
    }

    #[test]
    fn test_hdr_to_sdr() {
        let g = white_point_gain(ColorSpace::Bt2020Ycbcr, TransferFunction::Pq2084, TransferFunction::Srgb, &mastering(1000));
        assert_eq!(g, Fixed31_32::from_int(10));
        let g = white_point_gain(ColorSpace::Bt2020Ycbcr, TransferFunction::Pq2084, TransferFunction::Srgb, &mastering(0));
        assert_eq!(g, Fixed31_32::ONE);
    }

    #[test]
    fn test_sdr_to_hdr_constants() {
        let none = HdrMetadata::default();
        let video = white_point_gain(ColorSpace::Ycbcr709, TransferFunction::Srgb, TransferFunction::Pq2084, &none);
        assert_eq!(video, Fixed31_32::from_f64(0.01));
        let bt709 = white_point_gain(ColorSpace::Srgb, TransferFunction::Bt709, TransferFunction::Hlg, &none);
        assert_eq!(bt709, Fixed31_32::from_f64(0.01));
        let desktop = white_point_gain(ColorSpace::Srgb, TransferFunction::Srgb, TransferFunction::Pq2084, &none);
        assert_eq!(desktop, Fixed31_32::from_f64(0.008));
    }

    #[test]
    fn test_same_class_is_unity() {
        let m = mastering(4000);
        assert_eq!(
            white_point_gain(ColorSpace::Bt2020Rgb, TransferFunction::Pq2084, TransferFunction::Pq2084, &m),
            Fixed31_32::ONE
        );
        assert_eq!(
            white_point_gain(ColorSpace::Srgb, TransferFunction::Srgb, TransferFunction::Bt709, &m),
            Fixed31_32::ONE
        );
    }
}

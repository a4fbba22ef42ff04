//! # vpe-bench
//!
//! Build requests shared by the benchmarks.
//!
//! Run with: `cargo bench -p vpe-bench`

#![warn(missing_docs)]

use vpe_color::{BuildParams, ColorAdjustments, OutputParams, StreamParams, ToneMapParams};
use vpe_core::prelude::*;
use vpe_core::SystemAllocator;
use vpe_lut::{Lattice, LatticeSize, LutResult};

/// Studio-range BT.709 video.
pub fn video() -> ColorDescriptor {
    ColorDescriptor::new(ColorPrimaries::Bt709, TransferCurve::Bt709, ColorRange::Studio, PixelEncoding::YCbCr)
}

/// `count` video streams onto an sRGB output, each with its own
/// brightness so every stream carries an adjusted matrix.
pub fn video_request(count: usize) -> BuildParams {
    (0..count).fold(BuildParams::new(OutputParams::new(ColorDescriptor::srgb())), |p, i| {
        p.with_stream(StreamParams {
            adjustments: ColorAdjustments {
                brightness: i as f64,
                ..Default::default()
            },
            ..StreamParams::new(video())
        })
    })
}

/// One HDR10 stream tone mapped through a 17^3 identity lattice.
pub fn tone_mapped_request(lut_uid: u64) -> LutResult<BuildParams> {
    let lut = Lattice::identity(LatticeSize::Size17, true, &SystemAllocator)?;
    let stream = StreamParams {
        tone_map: ToneMapParams {
            enabled: true,
            lut_uid,
            lut_out_primaries: ColorPrimaries::Bt709,
            lut_out_tf: TransferFunction::Srgb,
            lut_data: lut.to_flat(),
            ..Default::default()
        },
        ..StreamParams::new(ColorDescriptor::hdr10())
    };
    Ok(BuildParams::new(OutputParams::new(ColorDescriptor::srgb())).with_stream(stream))
}

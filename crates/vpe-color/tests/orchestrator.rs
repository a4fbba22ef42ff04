//! Build-to-build behavior of the color engine.

use std::cell::Cell;
use std::sync::Arc;

use vpe_color::csc::base_registers;
use vpe_color::{
    BuildParams, ColorAdjustments, ColorEngine, ColorError, EngineConfig, OutputParams, PixelDepth, Status,
    StreamParams, ToneMapParams,
};
use vpe_core::prelude::*;
use vpe_core::{AllocError, Allocator, SystemAllocator};
use vpe_lut::{Lattice, LatticeSize};
use vpe_math::Fixed31_32;
use vpe_transfer::{build_degamma, build_shaper, ColorTables, CurveParams, TransferError, TransferFunctionCurve};

/// Fails every request once `left` reaches zero.
#[derive(Debug)]
struct Budget {
    left: Cell<usize>,
}

impl Budget {
    fn new(left: usize) -> Self {
        Self { left: Cell::new(left) }
    }

    fn take(&self, bytes: usize) -> Result<(), AllocError> {
        match self.left.get() {
            0 => Err(AllocError { bytes }),
            n => {
                self.left.set(n - 1);
                Ok(())
            }
        }
    }
}

impl Allocator for Budget {
    fn try_alloc<T: Clone>(&self, len: usize, fill: T) -> Result<Vec<T>, AllocError> {
        self.take(len * size_of::<T>())?;
        Ok(vec![fill; len])
    }

    fn try_box<T>(&self, value: T) -> Result<Box<T>, AllocError> {
        self.take(size_of::<T>())?;
        Ok(Box::new(value))
    }
}

fn video() -> ColorDescriptor {
    ColorDescriptor::new(ColorPrimaries::Bt709, TransferCurve::Bt709, ColorRange::Studio, PixelEncoding::YCbCr)
}

fn single(stream: StreamParams) -> BuildParams {
    BuildParams::new(OutputParams::new(ColorDescriptor::srgb())).with_stream(stream)
}

fn engine() -> ColorEngine {
    ColorEngine::new(EngineConfig::default()).unwrap()
}

fn budget_engine(left: usize) -> ColorEngine<Budget> {
    let tables = Arc::new(ColorTables::new(&SystemAllocator).unwrap());
    ColorEngine::with_tables(EngineConfig::default(), tables, Budget::new(left)).unwrap()
}

fn tone_mapped(uid: u64) -> StreamParams {
    let lut = Lattice::identity(LatticeSize::Size17, true, &SystemAllocator).unwrap();
    StreamParams {
        tone_map: ToneMapParams {
            enabled: true,
            lut_uid: uid,
            lut_out_primaries: ColorPrimaries::Bt709,
            lut_out_tf: TransferFunction::Srgb,
            lut_data: lut.to_flat(),
            ..Default::default()
        },
        ..StreamParams::new(ColorDescriptor::hdr10())
    }
}

#[test]
fn limited_video_to_srgb() {
    let mut engine = engine();
    let params = single(StreamParams::new(video()));

    let first = engine.build(&params).unwrap();
    assert!(first.output.color_space);
    assert!(first.output.transfer_function);
    assert!(first.streams[0].color_space);
    assert!(first.streams[0].transfer_function);
    assert!(first.allocations > 0);

    let stream = engine.stream(0).unwrap();
    let csc = stream.csc().unwrap();
    assert_eq!(&csc.raw(), base_registers(ColorSpace::Ycbcr709Limited).unwrap());
    assert_eq!(csc.scale(), 1);
    assert_eq!(stream.transfer_function(), TransferFunction::Bt709);
    assert!(stream.bias_scale().unwrap().is_identity());
    assert!(stream.gamut().unwrap().is_identity());
    assert_eq!(stream.white_point_gain(), Fixed31_32::ONE);
    assert!(stream.tone_map().is_none());

    let second = engine.build(&params).unwrap();
    assert!(second.is_clean());
    assert_eq!(second.allocations, 0);
    assert!(!engine.stream(0).unwrap().dirty().any());
    assert!(!engine.output().unwrap().dirty().any());
}

#[test]
fn allocation_failure_commits_nothing() {
    let mut engine = budget_engine(0);
    let err = engine.build(&single(StreamParams::new(video()))).unwrap_err();
    assert_eq!(err.status(), Status::NoMemory);
    assert!(engine.output().is_none());
    assert!(engine.streams().is_empty());

    engine.allocator().left.set(usize::MAX);
    let params = single(StreamParams::new(video()));
    engine.build(&params).unwrap();
    let before = engine.stream(0).unwrap().csc().unwrap().raw();

    let adjusted = single(StreamParams {
        adjustments: ColorAdjustments {
            brightness: 50.0,
            ..Default::default()
        },
        ..StreamParams::new(video())
    });
    engine.allocator().left.set(0);
    let err = engine.build(&adjusted).unwrap_err();
    assert!(matches!(err, ColorError::NoMemory(_)));
    let stream = engine.stream(0).unwrap();
    assert!(stream.adjustments().is_default());
    assert_eq!(stream.csc().unwrap().raw(), before);

    engine.allocator().left.set(usize::MAX);
    let report = engine.build(&adjusted).unwrap();
    assert!(report.streams[0].color_space);
    assert_eq!(engine.stream(0).unwrap().adjustments().brightness, 50.0);
    assert_ne!(engine.stream(0).unwrap().csc().unwrap().raw(), before);
}

#[test]
fn matrix_rescale_dirties_transfer() {
    let mut engine = engine();
    engine.build(&single(StreamParams::new(video()))).unwrap();

    // in-budget adjustment: matrix changes, curve stays
    let mild = single(StreamParams {
        adjustments: ColorAdjustments {
            brightness: 10.0,
            ..Default::default()
        },
        ..StreamParams::new(video())
    });
    let report = engine.build(&mild).unwrap();
    assert!(report.streams[0].color_space);
    assert!(!report.streams[0].transfer_function);
    assert_eq!(engine.stream(0).unwrap().matrix_scale(), 1);

    // saturation pushes chroma coefficients past 4.0
    let strong = single(StreamParams {
        adjustments: ColorAdjustments {
            contrast: 2.0,
            saturation: 3.0,
            ..Default::default()
        },
        ..StreamParams::new(video())
    });
    let report = engine.build(&strong).unwrap();
    assert!(report.streams[0].transfer_function);
    let stream = engine.stream(0).unwrap();
    let scale = stream.matrix_scale();
    assert!(scale > 1);

    let curve = stream.input_curve().unwrap();
    assert_eq!(curve.variant(), "distributed");
    let expected = build_degamma(
        TransferFunction::Bt709,
        engine.tables().degamma_grid(),
        &CurveParams {
            input_scale: scale as f64,
            peak_nits: 10000,
        },
        &SystemAllocator,
    )
    .unwrap();
    assert_eq!(curve.points().unwrap(), &expected);

    // back to unit scale
    let report = engine.build(&single(StreamParams::new(video()))).unwrap();
    assert!(report.streams[0].transfer_function);
    assert_eq!(engine.stream(0).unwrap().input_curve().unwrap().variant(), "precomputed");
}

#[test]
fn tone_map_lifecycle() {
    let mut engine = engine();
    let report = engine.build(&single(tone_mapped(1))).unwrap();
    assert!(report.streams[0].color_space);

    let stream = engine.stream(0).unwrap();
    assert!(stream.tone_map_enabled());
    assert!(stream.input_curve().unwrap().is_bypass());
    let tm = stream.tone_map().unwrap();
    assert_eq!(tm.lut_uid, 1);
    assert_eq!(tm.lut.size(), LatticeSize::Size17);
    assert!(tm.gamut.is_identity());

    let report = engine.build(&single(tone_mapped(1))).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.allocations, 0);

    // a new lattice touches nothing but the tone map
    let report = engine.build(&single(tone_mapped(2))).unwrap();
    assert!(!report.is_clean());
    assert!(report.streams[0].tone_map);
    assert!(!report.streams[0].color_space);
    assert!(!report.streams[0].transfer_function);
    assert!(report.allocations > 0);
    assert_eq!(engine.stream(0).unwrap().tone_map().unwrap().lut_uid, 2);

    let report = engine.build(&single(StreamParams::new(ColorDescriptor::hdr10()))).unwrap();
    assert!(report.streams[0].color_space);
    assert!(report.streams[0].transfer_function);
    assert!(report.streams[0].tone_map);
    let stream = engine.stream(0).unwrap();
    assert!(stream.tone_map().is_none());
    let curve = stream.input_curve().unwrap();
    assert_eq!(curve.variant(), "precomputed");
    assert_eq!(curve.tf(), Some(TransferFunction::Pq2084));
}

#[test]
fn bad_lattice_keeps_previous_state() {
    let mut engine = engine();
    engine.build(&single(StreamParams::new(ColorDescriptor::hdr10()))).unwrap();

    let mut broken = tone_mapped(3);
    broken.tone_map.lut_data.truncate(100);
    let err = engine.build(&single(broken)).unwrap_err();
    assert!(matches!(err, ColorError::Lut(_)));
    assert_eq!(err.status(), Status::Unsupported);
    assert!(!engine.stream(0).unwrap().tone_map_enabled());
}

#[test]
fn unsupported_configurations() {
    let mut engine = engine();

    let nothing = ColorDescriptor::new(ColorPrimaries::Bt601, TransferCurve::Hlg, ColorRange::Full, PixelEncoding::Rgb);
    let err = engine.build(&single(StreamParams::new(nothing))).unwrap_err();
    assert!(matches!(err, ColorError::UnsupportedDescriptor(_)));
    assert_eq!(err.status(), Status::Unsupported);

    let no_matrix =
        ColorDescriptor::new(ColorPrimaries::Bt601, TransferCurve::Srgb, ColorRange::Full, PixelEncoding::Rgb);
    let err = engine.build(&single(StreamParams::new(no_matrix))).unwrap_err();
    assert!(matches!(err, ColorError::UnsupportedColorSpace(ColorSpace::Unknown)));

    let err = engine.build(&BuildParams::new(OutputParams::new(no_matrix))).unwrap_err();
    assert!(matches!(err, ColorError::UnsupportedOutput(ColorSpace::Unknown)));

    let pq_709 = ColorDescriptor::new(ColorPrimaries::Bt709, TransferCurve::Pq, ColorRange::Full, PixelEncoding::Rgb);
    let err = engine.build(&BuildParams::new(OutputParams::new(pq_709))).unwrap_err();
    assert!(matches!(
        err,
        ColorError::Transfer(TransferError::Unsupported(TransferFunction::Unknown))
    ));

    assert!(engine.output().is_none());
}

#[test]
fn removed_streams_drop_state() {
    let mut engine = engine();
    let two = single(StreamParams::new(video())).with_stream(StreamParams::new(ColorDescriptor::srgb()));
    let report = engine.build(&two).unwrap();
    assert_eq!(report.streams.len(), 2);
    assert_eq!(engine.streams().len(), 2);

    let report = engine.build(&single(StreamParams::new(video()))).unwrap();
    assert_eq!(report.streams.len(), 1);
    assert!(!report.streams[0].any());
    assert_eq!(engine.streams().len(), 1);
    assert!(engine.stream(1).is_none());

    // re-added stream starts from scratch
    let report = engine.build(&two).unwrap();
    assert!(report.streams[1].color_space);
    assert!(report.streams[1].transfer_function);
}

#[test]
fn hdr_stream_on_sdr_output_gain() {
    let mut engine = engine();
    let params = single(StreamParams {
        hdr: HdrMetadata {
            max_mastering: 1000,
            ..Default::default()
        },
        ..StreamParams::new(ColorDescriptor::hdr10())
    });
    engine.build(&params).unwrap();
    let stream = engine.stream(0).unwrap();
    assert_eq!(stream.white_point_gain(), Fixed31_32::from_int(10));
    let gamut = stream.gamut().unwrap();
    assert_eq!(gamut.from(), ColorPrimaries::Bt2020);
    assert_eq!(gamut.to(), ColorPrimaries::Bt709);
}

#[test]
fn normalized_pq_output_tracks_peak() {
    let mut engine = engine();
    let out = ColorDescriptor::new(
        ColorPrimaries::Bt2020,
        TransferCurve::PqNormalized,
        ColorRange::Full,
        PixelEncoding::Rgb,
    );
    let mut params = BuildParams::new(OutputParams {
        descriptor: out,
        hdr: HdrMetadata {
            max_mastering: 1000,
            ..Default::default()
        },
        pixel_depth: PixelDepth::Bits10,
    });
    engine.build(&params).unwrap();
    assert!(!engine.build(&params).unwrap().output.transfer_function);

    params.output.hdr.max_mastering = 4000;
    let report = engine.build(&params).unwrap();
    assert!(report.output.transfer_function);
    assert!(!report.output.color_space);
    assert!(matches!(
        engine.output().unwrap().regamma(),
        Some(TransferFunctionCurve::DistributedPoints { .. })
    ));
}

#[test]
fn pixel_depth_change() {
    let mut engine = engine();
    engine.build(&single(StreamParams::new(video()))).unwrap();
    let deep = single(StreamParams {
        pixel_depth: PixelDepth::Bits10,
        ..StreamParams::new(video())
    });
    let report = engine.build(&deep).unwrap();
    assert!(report.streams[0].color_space);
    assert!(!engine.stream(0).unwrap().bias_scale().unwrap().is_identity());
}

#[test]
fn tone_mapped_matrix_rescale_reaches_shaper() {
    let mut engine = engine();
    let pq_video =
        ColorDescriptor::new(ColorPrimaries::Bt2020, TransferCurve::Pq, ColorRange::Studio, PixelEncoding::YCbCr);
    let plain = StreamParams {
        descriptor: pq_video,
        ..tone_mapped(1)
    };
    engine.build(&single(plain.clone())).unwrap();
    let before = engine.stream(0).unwrap().tone_map().unwrap().clone();
    assert_eq!(before.matrix_scale, 1);

    let strong = StreamParams {
        adjustments: ColorAdjustments {
            contrast: 2.0,
            saturation: 3.0,
            ..Default::default()
        },
        ..plain
    };
    let report = engine.build(&single(strong)).unwrap();
    assert!(report.streams[0].color_space);
    assert!(report.streams[0].tone_map);

    let stream = engine.stream(0).unwrap();
    let scale = stream.matrix_scale();
    assert!(scale > 1);
    assert!(stream.input_curve().unwrap().is_bypass());
    let tm = stream.tone_map().unwrap();
    assert_eq!(tm.matrix_scale, scale);
    assert_eq!(tm.hdr_multiplier, before.hdr_multiplier);
    assert_ne!(tm.shaper, before.shaper);
    let expected = build_shaper(
        TransferFunction::Pq2084,
        tm.shaper.tf().unwrap(),
        EngineConfig::default().shaper_exp_max,
        engine.tables().regamma_grid(),
        &CurveParams {
            input_scale: scale as f64,
            peak_nits: tm.peak_nits,
        },
        &SystemAllocator,
    )
    .unwrap();
    assert_eq!(tm.shaper.points().unwrap(), &expected);
}

#[test]
fn output_range_change_dirties_streams() {
    let mut engine = engine();
    let params = single(StreamParams::new(video()));
    engine.build(&params).unwrap();
    let before = engine.stream(0).unwrap().csc().unwrap().raw();

    let studio_rgb =
        ColorDescriptor::new(ColorPrimaries::Bt709, TransferCurve::Srgb, ColorRange::Studio, PixelEncoding::Rgb);
    let limited = BuildParams {
        output: OutputParams::new(studio_rgb),
        ..params
    };
    let report = engine.build(&limited).unwrap();
    assert!(report.output.color_space);
    assert!(!report.output.transfer_function);
    assert!(report.streams[0].color_space);
    assert!(!report.streams[0].transfer_function);
    assert!(!report.streams[0].tone_map);
    assert_ne!(engine.stream(0).unwrap().csc().unwrap().raw(), before);
    assert!(engine.output().unwrap().csc().unwrap().is_bypass());
}

#[test]
fn ycbcr_output() {
    let mut engine = engine();
    let mut params = BuildParams::new(OutputParams::new(video())).with_stream(StreamParams::new(ColorDescriptor::srgb()));
    let report = engine.build(&params).unwrap();
    assert!(report.output.color_space);

    // the stream lands in full-range RGB, the output CSC encodes studio Y'CbCr
    let stream = engine.stream(0).unwrap();
    assert_eq!(&stream.csc().unwrap().raw(), base_registers(ColorSpace::Srgb).unwrap());
    let output = engine.output().unwrap();
    assert_eq!(output.color_space(), ColorSpace::Ycbcr709Limited);
    let ocsc = output.csc().unwrap();
    assert!(!ocsc.is_bypass());
    let white = ocsc.to_mat3x4().apply([1.0, 1.0, 1.0]);
    assert!((white[0] - 235.0 / 255.0).abs() < 1e-3);
    assert!((white[1] - 0.5).abs() < 1e-3);
    assert_eq!(ocsc.clamp().unwrap().max, [235, 240, 240]);

    // depth only moves the clamp
    params.output.pixel_depth = PixelDepth::Bits10;
    let report = engine.build(&params).unwrap();
    assert!(report.output.color_space);
    assert!(!report.streams[0].any());
    assert_eq!(engine.output().unwrap().csc().unwrap().clamp().unwrap().max, [940, 960, 960]);
}

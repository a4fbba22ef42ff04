//! # vpe-color
//!
//! Color pipeline parameter engine.
//!
//! Given per-stream and output color descriptors, this crate derives every
//! parameter the video-processing color pipeline needs and keeps it cached
//! between builds:
//!
//! - **Classification** - descriptor to internal color space / transfer function
//! - **CSC** - 3x4 S2.13 matrix with brightness, contrast, hue and saturation
//! - **Curves** - stream degamma and output regamma
//! - **Bias/scale** - bit-depth range normalization ahead of the CSC
//! - **Gamut remap** - stream primaries to output primaries
//! - **Output CSC** - R'G'B' to Y'CbCr for Y'CbCr outputs, plus the denorm clamp
//! - **White-point gain** - SDR/HDR nominal white scaling
//! - **Tone mapping** - shaper, blend, HDR multiplier and 3D LUT
//!
//! # Architecture
//!
//! ```text
//!                    vpe-color
//!                        |
//!     +------------------+------------------+
//!     |                  |                  |
//! vpe-transfer    vpe-primaries        vpe-lut
//!     |                  |                  |
//!     +--------+---------+                  |
//!              |                            |
//!          vpe-math                         |
//!              |                            |
//!              +----------------------------+
//!                          |
//!                      vpe-core
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use vpe_color::{BuildParams, ColorEngine, EngineConfig, OutputParams, StreamParams};
//! use vpe_core::prelude::*;
//!
//! let mut engine = ColorEngine::new(EngineConfig::default()).unwrap();
//!
//! let video = ColorDescriptor::new(
//!     ColorPrimaries::Bt709,
//!     TransferCurve::Bt709,
//!     ColorRange::Studio,
//!     PixelEncoding::YCbCr,
//! );
//! let params = BuildParams::new(OutputParams::new(ColorDescriptor::srgb()))
//!     .with_stream(StreamParams::new(video));
//!
//! let report = engine.build(&params).unwrap();
//! assert!(report.output.transfer_function);
//!
//! let stream = engine.stream(0).unwrap();
//! assert_eq!(stream.color_space(), ColorSpace::Ycbcr709Limited);
//! assert_eq!(stream.csc().unwrap().scale(), 1);
//! ```
//!
//! # Errors
//!
//! Builds return [`ColorResult`]. [`ColorError::status`] collapses an error
//! to the [`Status`] enumeration the register writer understands.
//!
//! # Dependencies
//!
//! - `vpe-core`, `vpe-math`, `vpe-primaries`, `vpe-transfer`, `vpe-lut`
//! - [`serde`] / `serde_yaml` - Config and build requests
//! - [`tracing`] - Rebuild decisions
//! - [`thiserror`] - Error handling
//!
//! # Used By
//!
//! - `vpe-cli` - Command line front end
//! - `vpe-bench` - Benchmarks

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod alloc;
pub mod adjust;
pub mod bias_scale;
pub mod classify;
pub mod config;
pub mod csc;
pub mod engine;
pub mod error;
pub mod gamut;
pub mod output_csc;
pub mod params;
pub mod state;
pub mod tonemap;
pub mod whitepoint;

pub use adjust::{ColorAdjustments, HwAdjustments};
pub use bias_scale::{compute_bias_scale, BiasScale, ChannelBiasScale, PixelDepth};
pub use classify::{classify, Classification};
pub use config::EngineConfig;
pub use csc::{build_csc_matrix, CscMatrix};
pub use engine::{BuildReport, ColorEngine};
pub use error::{ColorError, ColorResult, Status};
pub use gamut::GamutRemap;
pub use output_csc::{build_output_csc, DenormClamp, OutputCsc};
pub use params::{BuildParams, OutputParams, StreamParams};
pub use state::{DirtyFlags, OutputColorState, StreamColorState};
pub use tonemap::{build_tone_map, hdr_multiplier, ToneMapParams, ToneMapState};
pub use whitepoint::white_point_gain;

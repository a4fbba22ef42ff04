//! # vpe-transfer
//!
//! Transfer function evaluation and curve building.
//!
//! Transfer functions convert between linear light and encoded signal.
//! The pipeline needs them sampled: a stream degamma (signal to linear),
//! an output regamma (linear to signal), and for tone mapping a shaper
//! and a blend curve.
//!
//! # Terminology
//!
//! - **Regamma**: linear -> encoded, sampled on a logarithmic grid
//! - **Degamma**: encoded -> linear, sampled on a mostly linear grid
//! - **Shaper**: re-encodes stream data into the 3D LUT input domain
//!
//! # Supported Transfer Functions
//!
//! | Function | Use Case | Linear 1.0 |
//! |----------|----------|------------|
//! | [`power::SRGB`] | Desktop | display white |
//! | [`power::BT709`] | HDTV | display white |
//! | [`power::BT1886`] | Pure 2.4 gamma | display white |
//! | [`pq`] | HDR10 | 10,000 cd/m2 |
//! | [`pq::NormalizedPq`] | HDR relative to content peak | mastering peak |
//! | [`hlg`] | HDR broadcast | 10,000 cd/m2 |
//!
//! # Usage
//!
//! ```rust
//! use vpe_core::{SystemAllocator, TransferFunction};
//! use vpe_transfer::{build_regamma, ColorTables, CurveParams};
//!
//! let tables = ColorTables::new(&SystemAllocator).unwrap();
//! let curve = build_regamma(
//!     TransferFunction::Srgb,
//!     tables.regamma_grid(),
//!     &CurveParams::default(),
//!     &SystemAllocator,
//! )
//! .unwrap();
//! assert_eq!(curve.len(), 514);
//! ```
//!
//! # Dependencies
//!
//! - `vpe-core` - Transfer function tags, allocator
//! - `vpe-math` - Fixed-point storage
//!
//! # Used By
//!
//! - `vpe-color` - Pipeline orchestration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cache;
pub mod curve;
pub mod error;
pub mod grid;
pub mod hlg;
pub mod power;
pub mod pq;
pub mod pwl;
pub mod tables;

pub use cache::{CacheState, PowCache};
pub use curve::{
    build_degamma, build_regamma, build_shaper, shaper_peak_signal, CurveParams, CurvePoints, Evaluator,
    TransferFunctionCurve, MAX_CURVE_POINTS, MAX_DEGAMMA_POINTS,
};
pub use error::{TransferError, TransferResult};
pub use grid::{Grid, GridKind};
pub use pwl::{HardwarePwl, PwlLayout, PwlPoint, PwlRegion};
pub use tables::ColorTables;

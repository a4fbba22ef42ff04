//! # vpe-core
//!
//! Core types for the VPE color pipeline.
//!
//! This crate provides the vocabulary shared by every other crate:
//!
//! - [`ColorDescriptor`] - External description of a surface's color
//!   (primaries, transfer curve, range, encoding, chroma siting)
//! - [`ColorSpace`], [`TransferFunction`] - Closed internal enumerations the
//!   engine operates on
//! - [`HdrMetadata`] - Mastering and content light levels
//! - [`Allocator`] - Fallible allocation injected into every builder that
//!   owns cached storage
//!
//! ## Crate Structure
//!
//! ```text
//! vpe-core (this crate)
//!    ^
//!    |
//!    +-- vpe-math (matrices, fixed point)
//!    +-- vpe-primaries (gamut matrices)
//!    +-- vpe-transfer (curves)
//!    +-- vpe-lut (3D LUT layout)
//!    +-- vpe-color (classifier, CSC, orchestrator)
//! ```
//!
//! All descriptor types derive `serde` so build requests can be described
//! in YAML or JSON.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod alloc;
pub mod descriptor;
pub mod hdr;
pub mod internal;

pub use alloc::{AllocError, Allocator, SystemAllocator};
pub use descriptor::{ChromaSiting, ColorDescriptor, ColorPrimaries, ColorRange, PixelEncoding, TransferCurve};
pub use hdr::{HdrMetadata, HDR_PEAK_WHITE_NITS};
pub use internal::{ColorSpace, TransferFunction};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use vpe_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::descriptor::{
        ChromaSiting, ColorDescriptor, ColorPrimaries, ColorRange, PixelEncoding, TransferCurve,
    };
    pub use crate::hdr::HdrMetadata;
    pub use crate::internal::{ColorSpace, TransferFunction};
}

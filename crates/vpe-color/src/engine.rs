//! Dirty-state orchestrator.
//!
//! [`ColorEngine::build`] classifies every descriptor, compares the result
//! with the cached state and rebuilds only what changed:
//!
//! ```text
//! output cs or depth dirty  -> output CSC, denorm clamp
//! output tf dirty           -> output regamma
//! stream or output cs dirty -> CSC, gamut remap
//! stream cs dirty           -> bias/scale
//! CSC scale changed         -> stream tf dirty, tone map pending
//! stream tf dirty           -> input curve (bypass under tone mapping)
//! tone map pending          -> shaper, blend, multiplier, LUT gamut, lattice
//! ```
//!
//! Color-space dirtiness covers the color space itself, the adjustments,
//! the pixel depth and the tone-map switch. The reported stream flags also
//! mark a CSC or gamut rebuilt because of the output, and a rebuilt or
//! dropped tone map.
//!
//! A build stages every new structure first and commits only once the
//! whole request has succeeded, so an error leaves the previous state
//! untouched.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace, warn};
use vpe_core::{Allocator, HdrMetadata, SystemAllocator, TransferFunction};
use vpe_math::Fixed31_32;
use vpe_transfer::{
    build_degamma, build_regamma, ColorTables, CurveParams, HardwarePwl, PwlLayout, TransferFunctionCurve,
};

use crate::adjust::ColorAdjustments;
use crate::alloc::Tracked;
use crate::bias_scale::{compute_bias_scale, BiasScale, PixelDepth};
use crate::classify::{classify, Classification};
use crate::config::EngineConfig;
use crate::csc::{build_csc_matrix, CscMatrix};
use crate::error::{ColorError, ColorResult};
use crate::gamut::GamutRemap;
use crate::output_csc::{build_output_csc, OutputCsc};
use crate::params::{BuildParams, OutputParams, StreamParams};
use crate::state::{DirtyFlags, OutputColorState, StreamColorState};
use crate::tonemap::{build_tone_map, ToneMapState};
use crate::whitepoint::white_point_gain;

/// Summary of one build call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BuildReport {
    /// Output changes.
    pub output: DirtyFlags,
    /// Per-stream changes, in request order.
    pub streams: Vec<DirtyFlags>,
    /// Cache allocations made by this call.
    pub allocations: usize,
}

impl BuildReport {
    /// True if nothing changed.
    pub fn is_clean(&self) -> bool {
        !self.output.any() && self.streams.iter().all(|f| !f.any())
    }
}

/// Color pipeline parameter engine.
///
/// # Example
///
/// ```rust
/// use vpe_color::{BuildParams, ColorEngine, EngineConfig, OutputParams, StreamParams};
/// use vpe_core::ColorDescriptor;
///
/// let mut engine = ColorEngine::new(EngineConfig::default()).unwrap();
/// let params = BuildParams::new(OutputParams::new(ColorDescriptor::srgb()))
///     .with_stream(StreamParams::new(ColorDescriptor::srgb()));
///
/// let first = engine.build(&params).unwrap();
/// assert!(first.streams[0].transfer_function);
///
/// let second = engine.build(&params).unwrap();
/// assert!(second.is_clean());
/// assert_eq!(second.allocations, 0);
/// ```
#[derive(Debug)]
pub struct ColorEngine<A: Allocator = SystemAllocator> {
    config: EngineConfig,
    tables: Arc<ColorTables>,
    alloc: A,
    streams: Vec<StreamColorState>,
    output: Option<OutputColorState>,
}

impl ColorEngine<SystemAllocator> {
    /// Creates an engine on the global heap.
    pub fn new(config: EngineConfig) -> ColorResult<Self> {
        Self::with_allocator(config, SystemAllocator)
    }
}

impl<A: Allocator> ColorEngine<A> {
    /// Creates an engine drawing every cache structure from `alloc`.
    pub fn with_allocator(config: EngineConfig, alloc: A) -> ColorResult<Self> {
        let tables = ColorTables::new(&alloc)?;
        Self::with_tables(config, Arc::new(tables), alloc)
    }

    /// Creates an engine sharing already built tables.
    pub fn with_tables(config: EngineConfig, tables: Arc<ColorTables>, alloc: A) -> ColorResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tables,
            alloc,
            streams: Vec::new(),
            output: None,
        })
    }

    /// Engine settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared grids and tables.
    pub fn tables(&self) -> &Arc<ColorTables> {
        &self.tables
    }

    /// Injected allocator.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Cached state of stream `index`.
    pub fn stream(&self, index: usize) -> Option<&StreamColorState> {
        self.streams.get(index)
    }

    /// Cached state of every stream.
    pub fn streams(&self) -> &[StreamColorState] {
        &self.streams
    }

    /// Cached output state, `None` before the first successful build.
    pub fn output(&self) -> Option<&OutputColorState> {
        self.output.as_ref()
    }

    /// Drops all cached state; the next build starts from scratch.
    pub fn reset(&mut self) {
        self.streams.clear();
        self.output = None;
    }

    /// Brings the cached state in line with `params`.
    ///
    /// On error nothing is committed.
    pub fn build(&mut self, params: &BuildParams) -> ColorResult<BuildReport> {
        let alloc = Tracked::new(&self.alloc);
        trace!(streams = params.streams.len(), "build");

        let output = self.stage_output(&params.output, &alloc)?;
        let mut streams = Vec::with_capacity(params.streams.len());
        for (index, stream) in params.streams.iter().enumerate() {
            streams.push(self.stage_stream(index, stream, &output, &alloc)?);
        }
        let allocations = alloc.count();
        Ok(self.commit(output, streams, allocations))
    }

    fn stage_output<T: Allocator>(&self, params: &OutputParams, alloc: &T) -> ColorResult<OutputUpdate> {
        let classification = classify(&params.descriptor);
        if classification.is_fully_unknown() {
            return Err(ColorError::UnsupportedDescriptor(params.descriptor));
        }
        let cs = classification.color_space;
        let tf = classification.transfer_function;

        let prev = self.output.as_ref();
        let peak_changed = prev.is_some_and(|o| o.hdr.peak_nits() != params.hdr.peak_nits());
        let cs_changed = prev.is_none_or(|o| o.classification.color_space != cs);
        let mut dirty = DirtyFlags {
            color_space: cs_changed,
            transfer_function: prev.is_none_or(|o| o.classification.transfer_function != tf || o.regamma.is_none())
                || (tf == TransferFunction::NormalizedPq && peak_changed),
            tone_map: false,
        };

        let csc = if cs_changed || prev.is_none_or(|o| o.pixel_depth != params.pixel_depth || o.csc.is_none()) {
            let csc = build_output_csc(cs, params.pixel_depth, self.config.matrix_int_bits)?;
            Some(alloc.try_box(csc)?)
        } else {
            None
        };
        dirty.color_space |= csc.is_some();

        let regamma = if dirty.transfer_function {
            Some(self.build_output_curve(tf, &params.hdr, alloc)?)
        } else {
            None
        };
        if dirty.any() {
            debug!(%cs, %tf, cs_dirty = dirty.color_space, tf_dirty = dirty.transfer_function, "output dirty");
        }
        Ok(OutputUpdate {
            classification,
            hdr: params.hdr,
            pixel_depth: params.pixel_depth,
            regamma,
            csc,
            cs_changed,
            dirty,
        })
    }

    fn build_output_curve<T: Allocator>(
        &self,
        tf: TransferFunction,
        hdr: &HdrMetadata,
        alloc: &T,
    ) -> ColorResult<TransferFunctionCurve> {
        let grid = self.tables.regamma_grid();
        let params = CurveParams {
            input_scale: 1.0,
            peak_nits: hdr.peak_nits(),
        };
        let points = build_regamma(tf, grid, &params, alloc)?;
        if self.config.output_pwl {
            let pwl = HardwarePwl::from_points(&points, grid, &PwlLayout::default())?;
            return Ok(TransferFunctionCurve::HardwarePwl(pwl));
        }
        Ok(TransferFunctionCurve::DistributedPoints { tf, points })
    }

    fn stage_stream<T: Allocator>(
        &self,
        index: usize,
        params: &StreamParams,
        output: &OutputUpdate,
        alloc: &T,
    ) -> ColorResult<StreamUpdate> {
        let classification = classify(&params.descriptor);
        if classification.is_fully_unknown() {
            return Err(ColorError::UnsupportedDescriptor(params.descriptor));
        }
        let cs = classification.color_space;
        let tf = classification.transfer_function;
        let tm = &params.tone_map;
        let out_cs = output.classification.color_space;
        let prev = self.streams.get(index);

        let tf_changed = prev.is_some_and(|s| s.classification.transfer_function != tf);
        let peak_changed = prev.is_some_and(|s| s.hdr.peak_nits() != params.hdr.peak_nits());
        let mut dirty = DirtyFlags {
            color_space: prev.is_none_or(|s| {
                s.classification.color_space != cs
                    || s.adjustments != params.adjustments
                    || s.tone_map_enabled != tm.enabled
                    || s.pixel_depth != params.pixel_depth
                    || s.csc.is_none()
            }),
            transfer_function: prev.is_none_or(|s| s.tone_map_enabled != tm.enabled || s.input_curve.is_none())
                || tf_changed
                || (tf == TransferFunction::NormalizedPq && peak_changed),
            tone_map: false,
        };

        let rebuild_matrix = dirty.color_space || output.cs_changed;
        let csc = if rebuild_matrix {
            let output_limited = out_cs.is_limited() && out_cs.is_rgb();
            let matrix = build_csc_matrix(cs, &params.adjustments, output_limited, self.config.matrix_int_bits)?;
            let old_scale = prev.map_or(1, StreamColorState::matrix_scale);
            if matrix.scale() != old_scale {
                debug!(stream = index, old_scale, new_scale = matrix.scale(), "matrix scale changed");
                dirty.transfer_function = true;
            }
            Some(alloc.try_box(matrix)?)
        } else {
            None
        };
        let scale = match &csc {
            Some(m) => m.scale(),
            None => prev.map_or(1, StreamColorState::matrix_scale),
        };

        let input_curve = if dirty.transfer_function {
            Some(self.build_input_curve(index, tf, tm.enabled, scale, &params.hdr, alloc)?)
        } else {
            None
        };

        let bias_scale = if dirty.color_space || prev.is_none_or(|s| s.bias_scale.is_none()) {
            Some(alloc.try_box(compute_bias_scale(cs, params.pixel_depth))?)
        } else {
            None
        };

        let gamut = if rebuild_matrix || prev.is_none_or(|s| s.gamut.is_none()) {
            let from = cs.primaries().ok_or(ColorError::UnsupportedColorSpace(cs))?;
            let to = out_cs.primaries().ok_or(ColorError::UnsupportedOutput(out_cs))?;
            Some(alloc.try_box(GamutRemap::new(from, to))?)
        } else {
            None
        };

        let tone_map = if tm.enabled {
            let peak = tm.peak_nits(&params.hdr);
            let pending = match prev.and_then(|s| s.tone_map.as_deref()) {
                Some(state) => !state.matches(tm, peak, scale) || tf_changed || output.cs_changed,
                None => true,
            };
            if pending {
                let to = out_cs.primaries().ok_or(ColorError::UnsupportedOutput(out_cs))?;
                let state = build_tone_map(
                    tm,
                    tf,
                    &params.hdr,
                    scale,
                    to,
                    self.config.shaper_exp_max,
                    &self.tables,
                    alloc,
                )?;
                Staged::Replace(alloc.try_box(state)?)
            } else {
                Staged::Keep
            }
        } else if prev.is_some_and(|s| s.tone_map.is_some()) {
            Staged::Clear
        } else {
            Staged::Keep
        };

        let gain = white_point_gain(cs, tf, output.classification.transfer_function, &params.hdr);

        dirty.color_space |= csc.is_some() || gamut.is_some();
        dirty.tone_map = !matches!(tone_map, Staged::Keep);

        if dirty.any() {
            debug!(
                stream = index,
                %cs,
                %tf,
                cs_dirty = dirty.color_space,
                tf_dirty = dirty.transfer_function,
                tm_dirty = dirty.tone_map,
                scale,
                "stream dirty"
            );
        }
        Ok(StreamUpdate {
            classification,
            adjustments: params.adjustments,
            pixel_depth: params.pixel_depth,
            hdr: params.hdr,
            tone_map_enabled: tm.enabled,
            csc,
            input_curve,
            bias_scale,
            gamut,
            tone_map,
            white_point_gain: gain,
            dirty,
        })
    }

    fn build_input_curve<T: Allocator>(
        &self,
        index: usize,
        tf: TransferFunction,
        tone_mapped: bool,
        scale: u32,
        hdr: &HdrMetadata,
        alloc: &T,
    ) -> ColorResult<TransferFunctionCurve> {
        if tone_mapped {
            return Ok(TransferFunctionCurve::Bypass);
        }
        if tf == TransferFunction::Unknown {
            warn!(stream = index, "unknown transfer function, input curve bypassed");
            return Ok(TransferFunctionCurve::Bypass);
        }
        if self.config.use_precomputed_tables && scale == 1 {
            if let Some(points) = self.tables.degamma(tf) {
                trace!(stream = index, %tf, "using precomputed degamma");
                return Ok(TransferFunctionCurve::PrecomputedTable { tf, points });
            }
        }
        let params = CurveParams {
            input_scale: scale as f64,
            peak_nits: hdr.peak_nits(),
        };
        let points = build_degamma(tf, self.tables.degamma_grid(), &params, alloc)?;
        Ok(TransferFunctionCurve::DistributedPoints { tf, points })
    }

    fn commit(&mut self, output: OutputUpdate, streams: Vec<StreamUpdate>, allocations: usize) -> BuildReport {
        let out = self.output.get_or_insert_with(OutputColorState::default);
        out.classification = output.classification;
        out.hdr = output.hdr;
        out.pixel_depth = output.pixel_depth;
        replace(&mut out.regamma, output.regamma);
        replace(&mut out.csc, output.csc);
        out.dirty = output.dirty;
        let output_flags = out.dirty;

        if streams.len() < self.streams.len() {
            debug!(from = self.streams.len(), to = streams.len(), "dropping stream state");
        }
        self.streams.truncate(streams.len());
        let mut flags = Vec::with_capacity(streams.len());
        for (index, update) in streams.into_iter().enumerate() {
            if index == self.streams.len() {
                self.streams.push(StreamColorState::default());
            }
            let state = &mut self.streams[index];
            update.apply(state);
            flags.push(state.dirty);
        }

        BuildReport {
            output: output_flags,
            streams: flags,
            allocations,
        }
    }
}

/// Replacement of an optional cached structure.
#[derive(Debug)]
enum Staged<T> {
    Keep,
    Replace(T),
    Clear,
}

#[derive(Debug)]
struct OutputUpdate {
    classification: Classification,
    hdr: HdrMetadata,
    pixel_depth: PixelDepth,
    regamma: Option<TransferFunctionCurve>,
    csc: Option<Box<OutputCsc>>,
    // stream CSC, gamut and tone map depend on the color space only
    cs_changed: bool,
    dirty: DirtyFlags,
}

/// New values for one stream; `None` keeps the cached structure.
#[derive(Debug)]
struct StreamUpdate {
    classification: Classification,
    adjustments: ColorAdjustments,
    pixel_depth: PixelDepth,
    hdr: HdrMetadata,
    tone_map_enabled: bool,
    csc: Option<Box<CscMatrix>>,
    input_curve: Option<TransferFunctionCurve>,
    bias_scale: Option<Box<BiasScale>>,
    gamut: Option<Box<GamutRemap>>,
    tone_map: Staged<Box<ToneMapState>>,
    white_point_gain: Fixed31_32,
    dirty: DirtyFlags,
}

impl StreamUpdate {
    fn apply(self, state: &mut StreamColorState) {
        state.classification = self.classification;
        state.adjustments = self.adjustments;
        state.pixel_depth = self.pixel_depth;
        state.hdr = self.hdr;
        state.tone_map_enabled = self.tone_map_enabled;
        replace(&mut state.csc, self.csc);
        replace(&mut state.input_curve, self.input_curve);
        replace(&mut state.bias_scale, self.bias_scale);
        replace(&mut state.gamut, self.gamut);
        match self.tone_map {
            Staged::Keep => {}
            Staged::Replace(t) => state.tone_map = Some(t),
            Staged::Clear => state.tone_map = None,
        }
        state.white_point_gain = self.white_point_gain;
        state.dirty = self.dirty;
    }
}

fn replace<T>(slot: &mut Option<T>, new: Option<T>) {
    if let Some(v) = new {
        *slot = Some(v);
    }
}

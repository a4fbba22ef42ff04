//! Transfer curve sampling command

use crate::{CurveArgs, CurveKind};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::debug;
use vpe_core::{SystemAllocator, TransferFunction};
use vpe_transfer::{build_degamma, build_regamma, CurveParams, CurvePoints, Grid};

#[derive(Serialize)]
struct Sample {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct CurveOutput {
    transfer_function: TransferFunction,
    kind: &'static str,
    scale: u32,
    samples: Vec<Sample>,
}

pub fn run(args: CurveArgs, verbose: u8) -> Result<()> {
    let tf = args.tf;
    if !args.scale.is_power_of_two() {
        bail!("Scale must be a power of two: {}", args.scale);
    }
    let params = CurveParams {
        input_scale: args.scale as f64,
        peak_nits: args.peak,
    };
    let (kind, grid) = match args.kind {
        CurveKind::Regamma => ("regamma", Grid::regamma()),
        CurveKind::Degamma => ("degamma", Grid::degamma()),
    };
    debug!(%tf, kind, scale = args.scale, "sampling curve");

    let points = sample(tf, args.kind, &grid, &params)?;
    let samples: Vec<Sample> = grid
        .points()
        .iter()
        .zip(points.red())
        .map(|(&x, y)| Sample { x, y: y.to_f64() })
        .collect();

    if args.json {
        let out = CurveOutput {
            transfer_function: tf,
            kind,
            scale: args.scale,
            samples,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if verbose > 0 {
        println!("{tf} {kind}, {} points, scale {}", samples.len(), args.scale);
    }
    for (i, s) in samples.iter().enumerate() {
        println!("{i:4} {:.10e} {:.10}", s.x, s.y);
    }
    Ok(())
}

fn sample(tf: TransferFunction, kind: CurveKind, grid: &Grid, params: &CurveParams) -> Result<CurvePoints> {
    let points = match kind {
        CurveKind::Regamma => build_regamma(tf, grid, params, &SystemAllocator),
        CurveKind::Degamma => build_degamma(tf, grid, params, &SystemAllocator),
    };
    points.with_context(|| format!("Failed to build {tf} curve"))
}

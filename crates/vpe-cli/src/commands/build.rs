//! Engine build command

use crate::BuildArgs;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;
use vpe_color::{BuildParams, BuildReport, ColorEngine, EngineConfig, Status, StreamColorState};

use super::load_yaml;

#[derive(Serialize)]
struct StreamSummary {
    color_space: String,
    transfer_function: String,
    csc: Option<[i16; 12]>,
    matrix_scale: u32,
    input_curve: Option<&'static str>,
    white_point_gain: f64,
    tone_mapped: bool,
}

impl StreamSummary {
    fn new(s: &StreamColorState) -> Self {
        Self {
            color_space: s.color_space().to_string(),
            transfer_function: s.transfer_function().to_string(),
            csc: s.csc().map(|m| m.raw()),
            matrix_scale: s.matrix_scale(),
            input_curve: s.input_curve().map(|c| c.variant()),
            white_point_gain: s.white_point_gain().to_f64(),
            tone_mapped: s.tone_map().is_some(),
        }
    }
}

#[derive(Serialize)]
struct BuildOutput {
    status: Status,
    report: BuildReport,
    output_curve: Option<&'static str>,
    output_csc: Option<[i16; 12]>,
    streams: Vec<StreamSummary>,
}

/// Loads the engine config, defaulting when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let config: EngineConfig = load_yaml(path)?;
    config.validate().with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

/// Runs one build of `params` on a fresh engine.
pub fn build_once(params: &BuildParams, config: EngineConfig) -> Result<(ColorEngine, BuildReport)> {
    let mut engine = ColorEngine::new(config).context("Failed to create engine")?;
    let report = engine.build(params).context("Build failed")?;
    Ok((engine, report))
}

pub fn run(args: BuildArgs, verbose: u8) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let params: BuildParams = load_yaml(&args.params)?;
    info!(streams = params.streams.len(), "building");

    let (engine, report) = build_once(&params, config)?;
    let out = BuildOutput {
        status: Status::Ok,
        output_curve: engine.output().and_then(|o| o.regamma()).map(|c| c.variant()),
        output_csc: engine.output().and_then(|o| o.csc()).and_then(|c| c.raw()),
        streams: engine.streams().iter().map(StreamSummary::new).collect(),
        report,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Output curve: {}", out.output_curve.unwrap_or("none"));
    if let Some(csc) = out.output_csc {
        println!("Output CSC: {csc:?}");
    }
    for (i, s) in out.streams.iter().enumerate() {
        println!("Stream {i}: {} / {}", s.color_space, s.transfer_function);
        if let Some(csc) = s.csc {
            println!("  CSC:   {csc:?} (scale {})", s.matrix_scale);
        }
        println!("  Input: {}", s.input_curve.unwrap_or("none"));
        println!("  Gain:  {:.6}", s.white_point_gain);
        if s.tone_mapped {
            println!("  Tone mapped");
        }
    }
    if verbose > 0 {
        println!("Allocations: {}", out.report.allocations);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const REQUEST: &str = r#"
output:
  descriptor: { primaries: bt709, transfer: srgb }
streams:
  - descriptor: { primaries: bt709, transfer: bt709, range: studio, encoding: ycbcr }
  - descriptor: { primaries: bt2020, transfer: pq }
    hdr: { max_mastering: 1000 }
"#;

    #[test]
    fn test_build_from_files() {
        let dir = tempdir().unwrap();
        let params_path = dir.path().join("request.yaml");
        let config_path = dir.path().join("engine.yaml");
        fs::write(&params_path, REQUEST).unwrap();
        fs::write(&config_path, "use_precomputed_tables: false\n").unwrap();

        let config = load_config(Some(&config_path)).unwrap();
        assert!(!config.use_precomputed_tables);
        let params: BuildParams = load_yaml(&params_path).unwrap();
        let (engine, report) = build_once(&params, config).unwrap();

        assert_eq!(report.streams.len(), 2);
        let hdr = StreamSummary::new(engine.stream(1).unwrap());
        assert_eq!(hdr.white_point_gain, 10.0);
        assert_eq!(hdr.input_curve, Some("distributed"));
    }

    #[test]
    fn test_ycbcr_output_request() {
        let yaml = r#"
output:
  descriptor: { primaries: bt2020, transfer: pq, range: studio, encoding: ycbcr }
  pixel_depth: bits10
streams:
  - descriptor: { primaries: bt709, transfer: srgb }
"#;
        let params: BuildParams = serde_yaml::from_str(yaml).unwrap();
        let (engine, _) = build_once(&params, EngineConfig::default()).unwrap();
        let output = engine.output().unwrap();
        assert!(output.csc().unwrap().raw().is_some());
        assert_eq!(output.csc().unwrap().clamp().unwrap().min, [64; 3]);
    }

    #[test]
    fn test_bad_config_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        fs::write(&path, "matrix_int_bits: 5\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
        assert!(load_config(Some(&dir.path().join("missing.yaml"))).is_err());
    }
}

//! vpe - color pipeline parameter tool
//!
//! Classifies descriptors, samples transfer curves and runs engine builds
//! from YAML requests.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vpe_core::{ColorPrimaries, ColorRange, PixelEncoding, TransferCurve, TransferFunction};

mod commands;

#[derive(Parser)]
#[command(name = "vpe")]
#[command(author, version, about = "Color pipeline parameter tool")]
#[command(long_about = "
Derives CSC matrices, transfer curves and tone-mapping state for the
video-processing color pipeline.

Examples:
  vpe classify -p bt709 -t bt709 -r studio -e ycbcr
  vpe curve --tf srgb --kind regamma
  vpe curve --tf bt709 --kind degamma --scale 2 --json
  vpe build --params request.yaml --config engine.yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a color descriptor
    #[command(visible_alias = "c")]
    Classify(ClassifyArgs),

    /// Sample a transfer curve
    Curve(CurveArgs),

    /// Run a build request
    #[command(visible_alias = "b")]
    Build(BuildArgs),
}

#[derive(Args)]
struct ClassifyArgs {
    /// Primaries
    #[arg(short, long, value_enum)]
    primaries: ColorPrimaries,

    /// Transfer curve
    #[arg(short, long, value_enum)]
    transfer: TransferCurve,

    /// Range
    #[arg(short, long, value_enum, default_value_t = ColorRange::Full)]
    range: ColorRange,

    /// Encoding
    #[arg(short, long, value_enum, default_value_t = PixelEncoding::Rgb)]
    encoding: PixelEncoding,

    /// Print JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CurveKind {
    /// Linear to signal on the regamma grid
    Regamma,
    /// Signal to linear on the degamma grid
    Degamma,
}

#[derive(Args)]
struct CurveArgs {
    /// Internal transfer function
    #[arg(long, value_enum)]
    tf: TransferFunction,

    /// Curve direction
    #[arg(short, long, value_enum, default_value = "regamma")]
    kind: CurveKind,

    /// Power-of-two input scale
    #[arg(short, long, default_value = "1")]
    scale: u32,

    /// Peak luminance for normalized PQ (0 = 10000)
    #[arg(long, default_value = "0")]
    peak: u32,

    /// Print JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct BuildArgs {
    /// Build request (YAML)
    #[arg(short, long)]
    params: PathBuf,

    /// Engine config (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => tracing::level_filters::LevelFilter::WARN,
        1 => tracing::level_filters::LevelFilter::DEBUG,
        2.. => tracing::level_filters::LevelFilter::TRACE,
    };
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Classify(args) => commands::classify::run(args, cli.verbose),
        Commands::Curve(args) => commands::curve::run(args, cli.verbose),
        Commands::Build(args) => commands::build::run(args, cli.verbose),
    }
}

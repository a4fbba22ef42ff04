//! Descriptor classification command

use crate::ClassifyArgs;
use anyhow::Result;
use serde::Serialize;
use tracing::debug;
use vpe_color::classify;
use vpe_core::{ColorDescriptor, ColorSpace, TransferFunction};

#[derive(Serialize)]
struct ClassifyOutput {
    descriptor: ColorDescriptor,
    color_space: ColorSpace,
    transfer_function: TransferFunction,
    supported: bool,
}

pub fn run(args: ClassifyArgs, verbose: u8) -> Result<()> {
    let descriptor = ColorDescriptor::new(args.primaries, args.transfer, args.range, args.encoding);
    debug!(%descriptor, "classify");
    let c = classify(&descriptor);

    if args.json {
        let out = ClassifyOutput {
            descriptor,
            color_space: c.color_space,
            transfer_function: c.transfer_function,
            supported: c.is_supported(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if verbose > 0 {
        println!("Descriptor: {descriptor}");
    }
    println!("Color space:       {}", c.color_space);
    println!("Transfer function: {}", c.transfer_function);
    if c.is_fully_unknown() {
        println!("Unsupported descriptor");
    } else if !c.is_supported() {
        println!("Partially supported");
    }
    Ok(())
}

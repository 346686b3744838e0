//! Print a chunk's frame header fields and sidecar descriptor without
//! decoding the payload.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use unblosc_core::format::compressor_name;
use unblosc_core::{BloscHeader, ChunkDescriptor};

#[derive(Parser)]
#[command(
    name = "unblosc-inspect",
    about = "Print the frame header and sidecar descriptor of a compressed chunk",
    version
)]
struct Cli {
    /// Compressed chunk file
    chunk: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let src =
        fs::read(&cli.chunk).with_context(|| format!("reading chunk file {:?}", cli.chunk))?;
    let (header, nbytes) = BloscHeader::validate(&src)?;

    println!("=== chunk {:?} ===", cli.chunk);
    println!();
    println!("  format version : {}", header.version);
    println!(
        "  compressor     : {} (code {})",
        compressor_name(header.compressor()),
        header.compressor()
    );
    println!("  shuffle        : {}", header.shuffle().name());
    println!("  typesize       : {}", header.typesize);
    println!("  verbatim       : {}", header.is_memcpy());
    println!("  nbytes         : {nbytes}");
    println!("  blocksize      : {}", header.blocksize);
    println!("  cbytes         : {}", header.cbytes);
    if !header.is_memcpy() && header.blocksize > 0 {
        println!(
            "  blocks         : {}",
            (nbytes as u64).div_ceil(header.blocksize as u64)
        );
    }

    match ChunkDescriptor::for_chunk(&cli.chunk) {
        Ok(descriptor) => {
            println!();
            println!(
                "  chunk shape    : {} x {}",
                descriptor.shape[0], descriptor.shape[1]
            );
            println!("  dtype          : {}", descriptor.element_type.name());
            println!("  samples        : {}", descriptor.sample_count());
        }
        Err(e) => eprintln!("warning: no usable sidecar descriptor: {e}"),
    }
    Ok(())
}

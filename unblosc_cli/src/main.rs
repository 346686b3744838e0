use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use unblosc_codecs::codec_by_id;
use unblosc_core::{decode_frame, samples, BloscHeader, ChunkDescriptor};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "unblosc",
    about = "Decompress one blosc-framed zarr chunk and dump or rescale its samples",
    version
)]
struct Cli {
    /// Compressed chunk file; its directory must hold a `.zarray` descriptor
    input: PathBuf,

    /// Destination for rescaled single-byte samples
    /// (statistics dump to stdout when omitted)
    #[arg(requires = "scale")]
    output: Option<PathBuf>,

    /// Scale factor applied to every sample before narrowing to a byte
    #[arg(requires = "output")]
    scale: Option<f32>,
}

// ── Run ────────────────────────────────────────────────────────────────────

fn run(cli: Cli) -> anyhow::Result<()> {
    // The descriptor is validated before any decode work happens; a chunk
    // with an unusable sidecar never reaches the frame decoder.
    let descriptor = ChunkDescriptor::for_chunk(&cli.input)
        .with_context(|| format!("reading sidecar descriptor for {:?}", cli.input))?;

    let src =
        fs::read(&cli.input).with_context(|| format!("reading chunk file {:?}", cli.input))?;

    // Two-step open: peek at the header, then resolve the compressor it
    // names. Verbatim frames need no codec at all.
    let header = BloscHeader::from_bytes(&src)?;
    let codec = if header.is_memcpy() {
        None
    } else {
        Some(codec_by_id(header.compressor())?)
    };

    let t0 = Instant::now();
    let raw = decode_frame(&src, codec.as_deref())?;
    eprintln!(
        "decompressed {} bytes in {:.6}s",
        raw.len(),
        t0.elapsed().as_secs_f64()
    );

    let count = (raw.len() / descriptor.element_type.size()) as u64;
    if count != descriptor.sample_count() {
        log::warn!(
            "chunk holds {count} samples but the descriptor declares {} ({} x {})",
            descriptor.sample_count(),
            descriptor.shape[0],
            descriptor.shape[1]
        );
    }

    match (cli.output, cli.scale) {
        (Some(path), Some(scale)) => {
            let file = File::create(&path)
                .with_context(|| format!("creating output file {path:?}"))?;
            let mut out = BufWriter::new(file);
            samples::rescale(&raw, descriptor.element_type, scale, &mut out)?;
            out.flush()?;
        }
        _ => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            samples::dump_stats(&raw, descriptor.element_type, &mut out)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    run(Cli::parse())
}

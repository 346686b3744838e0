use log::debug;
use rayon::prelude::*;

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::format::{
    self, compressor_name, BloscHeader, ShuffleMode, FLAG_DONT_SPLIT, HEADER_SIZE,
};
use crate::shuffle::unshuffle;

/// Decompress a complete blosc frame into a freshly allocated buffer.
///
/// The output size comes from the validated header, never from the payload,
/// so the result is sized exactly once up front. `codec` may be `None` only
/// for verbatim (memcpy) frames; every other frame names the compressor it
/// was written with and the provided codec must match it.
///
/// Blocks are independent, so they are decoded on the rayon pool and
/// reassembled in block order; the call is a pure function of `src` and
/// stays observably atomic to the caller.
pub fn decode_frame(src: &[u8], codec: Option<&dyn Codec>) -> Result<Vec<u8>> {
    let (header, nbytes) = BloscHeader::validate(src)?;
    debug!(
        "frame: version {} compressor {} shuffle {} typesize {} nbytes {} blocksize {} cbytes {}",
        header.version,
        compressor_name(header.compressor()),
        header.shuffle().name(),
        header.typesize,
        header.nbytes,
        header.blocksize,
        header.cbytes,
    );

    if header.is_memcpy() {
        if src.len() != HEADER_SIZE + nbytes {
            return Err(Error::frame(format!(
                "verbatim frame holds {} payload bytes but declares {}",
                src.len() - HEADER_SIZE,
                nbytes
            )));
        }
        return Ok(src[HEADER_SIZE..].to_vec());
    }

    if header.shuffle() == ShuffleMode::Bit {
        return Err(Error::frame("bit shuffle is not supported"));
    }
    let codec = codec.ok_or_else(|| {
        Error::codec(format!(
            "frame requires the {} compressor",
            compressor_name(header.compressor())
        ))
    })?;
    if codec.id() != header.compressor() {
        return Err(Error::codec(format!(
            "compressor mismatch: frame was written with {} but codec is {}",
            compressor_name(header.compressor()),
            codec.name()
        )));
    }

    if nbytes == 0 {
        return Ok(Vec::new());
    }
    let blocksize = header.blocksize as usize;
    if blocksize == 0 {
        return Err(Error::frame("zero block size"));
    }
    let nblocks = nbytes.div_ceil(blocksize);

    // Block starts table: one absolute u32 offset per block.
    let table_end = HEADER_SIZE + 4 * nblocks;
    if src.len() < table_end {
        return Err(Error::frame("frame truncated inside the block starts table"));
    }
    let starts: Vec<usize> = src[HEADER_SIZE..table_end]
        .chunks_exact(4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as usize)
        .collect();

    let blocks: Vec<Vec<u8>> = starts
        .par_iter()
        .enumerate()
        .map(|(i, &start)| {
            let bsize = blocksize.min(nbytes - i * blocksize);
            decode_block(&header, src, start, bsize, bsize != blocksize, codec)
        })
        .collect::<Result<_>>()?;

    let mut out = Vec::with_capacity(nbytes);
    for block in blocks {
        out.extend_from_slice(&block);
    }
    if out.len() != nbytes {
        return Err(Error::frame(format!(
            "decoded {} bytes but the header declares {}",
            out.len(),
            nbytes
        )));
    }
    Ok(out)
}

/// Decode one block: parse its split streams, decompress each, reassemble,
/// and undo the shuffle.
fn decode_block(
    header: &BloscHeader,
    src: &[u8],
    start: usize,
    bsize: usize,
    leftover: bool,
    codec: &dyn Codec,
) -> Result<Vec<u8>> {
    if start < HEADER_SIZE || start > src.len() {
        return Err(Error::frame(format!("block start {start} out of bounds")));
    }
    let typesize = header.typesize as usize;
    let nstreams = format::split_streams(
        typesize,
        bsize,
        leftover,
        header.has_flag(FLAG_DONT_SPLIT),
    );
    let stream_len = bsize / nstreams;

    let mut block = Vec::with_capacity(bsize);
    let mut at = start;
    for _ in 0..nstreams {
        if src.len() - at < 4 {
            return Err(Error::frame("frame truncated before a stream length"));
        }
        let csize = format::read_u32(src, at) as usize;
        at += 4;
        if csize > src.len() - at {
            return Err(Error::frame("frame truncated inside a compressed stream"));
        }
        let payload = &src[at..at + csize];
        at += csize;
        if csize == stream_len {
            // Stored verbatim: the compressor could not shrink this stream.
            block.extend_from_slice(payload);
        } else {
            let raw = codec.decompress(payload, stream_len)?;
            if raw.len() != stream_len {
                return Err(Error::codec(format!(
                    "stream decompressed to {} bytes, expected {}",
                    raw.len(),
                    stream_len
                )));
            }
            block.extend_from_slice(&raw);
        }
    }
    if block.len() != bsize {
        return Err(Error::frame(format!(
            "block reassembled to {} bytes, expected {}",
            block.len(),
            bsize
        )));
    }

    Ok(match header.shuffle() {
        ShuffleMode::Byte => unshuffle(typesize, &block),
        _ => block,
    })
}

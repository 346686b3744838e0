use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::format::{
    self, BloscHeader, ShuffleMode, COMPRESSOR_LZ4, DEFAULT_BLOCK_SIZE, FLAG_BYTE_SHUFFLE,
    FLAG_DONT_SPLIT, FLAG_MEMCPY, HEADER_SIZE, MAX_BUFFER_SIZE, MAX_SPLITS, MIN_STREAM_SIZE,
    VERSION_FORMAT,
};
use crate::shuffle::shuffle;

/// Tunables for [`encode_frame`].
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Bytes per element, drives shuffling and stream splitting. 1–255.
    pub typesize: usize,
    pub shuffle: ShuffleMode,
    /// Nominal uncompressed bytes per block.
    pub block_size: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            typesize: 1,
            shuffle: ShuffleMode::None,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// Compress `raw` into a self-describing frame that
/// [`decode_frame`](crate::decode::decode_frame) restores byte-for-byte.
///
/// Streams a compressor cannot shrink are stored verbatim, and the whole
/// frame falls back to a verbatim (memcpy) layout when compression would
/// not beat the raw size.
pub fn encode_frame(raw: &[u8], codec: &dyn Codec, opts: &EncodeOptions) -> Result<Vec<u8>> {
    if opts.shuffle == ShuffleMode::Bit {
        return Err(Error::frame("bit shuffle is not supported"));
    }
    if raw.len() > MAX_BUFFER_SIZE as usize {
        return Err(Error::frame(format!(
            "{} bytes exceeds the maximum frame payload",
            raw.len()
        )));
    }
    let typesize = opts.typesize;
    if !(1..=255).contains(&typesize) {
        return Err(Error::frame(format!("invalid typesize {typesize}")));
    }
    if raw.is_empty() {
        return Ok(memcpy_frame(raw, typesize, codec.id()));
    }

    // Blocks hold whole elements so each one shuffles independently.
    let mut block_size = opts.block_size.min(raw.len()).max(typesize);
    block_size -= block_size % typesize;

    let shuffled = opts.shuffle == ShuffleMode::Byte && typesize > 1;
    let dont_split = !split_eligible(codec.id(), typesize, block_size);
    let nblocks = raw.len().div_ceil(block_size);

    let mut flags = codec.id() << 5;
    if shuffled {
        flags |= FLAG_BYTE_SHUFFLE;
    }
    if dont_split {
        flags |= FLAG_DONT_SPLIT;
    }

    // Header and block starts table are patched in after the blocks.
    let mut frame = vec![0u8; HEADER_SIZE + 4 * nblocks];
    for (i, chunk) in raw.chunks(block_size).enumerate() {
        let start = frame.len() as u32;
        frame[HEADER_SIZE + 4 * i..HEADER_SIZE + 4 * (i + 1)]
            .copy_from_slice(&start.to_le_bytes());

        let leftover = chunk.len() != block_size;
        let block = if shuffled {
            shuffle(typesize, chunk)
        } else {
            chunk.to_vec()
        };
        let nstreams = format::split_streams(typesize, chunk.len(), leftover, dont_split);
        let stream_len = chunk.len() / nstreams;
        for stream in block.chunks_exact(stream_len) {
            let compressed = codec.compress(stream)?;
            if compressed.len() < stream_len {
                frame.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
                frame.extend_from_slice(&compressed);
            } else {
                // Stored verbatim: flagged by a length equal to the stream's
                // uncompressed size.
                frame.extend_from_slice(&(stream_len as u32).to_le_bytes());
                frame.extend_from_slice(stream);
            }
        }
    }

    if frame.len() >= HEADER_SIZE + raw.len() {
        return Ok(memcpy_frame(raw, typesize, codec.id()));
    }

    let header = BloscHeader {
        version: VERSION_FORMAT,
        versionlz: 1,
        flags,
        typesize: typesize as u8,
        nbytes: raw.len() as u32,
        blocksize: block_size as u32,
        cbytes: frame.len() as u32,
    };
    frame[..HEADER_SIZE].copy_from_slice(&header.to_bytes());
    Ok(frame)
}

/// Verbatim frame: the 16-byte header followed by the raw payload.
fn memcpy_frame(raw: &[u8], typesize: usize, compressor: u8) -> Vec<u8> {
    let header = BloscHeader {
        version: VERSION_FORMAT,
        versionlz: 1,
        flags: FLAG_MEMCPY | (compressor << 5),
        typesize: typesize as u8,
        nbytes: raw.len() as u32,
        blocksize: raw.len() as u32,
        cbytes: (HEADER_SIZE + raw.len()) as u32,
    };
    let mut frame = Vec::with_capacity(HEADER_SIZE + raw.len());
    frame.extend_from_slice(&header.to_bytes());
    frame.extend_from_slice(raw);
    frame
}

/// Whether full blocks of this geometry are written as one stream per type
/// byte. Only the lz4 family splits; the flag records the decision so the
/// decoder never has to guess.
fn split_eligible(compressor: u8, typesize: usize, block_size: usize) -> bool {
    compressor == COMPRESSOR_LZ4
        && (1..=MAX_SPLITS).contains(&typesize)
        && block_size / typesize >= MIN_STREAM_SIZE
}

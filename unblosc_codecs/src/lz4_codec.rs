use lz4_flex::block;

use unblosc_core::error::{Error, Result};
use unblosc_core::format::COMPRESSOR_LZ4;
use unblosc_core::Codec;

/// LZ4 block codec.
///
/// The default compressor of the upstream zarr toolchain and by far the
/// most common one in the wild. Streams are raw LZ4 blocks with no length
/// prefix; the frame geometry supplies the uncompressed size.
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn id(&self) -> u8 {
        COMPRESSOR_LZ4
    }

    fn name(&self) -> &'static str {
        "lz4"
    }

    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>> {
        Ok(block::compress(raw))
    }

    fn decompress(&self, compressed: &[u8], raw_len: usize) -> Result<Vec<u8>> {
        block::decompress(compressed, raw_len)
            .map_err(|e| Error::codec(format!("lz4 decompress error: {e}")))
    }
}

use unblosc_core::error::{Error, Result};
use unblosc_core::format::COMPRESSOR_ZSTD;
use unblosc_core::Codec;

/// Zstandard block codec.
///
/// Each stream is an independent zstd frame compressed at the configured
/// level (default: 3).
pub struct ZstdCodec {
    /// Compression level (1 = fast / larger, 22 = slow / smallest).
    pub level: i32,
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self { level: 3 }
    }
}

impl ZstdCodec {
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Codec for ZstdCodec {
    fn id(&self) -> u8 {
        COMPRESSOR_ZSTD
    }

    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>> {
        Ok(zstd::bulk::compress(raw, self.level)?)
    }

    fn decompress(&self, compressed: &[u8], raw_len: usize) -> Result<Vec<u8>> {
        // The exact output size is known from the frame geometry, so the
        // buffer is never over-allocated.
        zstd::bulk::decompress(compressed, raw_len)
            .map_err(|e| Error::codec(format!("zstd decompress error: {e}")))
    }
}

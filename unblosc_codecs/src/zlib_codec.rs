use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use unblosc_core::error::{Error, Result};
use unblosc_core::format::COMPRESSOR_ZLIB;
use unblosc_core::Codec;

/// Zlib block codec.
///
/// Each stream is a complete zlib-wrapped deflate stream, matching frames
/// written with `cname: zlib`.
pub struct ZlibCodec {
    /// Compression level (0 = store, 9 = smallest).
    pub level: u32,
}

impl Default for ZlibCodec {
    fn default() -> Self {
        Self { level: 6 }
    }
}

impl ZlibCodec {
    pub fn new(level: u32) -> Self {
        Self { level }
    }
}

impl Codec for ZlibCodec {
    fn id(&self) -> u8 {
        COMPRESSOR_ZLIB
    }

    fn name(&self) -> &'static str {
        "zlib"
    }

    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(self.level));
        encoder.write_all(raw)?;
        Ok(encoder.finish()?)
    }

    fn decompress(&self, compressed: &[u8], raw_len: usize) -> Result<Vec<u8>> {
        let mut raw = Vec::with_capacity(raw_len);
        ZlibDecoder::new(compressed)
            .read_to_end(&mut raw)
            .map_err(|e| Error::codec(format!("zlib decompress error: {e}")))?;
        Ok(raw)
    }
}

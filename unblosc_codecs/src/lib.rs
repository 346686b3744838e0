mod lz4_codec;
mod zlib_codec;
mod zstd_codec;

pub use lz4_codec::Lz4Codec;
pub use zlib_codec::ZlibCodec;
pub use zstd_codec::ZstdCodec;

use std::sync::Arc;

use unblosc_core::error::{Error, Result};
use unblosc_core::format::{compressor_name, COMPRESSOR_LZ4, COMPRESSOR_ZLIB, COMPRESSOR_ZSTD};
use unblosc_core::Codec;

/// Resolve a codec from the compressor code in a frame header.
///
/// Called before any payload work, so an unusable frame fails while only
/// its header has been looked at. blosclz and snappy frames are recognized
/// but have no bundled implementation; they resolve to a distinct
/// unsupported-compressor error.
pub fn codec_by_id(id: u8) -> Result<Arc<dyn Codec>> {
    match id {
        COMPRESSOR_LZ4 => Ok(Arc::new(Lz4Codec)),
        COMPRESSOR_ZLIB => Ok(Arc::new(ZlibCodec::default())),
        COMPRESSOR_ZSTD => Ok(Arc::new(ZstdCodec::default())),
        _ => Err(Error::codec(format!(
            "unsupported compressor {} (code {id})",
            compressor_name(id)
        ))),
    }
}

use crate::error::Result;

/// Core block-compressor abstraction.
///
/// Each `Codec` implementation:
/// - Is identified by the stable compressor code stored in frame flag
///   bits 5–7.
/// - Must compress/decompress individual streams independently. No
///   cross-stream state is permitted, so any block of a frame can be
///   decoded without the others.
pub trait Codec: Send + Sync {
    /// Compressor code stored in the frame header flags.
    fn id(&self) -> u8;

    /// Human-readable compressor name for CLI display.
    fn name(&self) -> &'static str;

    /// Compress a single independent stream.
    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>>;

    /// Decompress a single independent stream whose uncompressed size is
    /// already known from the frame geometry.
    fn decompress(&self, compressed: &[u8], raw_len: usize) -> Result<Vec<u8>>;
}

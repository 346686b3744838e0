pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod metadata;
pub mod samples;
pub mod shuffle;

pub use codec::Codec;
pub use decode::decode_frame;
pub use encode::{encode_frame, EncodeOptions};
pub use error::{Error, Result};
pub use format::{BloscHeader, ShuffleMode, HEADER_SIZE};
pub use metadata::{ChunkDescriptor, ElementType};

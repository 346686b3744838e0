pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure taxonomy for chunk decoding. Every variant is fatal to the run;
/// there is no retry path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Sidecar descriptor missing a required member or declaring an
    /// unusable shape.
    #[error("incomplete metadata: {0}")]
    Metadata(String),
    #[error("unsupported dtype {0:?}")]
    UnsupportedDtype(String),
    /// Header-level rejection: bad version bytes, size mismatch, truncation.
    #[error("corrupt or unsupported frame: {0}")]
    Frame(String),
    /// A block compressor failed or produced the wrong number of bytes.
    #[error("codec error: {0}")]
    Codec(String),
    /// A zero-length sample sequence has no defined mean.
    #[error("chunk decoded to an empty sample sequence")]
    EmptyChunk,
}

impl Error {
    pub fn metadata(message: impl Into<String>) -> Self {
        Self::Metadata(message.into())
    }

    pub fn frame(message: impl Into<String>) -> Self {
        Self::Frame(message.into())
    }

    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec(message.into())
    }
}

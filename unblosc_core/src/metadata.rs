use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Filename of the sidecar descriptor shared by every chunk in a directory.
pub const SIDECAR_NAME: &str = ".zarray";

/// Element encoding of the decoded samples. Both encodings are little-endian
/// on disk; the byte-order marker in `dtype` must say so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    UInt16,
    Float32,
}

impl ElementType {
    /// Bytes per sample.
    pub fn size(self) -> usize {
        match self {
            ElementType::UInt16 => 2,
            ElementType::Float32 => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementType::UInt16 => "uint16",
            ElementType::Float32 => "float32",
        }
    }
}

/// Validated description of one chunk, parsed from its sidecar descriptor.
/// Parsed once per chunk file and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ChunkDescriptor {
    /// Chunk extent as rows × columns.
    pub shape: [u64; 2],
    pub element_type: ElementType,
}

/// Raw sidecar document. Only the members this decoder consumes are
/// declared; serde skips the rest (`compressor`, `fill_value`, ...), and
/// member order is irrelevant.
#[derive(Debug, Deserialize)]
struct RawDocument {
    chunks: Option<Vec<u64>>,
    dtype: Option<String>,
    order: Option<String>,
}

impl ChunkDescriptor {
    /// Parse a sidecar document.
    pub fn parse(text: &str) -> Result<Self> {
        let doc: RawDocument = serde_json::from_str(text)?;

        let chunks = doc
            .chunks
            .ok_or_else(|| Error::metadata("missing \"chunks\""))?;
        let shape: [u64; 2] = match chunks[..] {
            [rows, cols] => [rows, cols],
            _ => {
                return Err(Error::metadata(format!(
                    "\"chunks\" must have 2 entries, found {}",
                    chunks.len()
                )))
            }
        };
        if shape.contains(&0) {
            return Err(Error::metadata("zero-sized chunk axis"));
        }

        if let Some(order) = doc.order {
            if order != "C" {
                return Err(Error::metadata(format!(
                    "unsupported element order {order:?}"
                )));
            }
        }

        let dtype = doc
            .dtype
            .ok_or_else(|| Error::metadata("missing \"dtype\""))?;
        let element_type = parse_dtype(&dtype)?;

        Ok(Self {
            shape,
            element_type,
        })
    }

    /// Read and parse the descriptor sitting next to `chunk_path`.
    pub fn for_chunk(chunk_path: &Path) -> Result<Self> {
        let path = sidecar_path(chunk_path)?;
        let text = fs::read_to_string(&path)?;
        Self::parse(&text)
    }

    /// Samples one chunk of this shape holds.
    pub fn sample_count(&self) -> u64 {
        self.shape[0] * self.shape[1]
    }
}

/// Sibling `.zarray` of a chunk file.
pub fn sidecar_path(chunk_path: &Path) -> Result<PathBuf> {
    let dir = chunk_path.parent().ok_or_else(|| {
        Error::metadata(format!("chunk path {chunk_path:?} has no parent directory"))
    })?;
    Ok(dir.join(SIDECAR_NAME))
}

/// `dtype` is a byte-order marker followed by a two-character type code.
/// Only little-endian `u2` and `f4` are in scope.
fn parse_dtype(dtype: &str) -> Result<ElementType> {
    let code = dtype
        .strip_prefix('<')
        .ok_or_else(|| Error::UnsupportedDtype(dtype.to_string()))?;
    match code {
        "u2" => Ok(ElementType::UInt16),
        "f4" => Ok(ElementType::Float32),
        _ => Err(Error::UnsupportedDtype(dtype.to_string())),
    }
}

//! Byte shuffle: the per-block filter that groups the first bytes of every
//! element together, then the second bytes, and so on. Grouping like bytes
//! makes fixed-width numeric data far more compressible.

/// Shuffle a block of `typesize`-wide elements. Trailing bytes that do not
/// fill a whole element are copied verbatim.
pub fn shuffle(typesize: usize, src: &[u8]) -> Vec<u8> {
    if typesize <= 1 {
        return src.to_vec();
    }
    let items = src.len() / typesize;
    let split = items * typesize;
    let mut out = vec![0u8; src.len()];
    for i in 0..items {
        for j in 0..typesize {
            out[j * items + i] = src[i * typesize + j];
        }
    }
    out[split..].copy_from_slice(&src[split..]);
    out
}

/// Inverse of [`shuffle`].
pub fn unshuffle(typesize: usize, src: &[u8]) -> Vec<u8> {
    if typesize <= 1 {
        return src.to_vec();
    }
    let items = src.len() / typesize;
    let split = items * typesize;
    let mut out = vec![0u8; src.len()];
    for i in 0..items {
        for j in 0..typesize {
            out[i * typesize + j] = src[j * items + i];
        }
    }
    out[split..].copy_from_slice(&src[split..]);
    out
}

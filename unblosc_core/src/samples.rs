use std::io::Write;

use crate::error::{Error, Result};
use crate::metadata::ElementType;

/// Aggregates reported by statistics mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleStats {
    UInt16 { max: u16, mean: u64 },
    Float32 { max: f32, mean: f32 },
}

/// Statistics mode: write every sample's literal value, space-separated in
/// decode order, followed by `MAX:` and `MEAN:` lines.
///
/// The integer mean uses a u64 accumulator and truncating division; the
/// float mean accumulates in f32. The running maximum starts from zero for
/// both types, so an all-negative float sequence reports a maximum of zero.
/// A buffer holding no whole sample is rejected before anything is written.
pub fn dump_stats<W: Write>(
    raw: &[u8],
    element_type: ElementType,
    out: &mut W,
) -> Result<SampleStats> {
    let count = raw.len() / element_type.size();
    if count == 0 {
        return Err(Error::EmptyChunk);
    }
    match element_type {
        ElementType::UInt16 => {
            let mut max = 0u16;
            let mut sum = 0u64;
            for bytes in raw.chunks_exact(2) {
                let value = u16::from_le_bytes([bytes[0], bytes[1]]);
                sum += u64::from(value);
                if value > max {
                    max = value;
                }
                write!(out, "{value} ")?;
            }
            let mean = sum / count as u64;
            writeln!(out, "\nMAX: {max}")?;
            writeln!(out, "MEAN: {mean}")?;
            Ok(SampleStats::UInt16 { max, mean })
        }
        ElementType::Float32 => {
            let mut max = 0f32;
            let mut sum = 0f32;
            for bytes in raw.chunks_exact(4) {
                let value = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                sum += value;
                if value > max {
                    max = value;
                }
                write!(out, "{value:.6} ")?;
            }
            let mean = sum / count as f32;
            writeln!(out, "\nMAX: {max:.6}")?;
            writeln!(out, "MEAN: {mean:.6}")?;
            Ok(SampleStats::Float32 { max, mean })
        }
    }
}

/// Rescale mode: emit one byte per sample, the product `sample × scale`
/// truncated toward zero and narrowed with wraparound. Out-of-range
/// products wrap rather than clamp: 400 becomes byte 144.
pub fn rescale<W: Write>(
    raw: &[u8],
    element_type: ElementType,
    scale: f32,
    out: &mut W,
) -> Result<()> {
    let count = raw.len() / element_type.size();
    let mut bytes = Vec::with_capacity(count);
    match element_type {
        ElementType::UInt16 => {
            for sample in raw.chunks_exact(2) {
                let value = u16::from_le_bytes([sample[0], sample[1]]);
                bytes.push(narrow(f32::from(value) * scale));
            }
        }
        ElementType::Float32 => {
            for sample in raw.chunks_exact(4) {
                let value = f32::from_le_bytes([sample[0], sample[1], sample[2], sample[3]]);
                bytes.push(narrow(value * scale));
            }
        }
    }
    out.write_all(&bytes)?;
    Ok(())
}

/// Truncate toward zero, then wrap into a single byte.
#[inline]
fn narrow(value: f32) -> u8 {
    value as i64 as u8
}

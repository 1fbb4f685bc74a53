//! Per-beam array codec (§4.C).
//!
//! Most ping arrays (depth, across-track, travel time, amplitude, ...) are
//! scaled fixed-point integers: one, two, or four raw bytes per beam,
//! recovered with `value = raw / multiplier - offset` via the matching
//! [`crate::scale::ScaleFactor`]. A few arrays break that mould — quality
//! flags are 2-bit fields packed four to a byte, beam flags are a plain
//! unscaled byte per beam, and a handful of "byte array" subrecords (sector
//! number, detection info, cleaning count) are unscaled bytes widened to
//! `u16` on read. Each gets its own codec here; the scaled codec is the one
//! nearly every array subrecord actually uses.

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::{GsfError, Result};
use crate::scale::{FieldSize, ScaleFactor};

/// Decodes `beams` scaled samples of `size` bytes each, applying `scale` to recover the
/// engineering value for each one.
pub fn decode_scaled_array(
    r: &mut ByteReader,
    beams: usize,
    size: FieldSize,
    scale: &ScaleFactor,
) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(beams);
    for _ in 0..beams {
        let raw = match size {
            FieldSize::One => r.read_u8()? as u32,
            FieldSize::Two => r.read_u16()? as u32,
            FieldSize::Four => r.read_u32()?,
        };
        values.push(raw as f64 / scale.multiplier - scale.offset);
    }
    Ok(values)
}

/// Encodes `values` back into `size`-byte scaled samples using `scale`.
pub fn encode_scaled_array(
    w: &mut ByteWriter,
    values: &[f64],
    size: FieldSize,
    scale: &ScaleFactor,
) -> Result<()> {
    for &value in values {
        let raw = ((value + scale.offset) * scale.multiplier).round();
        match size {
            FieldSize::One => w.write_u8(raw as u8)?,
            FieldSize::Two => w.write_u16(raw as u16)?,
            FieldSize::Four => w.write_u32(raw as u32)?,
        }
    }
    Ok(())
}

/// Decodes a signed variant of [`decode_scaled_array`] (across-track/along-track position
/// and mean-calibrated-amplitude arrays carry a sign, unlike the rest of the scaled arrays).
pub fn decode_signed_scaled_array(
    r: &mut ByteReader,
    beams: usize,
    size: FieldSize,
    scale: &ScaleFactor,
) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(beams);
    for _ in 0..beams {
        let raw = match size {
            FieldSize::One => r.read_u8()? as i8 as i32,
            FieldSize::Two => r.read_i16()? as i32,
            FieldSize::Four => r.read_i32()?,
        };
        values.push(raw as f64 / scale.multiplier - scale.offset);
    }
    Ok(values)
}

/// Encodes a signed variant of [`encode_scaled_array`], the write-side counterpart of
/// [`decode_signed_scaled_array`].
pub fn encode_signed_scaled_array(
    w: &mut ByteWriter,
    values: &[f64],
    size: FieldSize,
    scale: &ScaleFactor,
) -> Result<()> {
    for &value in values {
        let raw = ((value + scale.offset) * scale.multiplier).round();
        match size {
            FieldSize::One => w.write_u8(raw as i8 as u8)?,
            FieldSize::Two => w.write_i16(raw as i16)?,
            FieldSize::Four => w.write_i32(raw as i32)?,
        }
    }
    Ok(())
}

/// The four 2-bit quality-flag masks and their shift amounts, packed most-significant-first
/// within each byte: beam 0 occupies bits 6-7, beam 1 bits 4-5, and so on.
const QUALITY_FLAG_MASKS: [(u8, u32); 4] = [(0xC0, 6), (0x30, 4), (0x0C, 2), (0x03, 0)];

/// Decodes `beams` 2-bit quality flags, four beams packed per byte (§4.C).
pub fn decode_quality_flags(r: &mut ByteReader, beams: usize) -> Result<Vec<u8>> {
    let bytes = beams.div_ceil(4);
    let mut flags = Vec::with_capacity(beams);
    for i in 0..bytes {
        let byte = r.read_u8()?;
        for &(mask, shift) in &QUALITY_FLAG_MASKS {
            if flags.len() == beams {
                break;
            }
            let _ = i;
            flags.push((byte & mask) >> shift);
        }
    }
    Ok(flags)
}

/// Encodes `flags` (values `0..=3`) into 2-bit packed bytes, four beams per byte.
pub fn encode_quality_flags(w: &mut ByteWriter, flags: &[u8]) -> Result<()> {
    for chunk in flags.chunks(4) {
        let mut byte = 0u8;
        for (value, &(mask, shift)) in chunk.iter().zip(QUALITY_FLAG_MASKS.iter()) {
            byte |= (value << shift) & mask;
        }
        w.write_u8(byte)?;
    }
    Ok(())
}

/// Decodes a plain, unscaled byte-per-beam flag array (beam flags, or the "byte array"
/// subrecords that hold sector number, detection info, and cleaning count, widened to `u16`).
pub fn decode_byte_array(r: &mut ByteReader, beams: usize) -> Result<Vec<u16>> {
    let mut values = Vec::with_capacity(beams);
    for _ in 0..beams {
        values.push(r.read_u8()? as u16);
    }
    Ok(values)
}

/// Encodes a byte-per-beam array back down from its widened `u16` representation. Returns
/// [`GsfError::InvalidBeamCount`]-adjacent corruption if a value does not fit in a byte — this
/// should never happen for data this crate produced itself, only for a foreign value plugged
/// directly into a ping before writing.
pub fn encode_byte_array(w: &mut ByteWriter, values: &[u16]) -> Result<()> {
    for &value in values {
        if value > u8::MAX as u16 {
            return Err(GsfError::CorruptRecord {
                offset: 0,
                reason: format!("byte array value {value} does not fit in one byte"),
            });
        }
        w.write_u8(value as u8)?;
    }
    Ok(())
}

/// Decodes a plain byte-per-beam beam-flags array (no scaling, values are [`crate::flag`]
/// bit patterns).
pub fn decode_beam_flags(r: &mut ByteReader, beams: usize) -> Result<Vec<u8>> {
    let mut values = Vec::with_capacity(beams);
    for _ in 0..beams {
        values.push(r.read_u8()?);
    }
    Ok(values)
}

/// Encodes a beam-flags array.
pub fn encode_beam_flags(w: &mut ByteWriter, values: &[u8]) -> Result<()> {
    for &value in values {
        w.write_u8(value)?;
    }
    Ok(())
}

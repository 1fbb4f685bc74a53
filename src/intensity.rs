//! Per-beam intensity (sensor imagery) time series (§4.C, §8).
//!
//! Intensity samples are packed at a configurable bit depth rather than a
//! fixed byte width: `bits_per_sample` is read from the subrecord header and
//! governs how densely consecutive samples are bit-packed into the sample
//! stream, most-significant-bit first. A depth of 12 is by far the most
//! common in practice; it is special-cased for exactness (no shift/mask
//! arithmetic error from the generic path should ever be able to creep in),
//! but any depth up to 32 is supported via a generic bit reader.

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;

/// Corrections already applied to a sensor's intensity samples before they were written,
/// as a bitmask (bit 0: amplitude correction applied, bit 1: TVG (time-varied gain) applied).
pub mod applied_corrections {
    /// Amplitude correction has already been applied upstream.
    pub const AMPLITUDE_CORRECTION: u16 = 0x0001;
    /// Time-varied gain correction has already been applied upstream.
    pub const TVG_CORRECTION: u16 = 0x0002;
}

/// The header shared by every per-ping sensor-imagery subrecord: how the sample stream
/// that follows is packed, and what has already been done to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntensitySeriesHeader {
    /// Bits per intensity sample, typically 12 but anywhere from 1 to 32.
    pub bits_per_sample: u8,
    /// [`applied_corrections`] bitmask.
    pub applied_corrections: u16,
}

impl IntensitySeriesHeader {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<IntensitySeriesHeader> {
        let bits_per_sample = r.read_u8()?;
        r.skip(1)?; // spare, preserves 4-byte alignment with the applied_corrections field
        let applied_corrections = r.read_u16()?;
        Ok(IntensitySeriesHeader {
            bits_per_sample,
            applied_corrections,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_u8(self.bits_per_sample)?;
        w.write_u8(0)?;
        w.write_u16(self.applied_corrections)
    }
}

/// One beam's intensity time series: the samples recorded around its detection point,
/// plus which index in `samples` is the detection sample itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeamIntensitySeries {
    /// Index into `samples` of the detection point.
    pub detect_sample: u16,
    /// Raw sample magnitudes, widened to `u32` regardless of `bits_per_sample`.
    pub samples: Vec<u32>,
}

/// Decodes one beam's intensity series: a 2-byte sample count, a 2-byte spare, a 2-byte
/// detect-sample index, and then `sample_count` packed samples.
pub fn decode_beam_series(r: &mut ByteReader, bits_per_sample: u8) -> Result<BeamIntensitySeries> {
    let sample_count = r.read_u16()?;
    r.skip(2)?;
    let detect_sample = r.read_u16()?;
    let samples = decode_packed_samples(r, sample_count as usize, bits_per_sample)?;
    Ok(BeamIntensitySeries {
        detect_sample,
        samples,
    })
}

/// Encodes one beam's intensity series.
pub fn encode_beam_series(
    w: &mut ByteWriter,
    series: &BeamIntensitySeries,
    bits_per_sample: u8,
) -> Result<()> {
    w.write_u16(series.samples.len() as u16)?;
    w.write_u16(0)?;
    w.write_u16(series.detect_sample)?;
    encode_packed_samples(w, &series.samples, bits_per_sample)
}

/// Unpacks `count` samples of `bits_per_sample` bits each from a big-endian-packed byte
/// stream, most-significant-bit first.
pub fn decode_packed_samples(
    r: &mut ByteReader,
    count: usize,
    bits_per_sample: u8,
) -> Result<Vec<u32>> {
    if bits_per_sample == 12 {
        return decode_12_bit_samples(r, count);
    }
    if bits_per_sample == 8 {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(r.read_u8()? as u32);
        }
        return Ok(out);
    }
    if bits_per_sample == 16 {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(r.read_u16()? as u32);
        }
        return Ok(out);
    }
    let total_bits = count * bits_per_sample as usize;
    let total_bytes = total_bits.div_ceil(8);
    let bytes = r.read_bytes(total_bytes)?;
    Ok(unpack_bits(bytes, count, bits_per_sample))
}

/// Exactly recovers a 3-bytes-to-2-samples 12-bit pair: `[b0, b1, b2]` packs
/// `sample0 = (b0 << 4) | (b1 >> 4)` and `sample1 = ((b1 & 0x0f) << 8) | b2`.
fn decode_12_bit_samples(r: &mut ByteReader, count: usize) -> Result<Vec<u32>> {
    let mut out = Vec::with_capacity(count);
    let mut i = 0;
    while i < count {
        let b0 = r.read_u8()? as u32;
        if i + 1 == count {
            // An odd sample count leaves one sample in the high nibbles of a final
            // otherwise-unused byte pair; only the first sample is meaningful.
            let b1 = r.read_u8()? as u32;
            out.push((b0 << 4) | (b1 >> 4));
            i += 1;
        } else {
            let b1 = r.read_u8()? as u32;
            let b2 = r.read_u8()? as u32;
            out.push((b0 << 4) | (b1 >> 4));
            out.push(((b1 & 0x0f) << 8) | b2);
            i += 2;
        }
    }
    Ok(out)
}

fn unpack_bits(bytes: &[u8], count: usize, bits_per_sample: u8) -> Vec<u32> {
    let bits_per_sample = bits_per_sample as usize;
    let mut out = Vec::with_capacity(count);
    let mut bit_pos = 0usize;
    for _ in 0..count {
        let mut value: u32 = 0;
        for _ in 0..bits_per_sample {
            let byte = bytes[bit_pos / 8];
            let bit = (byte >> (7 - bit_pos % 8)) & 1;
            value = (value << 1) | bit as u32;
            bit_pos += 1;
        }
        out.push(value);
    }
    out
}

/// Packs samples back down to `bits_per_sample` bits each.
pub fn encode_packed_samples(w: &mut ByteWriter, samples: &[u32], bits_per_sample: u8) -> Result<()> {
    if bits_per_sample == 12 {
        return encode_12_bit_samples(w, samples);
    }
    if bits_per_sample == 8 {
        for &s in samples {
            w.write_u8(s as u8)?;
        }
        return Ok(());
    }
    if bits_per_sample == 16 {
        for &s in samples {
            w.write_u16(s as u16)?;
        }
        return Ok(());
    }
    let bytes = pack_bits(samples, bits_per_sample);
    w.write_bytes(&bytes)
}

fn encode_12_bit_samples(w: &mut ByteWriter, samples: &[u32]) -> Result<()> {
    let mut i = 0;
    while i < samples.len() {
        if i + 1 == samples.len() {
            let s0 = samples[i] & 0x0fff;
            w.write_u8((s0 >> 4) as u8)?;
            w.write_u8(((s0 & 0x0f) << 4) as u8)?;
            i += 1;
        } else {
            let s0 = samples[i] & 0x0fff;
            let s1 = samples[i + 1] & 0x0fff;
            w.write_u8((s0 >> 4) as u8)?;
            w.write_u8((((s0 & 0x0f) << 4) | (s1 >> 8)) as u8)?;
            w.write_u8((s1 & 0xff) as u8)?;
            i += 2;
        }
    }
    Ok(())
}

fn pack_bits(samples: &[u32], bits_per_sample: u8) -> Vec<u8> {
    let bits_per_sample = bits_per_sample as usize;
    let mut bytes = vec![0u8; (samples.len() * bits_per_sample).div_ceil(8)];
    let mut bit_pos = 0usize;
    for &sample in samples {
        for b in (0..bits_per_sample).rev() {
            let bit = (sample >> b) & 1;
            if bit != 0 {
                bytes[bit_pos / 8] |= 1 << (7 - bit_pos % 8);
            }
            bit_pos += 1;
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_bit_pair_matches_the_worked_example() {
        let bytes = [0xAB, 0xC1, 0x23];
        let mut r = ByteReader::new(&bytes);
        let samples = decode_12_bit_samples(&mut r, 2).unwrap();
        assert_eq!(vec![0xABC, 0x123], samples);
    }

    #[test]
    fn twelve_bit_roundtrips_odd_and_even_counts() {
        for samples in [vec![0x0ab, 0x123, 0x456], vec![0x0ab, 0x123]] {
            let mut w = ByteWriter::new();
            encode_12_bit_samples(&mut w, &samples).unwrap();
            let bytes = w.into_inner();
            let mut r = ByteReader::new(&bytes);
            let decoded = decode_12_bit_samples(&mut r, samples.len()).unwrap();
            assert_eq!(samples, decoded);
        }
    }

    #[test]
    fn generic_bit_packing_roundtrips_at_five_bits() {
        let samples = vec![1u32, 31, 0, 17, 9];
        let mut w = ByteWriter::new();
        encode_packed_samples(&mut w, &samples, 5).unwrap();
        let bytes = w.into_inner();
        let mut r = ByteReader::new(&bytes);
        let decoded = decode_packed_samples(&mut r, samples.len(), 5).unwrap();
        assert_eq!(samples, decoded);
    }

    #[test]
    fn beam_series_roundtrips() {
        let series = BeamIntensitySeries {
            detect_sample: 3,
            samples: vec![10, 20, 30, 40, 50],
        };
        let mut w = ByteWriter::new();
        encode_beam_series(&mut w, &series, 16).unwrap();
        let bytes = w.into_inner();
        let mut r = ByteReader::new(&bytes);
        let decoded = decode_beam_series(&mut r, 16).unwrap();
        assert_eq!(series, decoded);
    }
}

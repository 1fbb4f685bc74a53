//! The per-array scale-factor table (§3, §4.B).
//!
//! A scale factor converts an on-wire integer sample back to an engineering
//! value: `value = raw / multiplier - offset`. The table persists across
//! pings in a file until a ping supplies a fresh scale-factor subrecord.

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::{GsfError, Result};

/// Number of distinct array subrecord ids a scale-factor table can carry.
pub const MAX_ARRAY_SUBRECORDS: usize = 31;

/// Smallest legal scale-factor multiplier (matches `MIN_GSF_SF_MULT_VALUE` in the original).
pub const MIN_MULTIPLIER: u32 = 1;
/// Largest legal scale-factor multiplier (matches `MAX_GSF_SF_MULT_VALUE` in the original).
pub const MAX_MULTIPLIER: u32 = 10_000_000;

/// A field size, in bytes per sample, as recorded in a scale factor's compression flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldSize {
    /// One byte per sample.
    One,
    /// Two bytes per sample.
    Two,
    /// Four bytes per sample.
    Four,
}

impl FieldSize {
    /// The size in bytes.
    pub fn bytes(self) -> usize {
        match self {
            FieldSize::One => 1,
            FieldSize::Two => 2,
            FieldSize::Four => 4,
        }
    }

    fn from_bytes(n: usize) -> Option<FieldSize> {
        match n {
            1 => Some(FieldSize::One),
            2 => Some(FieldSize::Two),
            4 => Some(FieldSize::Four),
            _ => None,
        }
    }

    fn high_nibble(self) -> u8 {
        (self.bytes() as u8) << 4
    }

    fn from_high_nibble(flag: u8) -> Option<FieldSize> {
        FieldSize::from_bytes(((flag & 0xF0) >> 4) as usize)
    }
}

/// A single array subrecord's scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactor {
    /// Multiplier, `raw / multiplier` recovers the scaled magnitude.
    pub multiplier: f64,
    /// Signed bias subtracted after scaling.
    pub offset: f64,
    /// Packed byte: high nibble is the field size, low nibble reserved.
    pub compression_flag: u8,
}

impl ScaleFactor {
    /// The field size this entry was last recorded with, if a value has been assigned.
    pub fn field_size(&self) -> Option<FieldSize> {
        FieldSize::from_high_nibble(self.compression_flag)
    }
}

/// The table of scale factors carried across pings in one file (§3).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScaleFactors {
    table: [Option<ScaleFactor>; MAX_ARRAY_SUBRECORDS],
}

impl ScaleFactors {
    /// An empty table (no array subrecord has a scale factor yet).
    pub fn new() -> ScaleFactors {
        ScaleFactors::default()
    }

    /// Looks up the scale factor for array subrecord `id` (1..=31).
    pub fn get(&self, id: u8) -> Option<&ScaleFactor> {
        if id == 0 || id as usize > MAX_ARRAY_SUBRECORDS {
            None
        } else {
            self.table[id as usize - 1].as_ref()
        }
    }

    /// Sets the field-size nibble recorded against `id`, leaving multiplier/offset untouched
    /// if an entry already exists, or creating a placeholder entry if not (mirrors the
    /// original masking `ft->rec.mb_ping.scaleFactors.scaleTable[id-1].compressionFlag`
    /// in-place as field sizes are inferred during ping decode).
    pub fn set_field_size(&mut self, id: u8, size: FieldSize) {
        if id == 0 || id as usize > MAX_ARRAY_SUBRECORDS {
            return;
        }
        let slot = &mut self.table[id as usize - 1];
        let entry = slot.get_or_insert(ScaleFactor {
            multiplier: 0.0,
            offset: 0.0,
            compression_flag: 0,
        });
        entry.compression_flag = (entry.compression_flag & 0x0F) | size.high_nibble();
    }

    /// Replaces (or creates) the entry for array subrecord `id` wholesale.
    pub fn set_entry(&mut self, id: u8, multiplier: f64, offset: f64, compression_flag: u8) {
        if id == 0 || id as usize > MAX_ARRAY_SUBRECORDS {
            return;
        }
        self.table[id as usize - 1] = Some(ScaleFactor {
            multiplier,
            offset,
            compression_flag,
        });
    }

    /// Decodes a scale-factor subrecord: a 4-byte count followed by that many
    /// `{id+compression (4 bytes), multiplier (4 bytes), offset (4 bytes)}` entries.
    pub fn read_from(r: &mut ByteReader) -> Result<ScaleFactors> {
        let count = r.read_u32()?;
        if count < 1 || count as usize > MAX_ARRAY_SUBRECORDS {
            return Err(GsfError::TooManyArraySubrecords(count));
        }
        let mut table = ScaleFactors::default();
        for _ in 0..count {
            let packed = r.read_u32()?;
            let id = ((packed & 0xFF00_0000) >> 24) as u8;
            let compression_flag = ((packed & 0x00FF_0000) >> 16) as u8;
            if id == 0 || id as usize > MAX_ARRAY_SUBRECORDS {
                return Err(GsfError::UnrecognizedArraySubrecordId(id));
            }
            let multiplier = r.read_u32()? as f64;
            let offset = r.read_i32()? as f64;
            let checked = multiplier + 0.001;
            if (checked as u32) < MIN_MULTIPLIER || (checked as u32) > MAX_MULTIPLIER {
                return Err(GsfError::BadScaleFactor {
                    id,
                    reason: format!("multiplier {multiplier} outside legal range"),
                });
            }
            table.table[id as usize - 1] = Some(ScaleFactor {
                multiplier,
                offset,
                compression_flag,
            });
        }
        Ok(table)
    }

    /// Encodes this table as a scale-factor subrecord payload.
    pub fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        let entries: Vec<(u8, &ScaleFactor)> = self
            .table
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| ((i + 1) as u8, e)))
            .collect();
        w.write_u32(entries.len() as u32)?;
        for (id, entry) in entries {
            let packed = ((id as u32) << 24) | ((entry.compression_flag as u32) << 16);
            w.write_u32(packed)?;
            w.write_u32(entry.multiplier as u32)?;
            w.write_i32(entry.offset as i32)?;
        }
        Ok(())
    }

    /// Recovers the field size of an array subrecord whose compression flag did not record
    /// a `DEFAULT` size hint, the way legacy GSF files require (§4.B, §9).
    ///
    /// `subrecord_size` is the size in bytes the subrecord declared; `beams` is the ping's
    /// beam count; `peek` is a lazily-supplied look at the header of the subrecord that
    /// would immediately follow *if* the current one had size `beams * candidate`, for
    /// `candidate` in `{1, 2, 4}` in turn — the caller re-invokes with a fresh peek after
    /// each rejected hypothesis, up to three steps ahead, exactly as the original does by
    /// re-reading at `p + sr_size` with a growing `sr_size` guess.
    pub fn infer_field_size(
        subrecord_size: u32,
        beams: u16,
        fallback: Option<FieldSize>,
        mut peek_at: impl FnMut(u32) -> Option<(u8, u32)>,
    ) -> FieldSize {
        if beams == 0 {
            return fallback.unwrap_or(FieldSize::Two);
        }
        let beams = beams as u32;
        if let Some(direct) = FieldSize::from_bytes((subrecord_size / beams) as usize) {
            return direct;
        }
        // Legacy file: no in-band hint. Speculatively probe up to three candidate sizes,
        // looking at what the *next* subrecord header would say if our guess were right.
        for candidate in [FieldSize::One, FieldSize::Two, FieldSize::Four] {
            let guessed_size = beams * candidate.bytes() as u32;
            if let Some((next_id, next_size)) = peek_at(guessed_size) {
                let legal_id = next_id >= 1 && next_id as usize <= MAX_ARRAY_SUBRECORDS;
                let legal_size =
                    next_size == beams || next_size == 2 * beams || next_size == 4 * beams;
                if legal_id && legal_size {
                    return candidate;
                }
            }
        }
        fallback.unwrap_or(FieldSize::Two)
    }
}

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;

/// Klein 5410 Bss sensor-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Klein5410Bss {
    /// Data quality flags, vendor-specific bitmask.
    pub data_quality: u8,
    /// Side, 0 = port, 1 = starboard.
    pub side: u8,
    /// Acoustic frequency, kHz.
    pub frequency: u16,
    /// Sound velocity used for this ping, tenths of a meter per second.
    pub velocity: u16,
    /// Number of samples per beam in the associated sidescan trace.
    pub samples_per_beam: u16,
}

impl Klein5410Bss {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<Klein5410Bss> {
        Ok(Klein5410Bss {
            data_quality: r.read_u8()?,
            side: r.read_u8()?,
            frequency: r.read_u16()?,
            velocity: r.read_u16()?,
            samples_per_beam: r.read_u16()?,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_u8(self.data_quality)?;
        w.write_u8(self.side)?;
        w.write_u16(self.frequency)?;
        w.write_u16(self.velocity)?;
        w.write_u16(self.samples_per_beam)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn klein_5410_bss_roundtrips() {
        let v = Klein5410Bss {
            data_quality: 0b0000_0110,
            side: 1,
            frequency: 455,
            velocity: 15000,
            samples_per_beam: 2048,
        };
        let mut w = ByteWriter::new();
        v.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(v, Klein5410Bss::read_from(&mut r).unwrap());
    }
}

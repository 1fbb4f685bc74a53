use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;

/// Odom DeltaT sensor-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeltaT {
    /// Decode technique, vendor-specific code.
    pub technique: u8,
    /// Transducer depth, centimeters.
    pub transducer_depth: u16,
    /// Frequency, kHz.
    pub frequency: u16,
    /// Sound velocity at the transducer, tenths of a meter per second.
    pub velocity: u16,
}

impl DeltaT {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<DeltaT> {
        Ok(DeltaT {
            technique: r.read_u8()?,
            transducer_depth: r.read_u16()?,
            frequency: r.read_u16()?,
            velocity: r.read_u16()?,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_u8(self.technique)?;
        w.write_u16(self.transducer_depth)?;
        w.write_u16(self.frequency)?;
        w.write_u16(self.velocity)
    }
}

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;

/// Elac BottomChart MkII sensor-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElacMkII {
    /// Sonar mode, vendor-specific code.
    pub mode: u8,
    /// Power level, vendor-specific code.
    pub power: u8,
    /// Receiver gain, vendor-specific code.
    pub gain: u8,
    /// Pulse length, tenths of a millisecond.
    pub pulse_length: u8,
}

impl ElacMkII {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<ElacMkII> {
        Ok(ElacMkII {
            mode: r.read_u8()?,
            power: r.read_u8()?,
            gain: r.read_u8()?,
            pulse_length: r.read_u8()?,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_u8(self.mode)?;
        w.write_u8(self.power)?;
        w.write_u8(self.gain)?;
        w.write_u8(self.pulse_length)
    }
}

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;

/// Reson SeaBat (non-8100) sensor-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeaBat {
    /// Sonar range setting, meters.
    pub range: u16,
    /// Transmit power setting, vendor-specific code.
    pub power: u8,
    /// Receiver gain setting, vendor-specific code.
    pub gain: u8,
    /// Sound velocity, tenths of a meter per second.
    pub velocity: u16,
}

impl SeaBat {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<SeaBat> {
        Ok(SeaBat {
            range: r.read_u16()?,
            power: r.read_u8()?,
            gain: r.read_u8()?,
            velocity: r.read_u16()?,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_u16(self.range)?;
        w.write_u8(self.power)?;
        w.write_u8(self.gain)?;
        w.write_u16(self.velocity)
    }
}

/// Reson SeaBat II sensor-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeaBatII {
    /// Sonar range setting, meters.
    pub range: u16,
    /// Transmit power setting, vendor-specific code.
    pub power: u8,
    /// Receiver gain setting, vendor-specific code.
    pub gain: u8,
    /// Spreading loss compensation, vendor-specific code.
    pub spread_gain: u8,
    /// Whether forward-looking sonar mode was active.
    pub fore_aft: bool,
}

impl SeaBatII {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<SeaBatII> {
        Ok(SeaBatII {
            range: r.read_u16()?,
            power: r.read_u8()?,
            gain: r.read_u8()?,
            spread_gain: r.read_u8()?,
            fore_aft: r.read_u8()? != 0,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_u16(self.range)?;
        w.write_u8(self.power)?;
        w.write_u8(self.gain)?;
        w.write_u8(self.spread_gain)?;
        w.write_u8(self.fore_aft as u8)
    }
}

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;

/// GeoAcoustics GeoSwath+ sensor-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoSwathPlus {
    /// Data source, vendor-specific code (port/starboard/combined).
    pub data_source: u8,
    /// Side, 0 = port, 1 = starboard.
    pub side: u8,
    /// Model number, vendor-specific code.
    pub model_number: u16,
    /// Frequency, kHz.
    pub frequency: u16,
    /// Echosounder type, vendor-specific code.
    pub echosounder_type: u16,
}

impl GeoSwathPlus {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<GeoSwathPlus> {
        Ok(GeoSwathPlus {
            data_source: r.read_u8()?,
            side: r.read_u8()?,
            model_number: r.read_u16()?,
            frequency: r.read_u16()?,
            echosounder_type: r.read_u16()?,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_u8(self.data_source)?;
        w.write_u8(self.side)?;
        w.write_u16(self.model_number)?;
        w.write_u16(self.frequency)?;
        w.write_u16(self.echosounder_type)
    }
}

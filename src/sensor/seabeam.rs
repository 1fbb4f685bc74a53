use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;

/// SeaBeam and SASS-family sensor-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeaBeam {
    /// EclipseTime: hundredths of a second into the ping.
    pub eclipse_time: u16,
}

impl SeaBeam {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<SeaBeam> {
        Ok(SeaBeam {
            eclipse_time: r.read_u16()?,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_u16(self.eclipse_time)
    }
}

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;
use crate::time::Time;

/// A combined horizontal/vertical navigation-error estimate, the successor to
/// [`crate::record::NavigationError`] used once vertical positioning (GPS height, RTK) was
/// tracked alongside horizontal position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HvNavigationError {
    /// Time of the estimate.
    pub time: Time,
    /// Estimated record number the error applies to.
    pub record_id: u32,
    /// Horizontal position error estimate, meters.
    pub horizontal_error: f64,
    /// Vertical position error estimate, meters.
    pub vertical_error: f64,
    /// Positioning method in effect, vendor/source-specific code.
    pub positioning_method: u8,
}

impl HvNavigationError {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<HvNavigationError> {
        let time = Time::read_from(r)?;
        let record_id = r.read_u32()?;
        let horizontal_error = r.read_u16()? as f64 / 100.0;
        let vertical_error = r.read_u16()? as f64 / 100.0;
        let positioning_method = r.read_u8()?;
        Ok(HvNavigationError {
            time,
            record_id,
            horizontal_error,
            vertical_error,
            positioning_method,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        self.time.write_to(w)?;
        w.write_u32(self.record_id)?;
        w.write_u16((self.horizontal_error * 100.0).round() as u16)?;
        w.write_u16((self.vertical_error * 100.0).round() as u16)?;
        w.write_u8(self.positioning_method)
    }
}

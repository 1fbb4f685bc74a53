use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;
use crate::time::Time;

/// A navigation-error estimate: one horizontal uncertainty radius at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavigationError {
    /// Time of the estimate.
    pub time: Time,
    /// Estimated record number the error applies to.
    pub record_id: u32,
    /// Horizontal position error estimate, meters.
    pub horizontal_error: f64,
}

impl NavigationError {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<NavigationError> {
        let time = Time::read_from(r)?;
        let record_id = r.read_u32()?;
        let horizontal_error = r.read_u16()? as f64 / 100.0;
        Ok(NavigationError {
            time,
            record_id,
            horizontal_error,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        self.time.write_to(w)?;
        w.write_u32(self.record_id)?;
        w.write_u16((self.horizontal_error * 100.0).round() as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_error_roundtrips() {
        let n = NavigationError {
            time: Time::new(1, 0),
            record_id: 42,
            horizontal_error: 2.5,
        };
        let mut w = ByteWriter::new();
        n.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        let mut r = ByteReader::new(&bytes);
        let decoded = NavigationError::read_from(&mut r).unwrap();
        assert_eq!(n.record_id, decoded.record_id);
        assert!((n.horizontal_error - decoded.horizontal_error).abs() < 0.01);
    }
}

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;
use crate::time::Time;

/// A swath-bathymetry summary: the bounding extent of a survey segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwathBathySummary {
    /// Time of the first ping summarized.
    pub start_time: Time,
    /// Time of the last ping summarized.
    pub end_time: Time,
    /// Minimum latitude, decimal degrees.
    pub min_latitude: f64,
    /// Minimum longitude, decimal degrees.
    pub min_longitude: f64,
    /// Maximum latitude, decimal degrees.
    pub max_latitude: f64,
    /// Maximum longitude, decimal degrees.
    pub max_longitude: f64,
    /// Shallowest depth observed, meters.
    pub min_depth: f64,
    /// Deepest depth observed, meters.
    pub max_depth: f64,
}

impl SwathBathySummary {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<SwathBathySummary> {
        let start_time = Time::read_from(r)?;
        let end_time = Time::read_from(r)?;
        let min_latitude = r.read_i32()? as f64 / 1.0e7;
        let min_longitude = r.read_i32()? as f64 / 1.0e7;
        let max_latitude = r.read_i32()? as f64 / 1.0e7;
        let max_longitude = r.read_i32()? as f64 / 1.0e7;
        let min_depth = r.read_i32()? as f64 / 100.0;
        let max_depth = r.read_i32()? as f64 / 100.0;
        Ok(SwathBathySummary {
            start_time,
            end_time,
            min_latitude,
            min_longitude,
            max_latitude,
            max_longitude,
            min_depth,
            max_depth,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        self.start_time.write_to(w)?;
        self.end_time.write_to(w)?;
        w.write_i32((self.min_latitude * 1.0e7).round() as i32)?;
        w.write_i32((self.min_longitude * 1.0e7).round() as i32)?;
        w.write_i32((self.max_latitude * 1.0e7).round() as i32)?;
        w.write_i32((self.max_longitude * 1.0e7).round() as i32)?;
        w.write_i32((self.min_depth * 100.0).round() as i32)?;
        w.write_i32((self.max_depth * 100.0).round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_roundtrips() {
        let s = SwathBathySummary {
            start_time: Time::new(1_000, 0),
            end_time: Time::new(2_000, 0),
            min_latitude: 10.5,
            min_longitude: -20.25,
            max_latitude: 11.0,
            max_longitude: -19.75,
            min_depth: 5.0,
            max_depth: 100.0,
        };
        let mut w = ByteWriter::new();
        s.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        let mut r = ByteReader::new(&bytes);
        let decoded = SwathBathySummary::read_from(&mut r).unwrap();
        assert_eq!(s.start_time, decoded.start_time);
        assert!((s.min_latitude - decoded.min_latitude).abs() < 1e-6);
        assert!((s.max_depth - decoded.max_depth).abs() < 1e-6);
    }
}

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;
use crate::time::Time;

/// A sound-velocity profile: paired depth/velocity samples at a location and time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SoundVelocityProfile {
    /// Time the profile was observed.
    pub observation_time: Time,
    /// Time the profile was applied to subsequent pings.
    pub application_time: Time,
    /// Latitude where the profile was observed, decimal degrees.
    pub latitude: f64,
    /// Longitude where the profile was observed, decimal degrees.
    pub longitude: f64,
    /// `(depth meters, sound velocity meters/second)` pairs, increasing in depth.
    pub samples: Vec<(f64, f64)>,
}

impl SoundVelocityProfile {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<SoundVelocityProfile> {
        let observation_time = Time::read_from(r)?;
        let application_time = Time::read_from(r)?;
        let latitude = r.read_i32()? as f64 / 1.0e7;
        let longitude = r.read_i32()? as f64 / 1.0e7;
        let count = r.read_u32()?;
        let mut samples = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let depth = r.read_u32()? as f64 / 100.0;
            let velocity = r.read_u32()? as f64 / 100.0;
            samples.push((depth, velocity));
        }
        Ok(SoundVelocityProfile {
            observation_time,
            application_time,
            latitude,
            longitude,
            samples,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        self.observation_time.write_to(w)?;
        self.application_time.write_to(w)?;
        w.write_i32((self.latitude * 1.0e7).round() as i32)?;
        w.write_i32((self.longitude * 1.0e7).round() as i32)?;
        w.write_u32(self.samples.len() as u32)?;
        for &(depth, velocity) in &self.samples {
            w.write_u32((depth * 100.0).round() as u32)?;
            w.write_u32((velocity * 100.0).round() as u32)?;
        }
        Ok(())
    }
}

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;
use crate::time::Time;

/// A sensor-parameters record: the analogue of [`ProcessingParameters`] for the sonar's own
/// configuration (transducer offsets, sensor serial numbers) rather than post-processing
/// corrections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SensorParameters {
    /// Time these parameters took effect.
    pub time: Time,
    /// Parameter strings.
    pub params: Vec<String>,
}

impl SensorParameters {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<SensorParameters> {
        let time = Time::read_from(r)?;
        let count = r.read_u16()?;
        let mut params = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let len = r.read_u16()? as usize;
            params.push(r.read_fixed_string(len)?);
        }
        Ok(SensorParameters { time, params })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        self.time.write_to(w)?;
        w.write_u16(self.params.len() as u16)?;
        for param in &self.params {
            w.write_u16(param.len() as u16)?;
            w.write_bytes(param.as_bytes())?;
        }
        Ok(())
    }
}

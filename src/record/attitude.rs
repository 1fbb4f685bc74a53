use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;
use crate::time::Time;

/// One attitude sample's offset from the record's base time, plus its pitch/roll/heave/heading.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttitudeSample {
    /// Milliseconds after the record's base time.
    pub delta_ms: u16,
    /// Pitch, degrees (positive bow up).
    pub pitch: f64,
    /// Roll, degrees (positive port up).
    pub roll: f64,
    /// Heave, meters (positive up).
    pub heave: f64,
    /// Heading, degrees true.
    pub heading: f64,
}

/// A batch of attitude measurements sharing one base time, each subsequent sample given as
/// a millisecond delta from it rather than a full timestamp (§4.E).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attitude {
    /// Base time the deltas in `samples` are measured from.
    pub base_time: Time,
    /// The attitude samples, in increasing time order.
    pub samples: Vec<AttitudeSample>,
}

impl Attitude {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<Attitude> {
        let base_time = Time::read_from(r)?;
        let count = r.read_u16()?;
        let mut samples = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let delta_ms = r.read_u16()?;
            let pitch = r.read_i16()? as f64 / 100.0;
            let roll = r.read_i16()? as f64 / 100.0;
            let heave = r.read_i16()? as f64 / 100.0;
            let heading = r.read_u16()? as f64 / 100.0;
            samples.push(AttitudeSample {
                delta_ms,
                pitch,
                roll,
                heave,
                heading,
            });
        }
        Ok(Attitude { base_time, samples })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        self.base_time.write_to(w)?;
        w.write_u16(self.samples.len() as u16)?;
        for sample in &self.samples {
            w.write_u16(sample.delta_ms)?;
            w.write_i16((sample.pitch * 100.0).round() as i16)?;
            w.write_i16((sample.roll * 100.0).round() as i16)?;
            w.write_i16((sample.heave * 100.0).round() as i16)?;
            w.write_u16((sample.heading * 100.0).round() as u16)?;
        }
        Ok(())
    }

    /// The absolute time of the `i`th sample, folding its millisecond delta onto the base
    /// time (deltas only ever move forward within a batch, so no modular wraparound is
    /// needed here beyond ordinary nanosecond carry).
    pub fn sample_time(&self, i: usize) -> Option<Time> {
        self.samples.get(i).map(|s| {
            let delta_seconds = s.delta_ms as i64 / 1000;
            let delta_nanos = (s.delta_ms as i64 % 1000) * 1_000_000;
            let mut seconds = self.base_time.seconds + delta_seconds;
            let mut nanoseconds = self.base_time.nanoseconds as i64 + delta_nanos;
            if nanoseconds >= 1_000_000_000 {
                seconds += 1;
                nanoseconds -= 1_000_000_000;
            }
            Time::new(seconds, nanoseconds as i32)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attitude_roundtrips() {
        let a = Attitude {
            base_time: Time::new(1000, 0),
            samples: vec![
                AttitudeSample {
                    delta_ms: 0,
                    pitch: 1.5,
                    roll: -0.5,
                    heave: 0.1,
                    heading: 90.0,
                },
                AttitudeSample {
                    delta_ms: 100,
                    pitch: 1.6,
                    roll: -0.4,
                    heave: 0.2,
                    heading: 90.5,
                },
            ],
        };
        let mut w = ByteWriter::new();
        a.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        let mut r = ByteReader::new(&bytes);
        let decoded = Attitude::read_from(&mut r).unwrap();
        assert_eq!(a.samples.len(), decoded.samples.len());
        assert!((a.samples[1].heading - decoded.samples[1].heading).abs() < 0.01);
    }

    #[test]
    fn sample_time_folds_delta_onto_base() {
        let a = Attitude {
            base_time: Time::new(1000, 500_000_000),
            samples: vec![AttitudeSample {
                delta_ms: 700,
                ..Default::default()
            }],
        };
        let t = a.sample_time(0).unwrap();
        assert_eq!(1001, t.seconds);
        assert_eq!(200_000_000, t.nanoseconds);
    }
}

//! The two-field time pair carried by every GSF record.

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Seconds and nanoseconds since the Unix epoch, as carried on the wire by every GSF record
/// that has a timestamp (ping, SVP, attitude, nav error, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Time {
    /// Integer seconds since the epoch.
    pub seconds: i64,
    /// Nanoseconds within the second, `0..1_000_000_000`.
    pub nanoseconds: i32,
}

impl Time {
    /// Creates a new time pair.
    pub fn new(seconds: i64, nanoseconds: i32) -> Time {
        Time {
            seconds,
            nanoseconds,
        }
    }

    pub(crate) fn read_from(r: &mut ByteReader) -> Result<Time> {
        let seconds = r.read_i32()? as i64;
        let nanoseconds = r.read_i32()?;
        Ok(Time::new(seconds, nanoseconds))
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_i32(self.seconds as i32)?;
        w.write_i32(self.nanoseconds)
    }

    /// Seconds since the epoch as an `f64`, matching the ESF `time_d` representation.
    pub fn as_f64(&self) -> f64 {
        self.seconds as f64 + self.nanoseconds as f64 / 1.0e9
    }

    /// Builds a `Time` from an ESF-style `f64` seconds-since-epoch value.
    pub fn from_f64(time_d: f64) -> Time {
        let seconds = time_d.floor() as i64;
        let nanoseconds = ((time_d - seconds as f64) * 1.0e9).round() as i32;
        Time::new(seconds, nanoseconds)
    }

    /// Converts to a `chrono` UTC timestamp, for display purposes only.
    pub fn to_chrono(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds.max(0) as u32)
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Time) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Time) -> Ordering {
        (self.seconds, self.nanoseconds).cmp(&(other.seconds, other.nanoseconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f64_roundtrip_is_close() {
        let t = Time::new(100, 500_000_000);
        let back = Time::from_f64(t.as_f64());
        assert_eq!(t.seconds, back.seconds);
        assert!((t.nanoseconds - back.nanoseconds).abs() < 10);
    }

    #[test]
    fn ordering_compares_nanoseconds_too() {
        assert!(Time::new(1, 0) < Time::new(1, 1));
        assert!(Time::new(1, 999) < Time::new(2, 0));
    }
}

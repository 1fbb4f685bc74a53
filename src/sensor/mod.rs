//! Sensor-specific ping subrecords (§4.D).
//!
//! Every swath-bathymetry ping may carry one sensor-specific subrecord
//! describing instrument settings particular to the sonar that produced it.
//! `gsf_dec.c` dispatches on a tag byte to roughly forty `Decode*Specific`
//! functions; this module mirrors that shape with a `match` over
//! [`SensorSpecific`] variants, one fixed-layout struct per dialect family,
//! and a total fallback for tags this crate does not special-case.
//!
//! Adding a dialect this crate doesn't yet cover is one variant plus one
//! `read_from`/`write_to` pair against the shared [`ByteReader`]/[`ByteWriter`]
//! primitives; nothing else in the decode path needs to change.

mod deltat;
mod elac;
mod geoswath;
mod klein;
mod r2sonic;
mod reson;
mod seabat;
mod seabeam;
mod simrad;

pub use deltat::DeltaT;
pub use elac::ElacMkII;
pub use geoswath::GeoSwathPlus;
pub use klein::Klein5410Bss;
pub use r2sonic::R2Sonic;
pub use reson::{Reson7100, Reson8100};
pub use seabat::{SeaBat, SeaBatII};
pub use seabeam::SeaBeam;
pub use simrad::{Em1xx, Em3Or4};

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;

/// A sensor-specific ping subrecord, dispatched on the tag the record header carries.
#[derive(Clone, Debug, PartialEq)]
pub enum SensorSpecific {
    /// SeaBeam and SASS-family multibeam.
    SeaBeam(SeaBeam),
    /// Simrad EM100/EM1000/EM12/EM121 family.
    Em1xx(Em1xx),
    /// Simrad EM3000/EM3002/EM300/EM302/EM710/EM712/EM122/EM124 family.
    Em3Or4(Em3Or4),
    /// Reson SeaBat 8100 series.
    Reson8100(Reson8100),
    /// Reson 7100 series.
    Reson7100(Reson7100),
    /// Reson SeaBat (non-8100) family.
    SeaBat(SeaBat),
    /// Reson SeaBat II family.
    SeaBatII(SeaBatII),
    /// Elac BottomChart MkII.
    ElacMkII(ElacMkII),
    /// GeoAcoustics GeoSwath+.
    GeoSwathPlus(GeoSwathPlus),
    /// Klein 5410 Bss sidescan/bathymetry.
    Klein5410Bss(Klein5410Bss),
    /// Odom DeltaT.
    DeltaT(DeltaT),
    /// R2Sonic 2022/2024/3100.
    R2Sonic(R2Sonic),
    /// A dialect this crate does not decode into a typed struct. The tag is preserved
    /// so the record can still be re-encoded byte-for-byte.
    Unrecognized {
        /// The tag byte that selected this variant.
        tag: u8,
        /// The undecoded subrecord payload.
        payload: Vec<u8>,
    },
}

impl SensorSpecific {
    /// Decodes a sensor-specific subrecord of `size` bytes tagged `tag`.
    pub fn read_from(r: &mut ByteReader, tag: u8, size: usize) -> Result<SensorSpecific> {
        let start = r.position();
        let value = match tag {
            1 => SensorSpecific::SeaBeam(SeaBeam::read_from(r)?),
            2 => SensorSpecific::Em1xx(Em1xx::read_from(r)?),
            3 => SensorSpecific::Em3Or4(Em3Or4::read_from(r)?),
            4 => SensorSpecific::Reson8100(Reson8100::read_from(r)?),
            5 => SensorSpecific::SeaBat(SeaBat::read_from(r)?),
            6 => SensorSpecific::SeaBatII(SeaBatII::read_from(r)?),
            7 => SensorSpecific::ElacMkII(ElacMkII::read_from(r)?),
            8 => SensorSpecific::GeoSwathPlus(GeoSwathPlus::read_from(r)?),
            9 => SensorSpecific::Klein5410Bss(Klein5410Bss::read_from(r)?),
            10 => SensorSpecific::DeltaT(DeltaT::read_from(r)?),
            11 => SensorSpecific::Reson7100(Reson7100::read_from(r)?),
            12 => SensorSpecific::R2Sonic(R2Sonic::read_from(r)?),
            _ => {
                let consumed = r.position() - start;
                let remaining = size.saturating_sub(consumed);
                let payload = r.read_bytes(remaining)?.to_vec();
                return Ok(SensorSpecific::Unrecognized { tag, payload });
            }
        };
        let consumed = r.position() - start;
        if consumed < size {
            r.skip(size - consumed)?;
        }
        Ok(value)
    }

    /// Encodes this subrecord's payload, without the enclosing record envelope.
    pub fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        match self {
            SensorSpecific::SeaBeam(v) => v.write_to(w),
            SensorSpecific::Em1xx(v) => v.write_to(w),
            SensorSpecific::Em3Or4(v) => v.write_to(w),
            SensorSpecific::Reson8100(v) => v.write_to(w),
            SensorSpecific::Reson7100(v) => v.write_to(w),
            SensorSpecific::SeaBat(v) => v.write_to(w),
            SensorSpecific::SeaBatII(v) => v.write_to(w),
            SensorSpecific::ElacMkII(v) => v.write_to(w),
            SensorSpecific::GeoSwathPlus(v) => v.write_to(w),
            SensorSpecific::Klein5410Bss(v) => v.write_to(w),
            SensorSpecific::DeltaT(v) => v.write_to(w),
            SensorSpecific::R2Sonic(v) => v.write_to(w),
            SensorSpecific::Unrecognized { payload, .. } => w.write_bytes(payload),
        }
    }

    /// The tag byte identifying this dialect.
    pub fn tag(&self) -> u8 {
        match self {
            SensorSpecific::SeaBeam(_) => 1,
            SensorSpecific::Em1xx(_) => 2,
            SensorSpecific::Em3Or4(_) => 3,
            SensorSpecific::Reson8100(_) => 4,
            SensorSpecific::SeaBat(_) => 5,
            SensorSpecific::SeaBatII(_) => 6,
            SensorSpecific::ElacMkII(_) => 7,
            SensorSpecific::GeoSwathPlus(_) => 8,
            SensorSpecific::Klein5410Bss(_) => 9,
            SensorSpecific::DeltaT(_) => 10,
            SensorSpecific::Reson7100(_) => 11,
            SensorSpecific::R2Sonic(_) => 12,
            SensorSpecific::Unrecognized { tag, .. } => *tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_tag_round_trips_its_payload() {
        let payload = vec![1, 2, 3, 4, 5];
        let mut w = ByteWriter::new();
        w.write_bytes(&payload).unwrap();
        let bytes = w.into_inner();
        let mut r = ByteReader::new(&bytes);
        let decoded = SensorSpecific::read_from(&mut r, 250, payload.len()).unwrap();
        assert_eq!(
            SensorSpecific::Unrecognized {
                tag: 250,
                payload: payload.clone()
            },
            decoded
        );
        let mut w2 = ByteWriter::new();
        decoded.write_to(&mut w2).unwrap();
        assert_eq!(payload, w2.into_inner());
    }
}

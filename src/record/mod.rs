//! The GSF record envelope and per-type record bodies (§4.E).
//!
//! Every record on the wire is `{u32 data_size}{u32 checksum_flag:1 |
//! record_id:31}{payload}{optional u32 checksum}`. `data_size` counts the
//! bytes from the id word onward (including the checksum, when present), so
//! a reader can always skip a record it does not recognize without
//! understanding its payload — exactly what `gsfRead` does for unrecognized
//! top-level record ids in the original.

mod attitude;
mod comment;
mod history;
mod hv_nav_error;
mod nav_error;
mod ping;
mod processing_params;
mod sensor_params;
mod summary;
mod svp;

pub use attitude::Attitude;
pub use comment::Comment;
pub use history::History;
pub use hv_nav_error::HvNavigationError;
pub use nav_error::NavigationError;
pub use ping::{Ping, SingleBeamPing, SwathBathyPing};
pub use processing_params::ProcessingParameters;
pub use sensor_params::SensorParameters;
pub use summary::SwathBathySummary;
pub use svp::SoundVelocityProfile;

use crate::byteio::{ByteReader, ByteWriter};
use crate::error::{GsfError, Result};
use crate::file::FileTable;

/// A record id, one per distinct record type the format defines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// The file header (banner and version string).
    Header,
    /// A swath-bathymetry summary.
    SwathBathySummary,
    /// A multibeam swath-bathymetry ping.
    SwathBathyPing,
    /// A single-beam echosounder ping.
    SingleBeamPing,
    /// A sound velocity profile.
    SoundVelocityProfile,
    /// A processing parameters record.
    ProcessingParameters,
    /// A sensor parameters record.
    SensorParameters,
    /// A free-text comment.
    Comment,
    /// A processing history entry.
    History,
    /// A navigation error estimate.
    NavigationError,
    /// A horizontal/vertical navigation error estimate.
    HvNavigationError,
    /// An attitude (pitch/roll/heave/heading) time series.
    Attitude,
    /// A record id this crate does not recognize; skipped whole on read.
    Unknown(u32),
}

impl RecordId {
    fn from_wire(id: u32) -> RecordId {
        match id {
            1 => RecordId::Header,
            2 => RecordId::SwathBathySummary,
            3 => RecordId::SwathBathyPing,
            4 => RecordId::SoundVelocityProfile,
            5 => RecordId::ProcessingParameters,
            6 => RecordId::SensorParameters,
            7 => RecordId::Comment,
            8 => RecordId::History,
            9 => RecordId::NavigationError,
            10 => RecordId::SingleBeamPing,
            11 => RecordId::HvNavigationError,
            12 => RecordId::Attitude,
            other => RecordId::Unknown(other),
        }
    }

    fn to_wire(self) -> u32 {
        match self {
            RecordId::Header => 1,
            RecordId::SwathBathySummary => 2,
            RecordId::SwathBathyPing => 3,
            RecordId::SoundVelocityProfile => 4,
            RecordId::ProcessingParameters => 5,
            RecordId::SensorParameters => 6,
            RecordId::Comment => 7,
            RecordId::History => 8,
            RecordId::NavigationError => 9,
            RecordId::SingleBeamPing => 10,
            RecordId::HvNavigationError => 11,
            RecordId::Attitude => 12,
            RecordId::Unknown(id) => id,
        }
    }
}

/// A decoded record: its id and, for recognized ids, its typed body.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    /// File header banner.
    Header(String),
    /// Summary.
    Summary(SwathBathySummary),
    /// Multibeam ping.
    Ping(Ping),
    /// Sound velocity profile.
    Svp(SoundVelocityProfile),
    /// Processing parameters.
    ProcessingParameters(ProcessingParameters),
    /// Sensor parameters.
    SensorParameters(SensorParameters),
    /// Comment.
    Comment(Comment),
    /// History.
    History(History),
    /// Nav error.
    NavigationError(NavigationError),
    /// Horizontal/vertical nav error.
    HvNavigationError(HvNavigationError),
    /// Attitude time series.
    Attitude(Attitude),
    /// A record this crate does not parse. Its raw payload is kept so the file can be
    /// rewritten without losing it.
    Unrecognized { id: u32, payload: Vec<u8> },
}

const CHECKSUM_FLAG: u32 = 1 << 31;

/// Reads one full record (envelope plus payload) from `r`, advancing `ft`'s scale-factor
/// table as a side effect when the record is a ping carrying fresh scale factors.
pub fn read_record(r: &mut ByteReader, ft: &mut FileTable) -> Result<Record> {
    let data_size = r.read_u32()?;
    let word = r.read_u32()?;
    let has_checksum = word & CHECKSUM_FLAG != 0;
    let id = RecordId::from_wire(word & !CHECKSUM_FLAG);
    let payload_size = data_size as usize - if has_checksum { 4 } else { 0 };
    let start = r.position();

    let record = match id {
        RecordId::Header => Record::Header(r.read_fixed_string(payload_size)?),
        RecordId::SwathBathySummary => Record::Summary(SwathBathySummary::read_from(r)?),
        RecordId::SwathBathyPing => {
            Record::Ping(Ping::Swath(SwathBathyPing::read_from(r, ft, payload_size)?))
        }
        RecordId::SingleBeamPing => {
            Record::Ping(Ping::SingleBeam(SingleBeamPing::read_from(r)?))
        }
        RecordId::SoundVelocityProfile => Record::Svp(SoundVelocityProfile::read_from(r)?),
        RecordId::ProcessingParameters => {
            Record::ProcessingParameters(ProcessingParameters::read_from(r)?)
        }
        RecordId::SensorParameters => Record::SensorParameters(SensorParameters::read_from(r)?),
        RecordId::Comment => Record::Comment(Comment::read_from(r)?),
        RecordId::History => Record::History(History::read_from(r)?),
        RecordId::NavigationError => Record::NavigationError(NavigationError::read_from(r)?),
        RecordId::HvNavigationError => {
            Record::HvNavigationError(HvNavigationError::read_from(r)?)
        }
        RecordId::Attitude => Record::Attitude(Attitude::read_from(r)?),
        RecordId::Unknown(raw) => {
            log::debug!("skipping unrecognized record id {raw} ({payload_size} bytes)");
            let payload = r.read_bytes(payload_size)?.to_vec();
            Record::Unrecognized { id: raw, payload }
        }
    };

    let consumed = r.position() - start;
    if consumed < payload_size {
        r.skip(payload_size - consumed)?;
    } else if consumed > payload_size {
        return Err(GsfError::CorruptRecord {
            offset: start,
            reason: format!("record body consumed {consumed} bytes, declared {payload_size}"),
        });
    }
    if has_checksum {
        r.skip(4)?;
    }
    Ok(record)
}

/// Encodes `record` as a complete envelope-plus-payload, optionally appending a checksum.
pub fn write_record(w: &mut ByteWriter, record: &Record, with_checksum: bool) -> Result<()> {
    let mut body = ByteWriter::new();
    let id = match record {
        Record::Header(banner) => {
            body.write_bytes(banner.as_bytes())?;
            RecordId::Header
        }
        Record::Summary(s) => {
            s.write_to(&mut body)?;
            RecordId::SwathBathySummary
        }
        Record::Ping(Ping::Swath(p)) => {
            p.write_to(&mut body)?;
            RecordId::SwathBathyPing
        }
        Record::Ping(Ping::SingleBeam(p)) => {
            p.write_to(&mut body)?;
            RecordId::SingleBeamPing
        }
        Record::Svp(s) => {
            s.write_to(&mut body)?;
            RecordId::SoundVelocityProfile
        }
        Record::ProcessingParameters(p) => {
            p.write_to(&mut body)?;
            RecordId::ProcessingParameters
        }
        Record::SensorParameters(p) => {
            p.write_to(&mut body)?;
            RecordId::SensorParameters
        }
        Record::Comment(c) => {
            c.write_to(&mut body)?;
            RecordId::Comment
        }
        Record::History(h) => {
            h.write_to(&mut body)?;
            RecordId::History
        }
        Record::NavigationError(n) => {
            n.write_to(&mut body)?;
            RecordId::NavigationError
        }
        Record::HvNavigationError(n) => {
            n.write_to(&mut body)?;
            RecordId::HvNavigationError
        }
        Record::Attitude(a) => {
            a.write_to(&mut body)?;
            RecordId::Attitude
        }
        Record::Unrecognized { id, payload } => {
            body.write_bytes(payload)?;
            RecordId::Unknown(*id)
        }
    };

    let payload = body.into_inner();
    let data_size = payload.len() as u32 + if with_checksum { 4 } else { 0 };
    w.write_u32(data_size)?;
    let mut word = id.to_wire();
    if with_checksum {
        word |= CHECKSUM_FLAG;
    }
    w.write_u32(word)?;
    w.write_bytes(&payload)?;
    if with_checksum {
        w.write_u32(crc32(&payload))?;
    }
    Ok(())
}

/// CRC-32 (IEEE 802.3 polynomial), used for the optional per-record checksum.
fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

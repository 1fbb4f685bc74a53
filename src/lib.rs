//! Reads and writes swath bathymetry sonar data stored in the [Generic Sensor
//! Format](https://www.leidos.com/products/ocean-marine) (GSF), and applies [Edit Save
//! File](https://www.mbari.org/) (ESF) beam-flag edits to it.
//!
//! GSF is a big-endian, versioned container format built from typed, length-prefixed
//! records. A ping record carries a variable-geometry set of per-beam arrays (depth,
//! travel time, amplitude, ...) plus a sensor-specific subrecord identifying which of the
//! dozen-odd supported sonar dialects produced it. An ESF is a companion file recording
//! per-beam edit events (flag/unflag/filter/zero/sonar) made during manual or automated
//! data cleaning, applied against a ping sequence by matching on time and beam number.
//!
//! # Reading a GSF file
//!
//! ```no_run
//! use gsf::{Reader, Record};
//!
//! let mut reader = Reader::from_path("survey.gsf").unwrap();
//! while let Some(record) = reader.read().unwrap() {
//!     if let Record::Ping(gsf::record::Ping::Swath(ping)) = record {
//!         println!("{} beams at {:?}", ping.number_beams, ping.time);
//!     }
//! }
//! ```
//!
//! # Writing a GSF file
//!
//! ```no_run
//! use gsf::{Writer, Record};
//!
//! let mut writer = Writer::create("out.gsf", "GSF-v03.00").unwrap();
//! writer.write(&Record::Comment(gsf::record::Comment {
//!     time: gsf::Time::new(0, 0),
//!     text: "created by gsf".to_string(),
//! })).unwrap();
//! writer.flush().unwrap();
//! ```
//!
//! # Applying an ESF to a ping
//!
//! ```no_run
//! use gsf::esf::{EsfStore, OutputMode, apply_edits};
//! use gsf::Time;
//!
//! let mut store = EsfStore::open("survey.esf", true, OutputMode::NoWrite).unwrap();
//! let mut beamflags = vec![0u8; 8];
//! let edits = store.edits().to_vec();
//! let mut edits = edits;
//! let (cursor, _applied) = apply_edits(
//!     &mut edits,
//!     store.cursor(),
//!     Time::new(100, 0),
//!     0,
//!     &mut beamflags,
//!     store.version(),
//!     store.mode(),
//! );
//! store.set_cursor(cursor);
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

pub mod array;
pub mod byteio;
pub mod esf;
pub mod file;
pub mod flag;
pub mod intensity;
pub mod record;
pub mod scale;
pub mod sensor;
pub mod time;

mod reader;
mod writer;

pub use error::GsfError;
pub use file::FileTable;
pub use reader::Reader;
pub use record::Record;
pub use time::Time;
pub use writer::Writer;

mod error;

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GsfError>;

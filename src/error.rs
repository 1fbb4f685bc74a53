//! Crate-specific errors.

use thiserror::Error;

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GsfError>;

/// Errors produced by the GSF codec and the ESF engine.
///
/// This is a single enum rather than one per subsystem because both share
/// the byte primitive and the I/O boundary, and because callers that read a
/// GSF file and apply an ESF to it want one error channel, not two.
#[derive(Debug, Error)]
pub enum GsfError {
    /// A decode ran off the end of the buffer it was given.
    #[error("short buffer: needed {needed} bytes, had {available}")]
    ShortBuffer {
        /// Bytes the decoder needed.
        needed: usize,
        /// Bytes actually remaining.
        available: usize,
    },

    /// A record or subrecord's internal structure could not be parsed.
    #[error("corrupt record at offset {offset}: {reason}")]
    CorruptRecord {
        /// Byte offset (relative to the record payload) where the problem was found.
        offset: usize,
        /// Human-readable reason.
        reason: String,
    },

    /// A ping declared zero or a negative number of beams.
    #[error("invalid beam count: {0}")]
    InvalidBeamCount(i32),

    /// A scale factor was missing, zero, or out of the legal multiplier range.
    #[error("bad scale factor for array subrecord {id}: {reason}")]
    BadScaleFactor {
        /// The array subrecord id (1..=31).
        id: u8,
        /// Human-readable reason.
        reason: String,
    },

    /// A tag outside the array-subrecord range of 1..=31 appeared in a scale-factor block.
    #[error("unrecognized array subrecord id {0} in scale factor table")]
    UnrecognizedArraySubrecordId(u8),

    /// A scale-factor subrecord declared more than 31 array subrecords.
    #[error("too many array subrecords: {0} (max 31)")]
    TooManyArraySubrecords(u32),

    /// A sub-tag was not recognized, and whether that is fatal depends on whether the
    /// remaining record size can absorb it.
    #[error("unrecognized subrecord tag {tag} would overflow the enclosing record")]
    UnrecognizedSubrecord {
        /// The tag byte that was not recognized.
        tag: u8,
    },

    /// A buffer could not be grown to the requested size.
    #[error("out of memory growing buffer to {0} elements")]
    OutOfMemory(usize),

    /// Failed to open a file.
    #[error("failed to open {path}: {source}")]
    OpenFail {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O read failed.
    #[error("read failed: {0}")]
    ReadFail(#[from] std::io::Error),

    /// An I/O write failed.
    #[error("write failed: {0}")]
    WriteFail(String),

    /// End of file was reached where more data was expected.
    #[error("unexpected end of file")]
    Eof,

    /// No edit data has been loaded into an ESF handle.
    #[error("no data loaded")]
    NoDataLoaded,

    /// A record was a comment record, surfaced as a control-flow sentinel by callers that
    /// special-case them rather than as a decode failure.
    #[error("comment record")]
    CommentRecord,

    /// A catch-all for conditions that don't merit their own variant.
    #[error("{0}")]
    Other(String),
}

//! The Edit Save File (ESF) engine (§4.G/§4.H).
//!
//! An ESF records beam-flag edits made during manual or automated cleaning,
//! independently of the GSF file they apply to, so edits can be reviewed,
//! undone, and re-applied without mutating the original survey data. Each
//! edit names a ping by time and a beam by a multiplicity-offset beam
//! number (`beam_offset = ping_multiplicity * 1e8`, so pings that
//! legitimately share a timestamp — re-pinged or sub-sampled data — don't
//! collide); applying an edit stream to a ping sequence is a time-tolerant
//! merge, matching MB-System's `mb_esf_apply`.

mod apply;
mod io;
mod sort;

pub use apply::{apply_edits, Action, AppliedEdit};
pub use io::{EsfMode, EsfStore, OutputMode};
pub use sort::hybrid_merge_sort;

use crate::time::Time;

/// The beam-numbering multiplicity offset: ping multiplicity `m`'s beams are numbered
/// starting at `m * 1e8`, so a beam number alone tells you both the physical beam index
/// (`beam_number % BEAM_OFFSET`) and which repeat ping it was observed on.
pub const BEAM_OFFSET: i64 = 100_000_000;

/// One recorded edit: when, which beam (multiplicity-offset), and what to do to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edit {
    /// Time of the ping the edit targets.
    pub time: Time,
    /// Multiplicity-offset beam number (`ping_multiplicity * BEAM_OFFSET + beam_index`).
    pub beam_number: i64,
    /// The edit action.
    pub action: Action,
    /// Diagnostic use counter, bumped by [`apply_edits`] every time this edit is considered:
    /// `+1` per application, `+1000` if the targeted beam was already unusable, `+10000` if
    /// the beam number doesn't fit the ping it matched.
    pub use_count: i32,
}

impl Edit {
    /// The plain beam index, with the multiplicity offset removed.
    pub fn beam_index(&self) -> i64 {
        self.beam_number % BEAM_OFFSET
    }

    /// The ping multiplicity this edit's beam number was offset by.
    pub fn ping_multiplicity(&self) -> i64 {
        self.beam_number / BEAM_OFFSET
    }
}

/// An in-memory ESF: a loaded, sorted list of edits ready to be applied or appended to.
#[derive(Clone, Debug, Default)]
pub struct Esf {
    edits: Vec<Edit>,
}

impl Esf {
    /// An empty ESF.
    pub fn new() -> Esf {
        Esf::default()
    }

    /// Loads and sorts `edits` the way `mb_esf_open` does for ESF format `version`: a full
    /// `(time, beam_number, action)` comparator for version 2 and later, or a
    /// millisecond-coarsened time comparator for version 1 files, whose on-disk timestamps
    /// never had finer resolution to begin with (§4.G, §8).
    pub fn load(edits: Vec<Edit>, version: u8) -> Esf {
        let mut edits = edits;
        io::sort_for_version(&mut edits, version);
        Esf { edits }
    }

    /// The edits, in sorted order.
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Mutable access to the edits, for in-place adjustments such as [`EsfStore::fix_timestamps`].
    pub fn edits_mut(&mut self) -> &mut [Edit] {
        &mut self.edits
    }

    /// Appends a new edit to the in-memory list without re-sorting (the append-at-write-time
    /// path assumes edits arrive in non-decreasing time order, as they do from a live
    /// cleaning session).
    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Whether any edits have been loaded.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

//! Applying loaded edits to a ping's beam flags (§4.G).
//!
//! This is a close port of `mb_esf_apply` in MB-System's `mb_esf.c`: find the
//! window of edits in `[firstedit, lastedit]` whose time falls within
//! tolerance of the ping and whose beam number falls in the ping's
//! multiplicity band, then walk every beam applying whichever edits target
//! it, in the order they were created, so the last one wins. Edits carry a
//! `use` counter that is bumped as a side effect (`+1` applied, `+1000`
//! skipped because the beam was already null-like, `+10000` for a beam
//! index that doesn't fit in this ping) — the literal semantics from the
//! source, not merely a paraphrase, since later diagnostic tooling depends
//! on the exact values.

use crate::esf::{Edit, EsfMode, BEAM_OFFSET};
use crate::flag;
use crate::time::Time;

/// The tolerance (seconds) within which an edit's timestamp is considered to match a
/// ping's, for ESF version 2 and later.
pub const MAX_TIME_DIFF: f64 = 0.0000011;
/// The coarser tolerance used for ESF version 1 files, whose timestamps were truncated to
/// millisecond granularity before being written.
pub const MAX_TIME_DIFF_V1: f64 = 0.0011;

/// One edit action (§6): the kind of flag change to apply to a beam. The discriminants
/// match the on-disk `i32` action codes exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    /// Manually flag the beam bad.
    Flag = 1,
    /// Clear all flags (the beam is good).
    Unflag = 2,
    /// Mark the beam as having no data.
    Zero = 3,
    /// Flag the beam bad via an automated filter.
    Filter = 4,
    /// Flag the beam bad due to a sonar-reported condition.
    Sonar = 5,
}

impl Action {
    /// Recovers an `Action` from its on-disk code, if it is one of the five legal values.
    pub fn from_i32(v: i32) -> Option<Action> {
        match v {
            1 => Some(Action::Flag),
            2 => Some(Action::Unflag),
            3 => Some(Action::Zero),
            4 => Some(Action::Filter),
            5 => Some(Action::Sonar),
            _ => None,
        }
    }

    /// The on-disk action code.
    pub fn to_i32(self) -> i32 {
        self as i32
    }

    fn apply_to(self, flag: u8) -> u8 {
        match self {
            Action::Flag => flag::set_flag_manual(flag),
            Action::Unflag => flag::set_flag_none(flag),
            Action::Zero => flag::set_flag_null(flag),
            Action::Filter => flag::set_flag_filter(flag),
            Action::Sonar => flag::set_flag_sonar(flag),
        }
    }
}

/// One edit that changed a ping's beamflag array, as it would be appended to the edit
/// stream file (§4.H).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppliedEdit {
    /// Time of the ping the edit was applied to.
    pub time: Time,
    /// Multiplicity-offset beam number the edit targeted.
    pub beam_number: i64,
    /// The action that ended up determining the beam's final flag.
    pub action: Action,
}

/// Applies every edit in `edits[cursor..]` that matches this ping's time and multiplicity
/// band to `beamflags`, returning the new search cursor (`start_next_search`) and the list
/// of beams whose flag actually changed, in the order they were visited.
///
/// `esf_version` selects the match tolerance (§4.G): version 1 files need a coarser window
/// because their on-disk timestamps were truncated to millisecond granularity.
pub fn apply_edits(
    edits: &mut [Edit],
    cursor: usize,
    ping_time: Time,
    multiplicity: i64,
    beamflags: &mut [u8],
    esf_version: u8,
    mode: EsfMode,
) -> (usize, Vec<AppliedEdit>) {
    let mut applied = Vec::new();
    if edits.is_empty() {
        return (cursor, applied);
    }

    let max_time_diff = if esf_version == 1 {
        MAX_TIME_DIFF_V1
    } else {
        MAX_TIME_DIFF
    };
    let ping_time_d = ping_time.as_f64();
    let beam_offset = multiplicity * BEAM_OFFSET;
    let beam_offset_max = beam_offset + BEAM_OFFSET;

    let mut first_edit = compute_first_edit(edits, cursor, ping_time_d, beam_offset, beam_offset_max, max_time_diff);
    let mut last_edit: isize = first_edit as isize - 1;
    let mut j = first_edit;
    while j < edits.len() && ping_time_d >= edits[j].time.as_f64() - max_time_diff {
        let diff = (edits[j].time.as_f64() - ping_time_d).abs();
        if diff < max_time_diff && edits[j].beam_number >= beam_offset && edits[j].beam_number < beam_offset_max {
            if (last_edit as i64) < first_edit as i64 {
                first_edit = j;
            }
            last_edit = j as isize;
        }
        j += 1;
    }

    if last_edit < first_edit as isize {
        return (cursor, applied);
    }
    let last_edit = last_edit as usize;

    let nbath = beamflags.len();
    for edit in edits.iter_mut().take(last_edit + 1).skip(first_edit) {
        let beam_index = edit.beam_number - beam_offset;
        if beam_index < 0 || beam_index as usize >= nbath {
            edit.use_count += 10_000;
        }
    }

    for i in 0..nbath {
        let ibeam = i as i64 + beam_offset;
        let original = beamflags[i];
        let mut changed_by = None;
        for edit in edits.iter_mut().take(last_edit + 1).skip(first_edit) {
            if edit.beam_number != ibeam || edit.use_count >= 100 {
                continue;
            }
            if flag::flag_ok(beamflags[i]) {
                beamflags[i] = edit.action.apply_to(beamflags[i]);
                edit.use_count += 1;
                changed_by = Some(edit.action);
            } else {
                edit.use_count += 1000;
            }
        }

        if changed_by.is_none() {
            match mode {
                EsfMode::ImplicitNull => beamflags[i] = flag::NULL,
                EsfMode::ImplicitGood => beamflags[i] = flag::NONE,
                EsfMode::Explicit => {}
            }
        }

        if beamflags[i] != original {
            applied.push(AppliedEdit {
                time: ping_time,
                beam_number: ibeam,
                action: changed_by.unwrap_or(Action::Unflag),
            });
        }
    }

    let mut next_cursor = last_edit + 1;
    if next_cursor >= edits.len() {
        next_cursor = edits.len().saturating_sub(1);
    }
    (next_cursor, applied)
}

/// Mirrors `mb_esf_apply`'s handling of a search cursor that no longer brackets the current
/// ping's window: if the ping is earlier than the cursor's neighborhood, or the edit just
/// behind the cursor is in range but belongs to a different multiplicity band, restart the
/// scan from the beginning rather than miss a match.
fn compute_first_edit(
    edits: &[Edit],
    cursor: usize,
    ping_time_d: f64,
    beam_offset: i64,
    beam_offset_max: i64,
    max_time_diff: f64,
) -> usize {
    if cursor > 0
        && cursor < edits.len()
        && ping_time_d < edits[cursor].time.as_f64() - max_time_diff
        && ping_time_d < edits[cursor - 1].time.as_f64() - max_time_diff
    {
        return 0;
    }
    if cursor > 0
        && cursor <= edits.len()
        && (ping_time_d - edits[cursor - 1].time.as_f64()).abs() <= max_time_diff
        && (edits[cursor - 1].beam_number < beam_offset || edits[cursor - 1].beam_number > beam_offset_max)
    {
        return 0;
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::esf::Edit;

    fn edit(time: f64, beam: i64, action: Action) -> Edit {
        Edit {
            time: Time::from_f64(time),
            beam_number: beam,
            action,
            use_count: 0,
        }
    }

    #[test]
    fn last_writer_wins_within_one_ping() {
        let mut edits = vec![
            edit(100.0, 5, Action::Flag),
            edit(100.0, 5, Action::Unflag),
            edit(200.0, 7, Action::Zero),
        ];
        let mut beamflags = vec![flag::NONE; 8];
        let (cursor, applied) = apply_edits(
            &mut edits,
            0,
            Time::from_f64(100.0),
            0,
            &mut beamflags,
            3,
            EsfMode::Explicit,
        );
        assert_eq!(flag::NONE, beamflags[5]);
        assert_eq!(flag::NONE, beamflags[7]);
        assert_eq!(1, applied.len());
        assert_eq!(2, edits[0].use_count, "superseded edit still gets use++");
        assert_eq!(2, edits[1].use_count);
        assert_eq!(0, edits[2].use_count, "out of this ping's window");
        assert!(cursor <= 1);
    }

    #[test]
    fn null_beam_is_never_modified() {
        let mut edits = vec![edit(100.0, 3, Action::Unflag)];
        let mut beamflags = vec![flag::NONE; 8];
        beamflags[3] = flag::NULL;
        apply_edits(&mut edits, 0, Time::from_f64(100.0), 0, &mut beamflags, 3, EsfMode::Explicit);
        assert_eq!(flag::NULL, beamflags[3]);
        assert_eq!(1000, edits[0].use_count);
    }

    #[test]
    fn multiplicity_band_isolates_repeated_pings() {
        let mut edits = vec![edit(100.0, 5 + BEAM_OFFSET, Action::Flag)];
        let mut first_ping = vec![flag::NONE; 8];
        apply_edits(&mut edits, 0, Time::from_f64(100.0), 0, &mut first_ping, 3, EsfMode::Explicit);
        assert_eq!(flag::NONE, first_ping[5]);

        let mut second_ping = vec![flag::NONE; 8];
        apply_edits(&mut edits, 0, Time::from_f64(100.0), 1, &mut second_ping, 3, EsfMode::Explicit);
        assert!(flag::flag_unusable(second_ping[5]));
    }

    #[test]
    fn implicit_good_mode_fills_unmatched_beams() {
        let mut edits: Vec<Edit> = vec![];
        let mut beamflags = vec![flag::NULL; 4];
        apply_edits(&mut edits, 0, Time::from_f64(100.0), 0, &mut beamflags, 3, EsfMode::ImplicitGood);
        assert!(beamflags.iter().all(|&f| f == flag::NONE));
    }

    #[test]
    fn implicit_null_mode_fills_unmatched_beams() {
        let mut edits: Vec<Edit> = vec![];
        let mut beamflags = vec![flag::NONE; 4];
        apply_edits(&mut edits, 0, Time::from_f64(100.0), 0, &mut beamflags, 3, EsfMode::ImplicitNull);
        assert!(beamflags.iter().all(|&f| f == flag::NULL));
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let mut edits = vec![edit(100.0, 2, Action::Flag)];
        let mut beamflags = vec![flag::NONE; 4];
        apply_edits(&mut edits, 0, Time::from_f64(100.0), 0, &mut beamflags, 3, EsfMode::Explicit);
        let after_first = beamflags.clone();
        apply_edits(&mut edits, 0, Time::from_f64(100.0), 0, &mut beamflags, 3, EsfMode::Explicit);
        assert_eq!(after_first, beamflags);
    }

    #[test]
    fn out_of_range_beam_index_is_marked_invalid() {
        let mut edits = vec![edit(100.0, 50, Action::Flag)];
        let mut beamflags = vec![flag::NONE; 4];
        apply_edits(&mut edits, 0, Time::from_f64(100.0), 0, &mut beamflags, 3, EsfMode::Explicit);
        assert_eq!(10_000, edits[0].use_count);
    }
}

//! End-to-end ESF scenarios: persisting edits to disk, reloading them, and applying them
//! against a ping's beam flags (§4.G/§4.H, §8).

use std::path::PathBuf;

use gsf::esf::{apply_edits, Action, Edit, EsfMode, EsfStore, OutputMode};
use gsf::flag;
use gsf::Time;

fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("gsf-esf-test-{name}-{}.esf", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(format!("{}.stream", path.display()));
    path
}

#[test]
fn edits_written_to_disk_survive_a_reload() {
    let path = scratch_path("reload");

    {
        let mut store = EsfStore::open(&path, false, OutputMode::Write).unwrap();
        store
            .push_edit(
                Edit {
                    time: Time::new(100, 0),
                    beam_number: 5,
                    action: Action::Flag,
                    use_count: 0,
                },
                true,
            )
            .unwrap();
        store
            .push_edit(
                Edit {
                    time: Time::new(200, 0),
                    beam_number: 3,
                    action: Action::Unflag,
                    use_count: 0,
                },
                true,
            )
            .unwrap();
    }

    let reloaded = EsfStore::open(&path, true, OutputMode::NoWrite).unwrap();
    assert_eq!(2, reloaded.edits().len());
    assert_eq!(3, reloaded.version());
    // Loaded edits are sorted by (time, beam, action): the beam-3 edit at t=200 sorts
    // after the beam-5 edit at t=100.
    assert_eq!(5, reloaded.edits()[0].beam_number);
    assert_eq!(3, reloaded.edits()[1].beam_number);

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(format!("{}.stream", path.display()));
}

#[test]
fn loaded_edits_flag_the_right_beam_on_the_right_ping() {
    let path = scratch_path("apply");
    {
        let mut store = EsfStore::open(&path, false, OutputMode::Write).unwrap();
        store
            .push_edit(
                Edit {
                    time: Time::new(500, 0),
                    beam_number: 2,
                    action: Action::Filter,
                    use_count: 0,
                },
                true,
            )
            .unwrap();
    }

    let mut reloaded = EsfStore::open(&path, true, OutputMode::NoWrite).unwrap();
    let mut edits: Vec<Edit> = reloaded.edits().to_vec();
    let mut beamflags = vec![flag::NONE; 4];
    let (cursor, applied) = apply_edits(
        &mut edits,
        reloaded.cursor(),
        Time::new(500, 0),
        0,
        &mut beamflags,
        reloaded.version(),
        reloaded.mode(),
    );
    reloaded.set_cursor(cursor);

    assert_eq!(1, applied.len());
    assert!(flag::flag_unusable(beamflags[2]));
    assert_eq!(flag::NONE, beamflags[0]);
    assert_eq!(flag::NONE, beamflags[1]);
    assert_eq!(flag::NONE, beamflags[3]);

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(format!("{}.stream", path.display()));
}

#[test]
fn v1_files_sort_with_millisecond_coarsened_tolerance() {
    let path = scratch_path("v1-sort");

    // No header banner at all: a bare run of {f64 time_d}{i32 beam}{i32 action} records, the
    // way a version-1 ESF (predating the header block) looked on disk. The two edits are
    // less than 1ms apart but their raw times and beam numbers are chosen so the full
    // (time, beam, action) comparator and the version-1 millisecond-bucketed comparator
    // disagree about which comes first.
    let mut bytes = Vec::new();
    let mut push = |time_d: f64, beam: i32, action: i32| {
        bytes.extend_from_slice(&time_d.to_be_bytes());
        bytes.extend_from_slice(&beam.to_be_bytes());
        bytes.extend_from_slice(&action.to_be_bytes());
    };
    push(100.0009, 3, 1); // Action::Flag
    push(100.0001, 9, 1);
    std::fs::write(&path, &bytes).unwrap();

    let reloaded = EsfStore::open(&path, true, OutputMode::NoWrite).unwrap();
    assert_eq!(1, reloaded.version());
    // Full-precision order would be (beam=9, beam=3) since 100.0001 < 100.0009. Both
    // timestamps floor to the same millisecond bucket, so the version-1 comparator instead
    // breaks the tie on beam number, giving (beam=3, beam=9).
    assert_eq!(3, reloaded.edits()[0].beam_number);
    assert_eq!(9, reloaded.edits()[1].beam_number);

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(format!("{}.stream", path.display()));
}

#[test]
fn explicit_mode_is_the_default_when_no_header_specifies_otherwise() {
    let path = scratch_path("mode-default");
    {
        let _ = EsfStore::open(&path, false, OutputMode::Write).unwrap();
    }
    let reloaded = EsfStore::open(&path, true, OutputMode::NoWrite).unwrap();
    assert_eq!(EsfMode::Explicit, reloaded.mode());

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(format!("{}.stream", path.display()));
}

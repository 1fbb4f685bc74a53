//! Re-pinged (same-timestamp, higher-multiplicity) pings get independent beam-flag edits
//! via the multiplicity-offset beam numbering scheme (§3/§4.G).

use gsf::esf::{apply_edits, Action, Edit, EsfMode, BEAM_OFFSET};
use gsf::flag;
use gsf::Time;

#[test]
fn an_edit_offset_for_multiplicity_one_does_not_touch_multiplicity_zero() {
    let mut edits = vec![Edit {
        time: Time::new(300, 0),
        beam_number: 4 + BEAM_OFFSET,
        action: Action::Zero,
        use_count: 0,
    }];

    let mut ping_zero = vec![flag::NONE; 10];
    apply_edits(
        &mut edits,
        0,
        Time::new(300, 0),
        0,
        &mut ping_zero,
        3,
        EsfMode::Explicit,
    );
    assert!(ping_zero.iter().all(|&f| f == flag::NONE));

    let mut ping_one = vec![flag::NONE; 10];
    apply_edits(
        &mut edits,
        0,
        Time::new(300, 0),
        1,
        &mut ping_one,
        3,
        EsfMode::Explicit,
    );
    assert_eq!(flag::NULL, ping_one[4]);
}

#[test]
fn beam_index_and_multiplicity_round_trip_through_the_offset() {
    let edit = Edit {
        time: Time::new(1, 0),
        beam_number: 2 * BEAM_OFFSET + 17,
        action: Action::Flag,
        use_count: 0,
    };
    assert_eq!(2, edit.ping_multiplicity());
    assert_eq!(17, edit.beam_index());
}

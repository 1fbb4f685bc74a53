//! Recovering an array subrecord's field size when a legacy file's scale-factor entry
//! carries no compression-flag hint (§4.B/§9).

use gsf::scale::{FieldSize, ScaleFactors};

#[test]
fn direct_divisibility_recovers_one_two_and_four_byte_fields() {
    // 10 beams, 10 bytes declared: only legal if one byte per sample.
    assert_eq!(
        FieldSize::One,
        ScaleFactors::infer_field_size(10, 10, None, |_| None)
    );
    // 10 beams, 20 bytes declared: only legal at two bytes per sample.
    assert_eq!(
        FieldSize::Two,
        ScaleFactors::infer_field_size(20, 10, None, |_| None)
    );
    // 10 beams, 40 bytes declared: only legal at four bytes per sample.
    assert_eq!(
        FieldSize::Four,
        ScaleFactors::infer_field_size(40, 10, None, |_| None)
    );
}

#[test]
fn speculative_lookahead_tries_one_then_two_then_four_bytes() {
    // 6 beams, 13 bytes declared: not evenly divisible by 6 at any of {1,2,4}, so the
    // direct check fails and speculative lookahead has to run. Only the two-byte guess
    // (size=12) lines up with a legal-looking next subrecord header.
    let fs = ScaleFactors::infer_field_size(13, 6, None, |guess| {
        if guess == 12 {
            Some((5, 6)) // a plausible next array subrecord: legal id, size == beams
        } else {
            None
        }
    });
    assert_eq!(FieldSize::Two, fs);
}

#[test]
fn falls_back_when_no_guess_looks_legal() {
    let fs = ScaleFactors::infer_field_size(13, 6, Some(FieldSize::Four), |_| None);
    assert_eq!(FieldSize::Four, fs);
}

#[test]
fn zero_beams_short_circuits_to_the_fallback() {
    let fs = ScaleFactors::infer_field_size(0, 0, Some(FieldSize::One), |_| {
        panic!("peek should never be called when there are no beams")
    });
    assert_eq!(FieldSize::One, fs);
}

//! A ping's 2-bit quality-flag array survives a full write/read cycle (§4.C).

use gsf::record::{Ping, Record, SwathBathyPing};
use gsf::time::Time;
use gsf::{Reader, Writer};

#[test]
fn quality_flags_round_trip_through_a_full_ping() {
    let mut buf = Vec::new();
    {
        let mut writer = Writer::new(&mut buf, "GSFv03.00").unwrap();
        let ping = SwathBathyPing {
            time: Time::new(42, 0),
            latitude: 1.0,
            longitude: 2.0,
            number_beams: 7,
            center_beam: 3,
            // One value per beam, 0..=3: not a multiple of 4, exercising the "last byte only
            // partly used" packing edge case (§4.C).
            quality_flags: vec![0, 1, 2, 3, 1, 2, 0],
            ..Default::default()
        };
        writer.write(&Record::Ping(Ping::Swath(ping))).unwrap();
        writer.flush().unwrap();
    }

    let mut reader = Reader::new(std::io::Cursor::new(buf)).unwrap();
    let record = reader.read().unwrap().unwrap();
    match record {
        Record::Ping(Ping::Swath(ping)) => {
            assert_eq!(vec![0, 1, 2, 3, 1, 2, 0], ping.quality_flags);
        }
        other => panic!("expected swath ping, got {other:?}"),
    }
}

//! Full-file round trips through `Reader`/`Writer`: header, summary, comment, and a
//! swath-bathymetry ping carrying scale factors and several arrays.

use gsf::record::{Comment, Ping, Record, SwathBathyPing, SwathBathySummary};
use gsf::scale::ScaleFactors;
use gsf::time::Time;
use gsf::{Reader, Writer};

fn scale_factors_for(ids: &[u8]) -> ScaleFactors {
    let mut w = gsf::byteio::ByteWriter::new();
    w.write_u32(ids.len() as u32).unwrap();
    for &id in ids {
        w.write_u32(((id as u32) << 24) | (0x20u32 << 16)).unwrap();
        w.write_u32(100).unwrap();
        w.write_i32(0).unwrap();
    }
    let bytes = w.into_inner();
    let mut r = gsf::byteio::ByteReader::new(&bytes);
    ScaleFactors::read_from(&mut r).unwrap()
}

fn swath_ping() -> SwathBathyPing {
    SwathBathyPing {
        time: Time::new(1_000_000, 0),
        latitude: 45.5,
        longitude: -122.7,
        number_beams: 4,
        center_beam: 2,
        scale_factors: scale_factors_for(&[1, 2, 16]),
        depth: vec![10.0, 10.5, 11.0, 10.2],
        across_track: vec![-3.0, -1.0, 1.0, 3.0],
        beam_flags: vec![0, 0, 0, 0],
        ..Default::default()
    }
}

#[test]
fn writes_then_reads_a_mixed_record_sequence() {
    let mut buf = Vec::new();
    {
        let mut writer = Writer::new(&mut buf, "GSFv03.00").unwrap();
        writer
            .write(&Record::Summary(SwathBathySummary {
                start_time: Time::new(1_000_000, 0),
                end_time: Time::new(1_000_100, 0),
                min_latitude: 45.0,
                min_longitude: -123.0,
                max_latitude: 46.0,
                max_longitude: -122.0,
                min_depth: 5.0,
                max_depth: 50.0,
            }))
            .unwrap();
        writer
            .write(&Record::Comment(Comment {
                time: Time::new(1_000_000, 0),
                text: "synthetic survey segment".to_string(),
            }))
            .unwrap();
        writer
            .write(&Record::Ping(Ping::Swath(swath_ping())))
            .unwrap();
        writer.flush().unwrap();
    }

    let mut reader = Reader::new(std::io::Cursor::new(buf)).unwrap();

    let record = reader.read().unwrap().unwrap();
    assert!(matches!(record, Record::Summary(_)));

    let record = reader.read().unwrap().unwrap();
    match record {
        Record::Comment(c) => assert_eq!("synthetic survey segment", c.text),
        other => panic!("expected comment, got {other:?}"),
    }

    let record = reader.read().unwrap().unwrap();
    match record {
        Record::Ping(Ping::Swath(ping)) => {
            assert_eq!(4, ping.number_beams);
            for (expected, actual) in swath_ping().depth.iter().zip(ping.depth.iter()) {
                assert!((expected - actual).abs() < 0.01);
            }
            // Across-track carries a sign (beams to port of nadir are negative); this must
            // round-trip through the signed array codec, not saturate to zero.
            for (expected, actual) in swath_ping().across_track.iter().zip(ping.across_track.iter()) {
                assert!((expected - actual).abs() < 0.01, "{expected} vs {actual}");
            }
            assert!(ping.across_track.iter().any(|&v| v < 0.0));
        }
        other => panic!("expected swath ping, got {other:?}"),
    }

    assert!(reader.read().unwrap().is_none());
}

#[test]
fn scale_factors_persist_across_pings_that_omit_them() {
    let mut buf = Vec::new();
    {
        let mut writer = Writer::new(&mut buf, "GSFv03.00").unwrap();
        let mut first = swath_ping();
        first.depth = vec![1.0, 2.0, 3.0, 4.0];
        writer.write(&Record::Ping(Ping::Swath(first))).unwrap();

        // Second ping carries no array data and no scale-factor table of its own: `write_to`
        // only emits a scale-factor subrecord when the ping's own table is non-empty, and
        // `write_array` refuses to encode a value with no table to look its scale up in. So
        // this ping writes no arrays and no scale-factor block, relying entirely on whatever
        // table the first ping left in effect in the file's scale-factor table.
        let mut second = swath_ping();
        second.scale_factors = ScaleFactors::default();
        second.depth = Vec::new();
        second.across_track = Vec::new();
        second.beam_flags = Vec::new();
        writer.write(&Record::Ping(Ping::Swath(second))).unwrap();
        writer.flush().unwrap();
    }

    let mut reader = Reader::new(std::io::Cursor::new(buf)).unwrap();
    let first = reader.read().unwrap().unwrap();
    let second = reader.read().unwrap().unwrap();

    let Record::Ping(Ping::Swath(first)) = first else {
        panic!("expected swath ping")
    };
    let Record::Ping(Ping::Swath(second)) = second else {
        panic!("expected swath ping")
    };
    assert!((first.depth[0] - 1.0).abs() < 0.01);
    // The second ping wrote no scale-factor subrecord of its own, so the reader seeds it
    // from the file table the first ping populated.
    assert_eq!(first.scale_factors, second.scale_factors);
    assert!(second.scale_factors.get(1).is_some());
}

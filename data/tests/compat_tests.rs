//! Cross-entity payload tests: version compatibility, corrupt input and
//! file transport.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use geowire_core::storable::{read_from_path, write_to_path};
use geowire_core::{
    AttachmentKind, CodecError, DecodeError, DecodeLimits, Storable, Writer, decode,
    decode_with_limits, encode, encode_as, peek_version,
};
use geowire_data::*;
use tracing_subscriber::fmt::MakeWriter;

fn three_point_track() -> Track {
    let mut track = Track::new("Morning walk");
    for (i, lat) in [50.0, 50.001, 50.002].into_iter().enumerate() {
        let mut loc = Location::new(lat, 14.4);
        loc.time = 1_700_000_000_000 + i as i64 * 30_000;
        loc.altitude = Some(200.0 + i as f64);
        track.add_point(loc);
    }
    track.add_break_after(1);
    track
        .waypoints
        .push(Point::new("W1", Location::new(50.0015, 14.4)));
    track
}

#[test]
fn test_three_point_track_scenario() {
    let track = three_point_track();
    let decoded: Track = decode(&encode(&track).unwrap()).unwrap();

    assert_eq!(decoded.points.len(), 3);
    assert_eq!(decoded.breaks(), &[1]);
    assert_eq!(decoded.waypoints[0].base.name, "W1");
    assert_eq!(decoded, track);
}

#[test]
fn test_stats_merge_scenario() {
    let mut stats = TrackStats {
        total_length: 100.0,
        speed_max: 5.0,
        ..TrackStats::default()
    };
    stats.merge(&TrackStats {
        total_length: 50.0,
        speed_max: 8.0,
        ..TrackStats::default()
    });
    assert_eq!(stats.total_length, 150.0);
    assert_eq!(stats.speed_max, 8.0);
}

#[test]
fn test_negative_string_length_is_malformed() {
    let mut w = Writer::buffer();
    w.write_i32(Location::VERSION).unwrap();
    w.write_i64(1).unwrap();
    w.write_i32(-1).unwrap();
    let bytes = w.into_inner();

    let err = decode::<Location>(&bytes).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Codec(CodecError::MalformedLength { length: -1, .. })
    ));
    assert!(err.is_corrupt());
}

#[test]
fn test_truncated_payload() {
    let bytes = encode(&three_point_track()).unwrap();
    for cut in [0, 3, 4, bytes.len() / 2, bytes.len() - 1] {
        let err = decode::<Track>(&bytes[..cut]).unwrap_err();
        assert!(err.is_corrupt(), "cut at {cut}: {err}");
    }
}

#[test]
fn test_newer_versions_rejected() {
    let mut bytes = encode(&Location::new(1.0, 2.0)).unwrap();
    bytes[..4].copy_from_slice(&(Location::VERSION + 1).to_be_bytes());
    let err = decode::<Location>(&bytes).unwrap_err();
    assert!(err.is_unsupported_version());

    let mut bytes = encode(&Circle::default()).unwrap();
    bytes[..4].copy_from_slice(&5i32.to_be_bytes());
    assert!(matches!(
        decode::<Circle>(&bytes),
        Err(DecodeError::UnsupportedVersion {
            entity: "Circle",
            found: 5,
            supported: 1
        })
    ));
}

#[test]
fn test_every_older_version_decodes() {
    let track = three_point_track();
    for version in 0..=Track::VERSION {
        let bytes = encode_as(&track, version).unwrap();
        assert_eq!(peek_version(&bytes).unwrap(), version);
        let decoded: Track = decode(&bytes).unwrap();
        assert_eq!(decoded.points, track.points);
        assert_eq!(decoded.breaks(), track.breaks());
    }
    assert!(encode_as(&track, Track::VERSION + 1).is_err());
    assert!(encode_as(&track, -1).is_err());
}

#[test]
fn test_all_present_point_roundtrip() {
    let mut loc = Location::new(49.5, 17.25);
    loc.id = 3;
    loc.provider = "gps".to_string();
    loc.altitude = Some(312.5);
    loc.speed = Some(1.5);
    loc.bearing = Some(90.0);
    loc.accuracy = Some(4.0);
    loc.heart_rate = Some(130);
    loc.cadence = Some(85);
    loc.power = Some(210.0);
    loc.strides = Some(1_000);
    loc.temperature = Some(-3.5);
    loc.accuracy_vertical = Some(6.0);

    let mut point = Point::new("Everything", loc);
    point.base.style_normal = Some(GeoDataStyle::with_icon("pin", "file:///pin.png"));
    point.base.style_highlight = Some(GeoDataStyle::with_line("hl", -1, 3.0));
    point.base.set_description("All fields set").unwrap();
    point
        .base
        .extra
        .add_attachment(AttachmentKind::Url, "web", "https://example.org")
        .unwrap();
    point.gc_data = Some(GeocachingData::new("GC1", "Cache"));

    let data = GeoData::from(point);
    assert_eq!(decode::<GeoData>(&encode(&data).unwrap()).unwrap(), data);
}

#[test]
fn test_all_absent_point_roundtrip() {
    let data = GeoData::Point(Point::default());
    let decoded: GeoData = decode(&encode(&data).unwrap()).unwrap();
    assert_eq!(decoded, data);
    assert!(decoded.base().style_normal.is_none());
    assert!(decoded.base().extra.is_empty());
}

#[test]
fn test_limits_reject_large_lists() {
    let bytes = encode(&three_point_track()).unwrap();
    let tight = DecodeLimits {
        max_list_len: 2,
        ..DecodeLimits::default()
    };
    assert!(decode_with_limits::<Track>(&bytes, tight).unwrap_err().is_corrupt());
    assert!(decode_with_limits::<Track>(&bytes, DecodeLimits::default()).is_ok());
}

#[test]
fn test_file_transport() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("walk.gw");
    let data = GeoData::from(three_point_track());

    write_to_path(&path, &data).unwrap();
    let decoded: GeoData = read_from_path(&path, DecodeLimits::default()).unwrap();
    assert_eq!(decoded, data);
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_clamping_logged_to_scoped_subscriber() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let loc = tracing::subscriber::with_default(subscriber, || Location::new(95.0, 200.0));

    assert_eq!(loc.latitude(), 90.0);
    assert_eq!(loc.longitude(), -160.0);
    let text = captured.text();
    assert!(text.contains("latitude out of range"), "{text}");
}

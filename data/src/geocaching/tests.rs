//! Geocaching record tests

use geowire_core::{decode, encode, encode_as};

use super::*;

fn sample() -> GeocachingData {
    GeocachingData {
        id: 1_234_567,
        source: CacheSource::GeocachingCom,
        cache_type: cache_type::MULTI,
        container: container::SMALL,
        owner: "Kamil".to_string(),
        placed_by: "Team K".to_string(),
        premium_only: true,
        date_hidden: 1_262_304_000_000,
        date_published: 1_262_390_400_000,
        date_updated: 1_700_000_000_000,
        difficulty: 2.5,
        terrain: 3.0,
        country: "Czechia".to_string(),
        state: "Praha".to_string(),
        encoded_hints: "Haqre n ebpx".to_string(),
        short_description: "Krátký popis".to_string(),
        long_description: "<p>Long listing</p>".to_string(),
        notes: "bring a pen".to_string(),
        found: true,
        favorite_points: 17,
        attributes: vec![GeocachingAttribute::new(1, true), GeocachingAttribute::new(32, false)],
        logs: vec![GeocachingLog {
            id: 5,
            log_type: log_type::FOUND,
            date: 1_700_000_100_000,
            finder: "hiker".to_string(),
            finder_found: 321,
            text: "TFTC".to_string(),
            images: vec![GeocachingImage {
                name: "view".to_string(),
                url: "https://img/1.jpg".to_string(),
                ..GeocachingImage::default()
            }],
            latitude: 50.1,
            longitude: 14.2,
        }],
        trackables: vec![GeocachingTrackable {
            id: 99,
            name: "Travel Bug".to_string(),
            released: 1_500_000_000_000,
            goal: "Visit every continent".to_string(),
            tb_code: "TB1ABC".to_string(),
            ..GeocachingTrackable::default()
        }],
        waypoints: vec![GeocachingWaypoint {
            code: "PK01".to_string(),
            wpt_type: wpt_type::PARKING.to_string(),
            name: "Parking".to_string(),
            latitude: 50.08,
            longitude: 14.41,
            user_entered: true,
            formula: "N 50 0A.BCD".to_string(),
            desc_modified: true,
            ..GeocachingWaypoint::default()
        }],
        computed: true,
        lat_original: 50.0,
        lon_original: 14.0,
        gc_vote_average: 4.2,
        gc_vote_count: 11,
        gc_vote_user: 5.0,
        ..GeocachingData::new("GC12AB3", "Old Town Multi")
    }
}

#[test]
fn test_roundtrip_full() {
    let gc = sample();
    assert_eq!(decode::<GeocachingData>(&encode(&gc).unwrap()).unwrap(), gc);
}

#[test]
fn test_roundtrip_default() {
    let gc = GeocachingData::default();
    assert_eq!(decode::<GeocachingData>(&encode(&gc).unwrap()).unwrap(), gc);
}

#[test]
fn test_version_zero_fills_defaults() {
    let decoded: GeocachingData = decode(&encode_as(&sample(), 0).unwrap()).unwrap();
    let defaults = GeocachingData::default();
    assert_eq!(decoded.cache_id, "GC12AB3");
    assert_eq!(decoded.logs, sample().logs);
    assert_eq!(decoded.computed, defaults.computed);
    assert_eq!(decoded.lat_original, defaults.lat_original);
    assert_eq!(decoded.gc_vote_count, defaults.gc_vote_count);
    assert_eq!(decoded.gc_vote_average, defaults.gc_vote_average);
}

#[test]
fn test_version_one_keeps_computed() {
    let decoded: GeocachingData = decode(&encode_as(&sample(), 1).unwrap()).unwrap();
    assert!(decoded.computed);
    assert_eq!(decoded.lon_original, 14.0);
    assert_eq!(decoded.gc_vote_user, 0.0);
}

#[test]
fn test_description_pair_keeps_boundary() {
    let gc = GeocachingData {
        short_description: String::new(),
        long_description: "only long".to_string(),
        ..GeocachingData::new("GC1", "x")
    };
    let decoded: GeocachingData = decode(&encode(&gc).unwrap()).unwrap();
    assert_eq!(decoded.short_description, "");
    assert_eq!(decoded.long_description, "only long");
}

#[test]
fn test_description_pair_bad_short_length() {
    let mut pair = 50i32.to_be_bytes().to_vec();
    pair.extend_from_slice(b"abc");
    let mut w = Writer::buffer();
    w.write_block(&pair).unwrap();
    let bytes = w.into_inner();

    let err = GeocachingData::read_description_pair(&mut Reader::new(&bytes)).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InvalidFieldValue {
            field: "description",
            ..
        }
    ));
}

#[test]
fn test_nested_log_from_future_fails_whole_record() {
    let mut gc = GeocachingData::new("GC1", "x");
    gc.logs.push(GeocachingLog::default());
    let mut bytes = encode(&gc).unwrap();

    // Tail of a record without logs: logs count, trackables count, waypoints
    // count, then 17 bytes of v1 and 12 bytes of v2 fields. The log block
    // starts right after the logs count.
    let without_logs = encode(&GeocachingData::new("GC1", "x")).unwrap();
    let tag = without_logs.len() - (4 + 4 + 17 + 12);
    bytes[tag..tag + 4].copy_from_slice(&7i32.to_be_bytes());

    assert!(matches!(
        decode::<GeocachingData>(&bytes),
        Err(DecodeError::UnsupportedVersion {
            entity: "GeocachingLog",
            found: 7,
            ..
        })
    ));
}

#[test]
fn test_cache_source_codes() {
    assert_eq!(CacheSource::from_i32(1), CacheSource::GeocachingCom);
    assert_eq!(CacheSource::from_i32(77), CacheSource::Other(77));
    assert_eq!(CacheSource::Other(77).to_i32(), 77);
    assert_eq!(CacheSource::OpencachingUs.to_i32(), 5);
}

#[test]
fn test_listing_url() {
    assert_eq!(
        sample().listing_url().as_deref(),
        Some("https://coord.info/GC12AB3")
    );
    assert_eq!(GeocachingData::default().listing_url(), None);
    let hu = GeocachingData {
        source: CacheSource::GeocachingHu,
        ..GeocachingData::new("GCHU1", "x")
    };
    assert_eq!(hu.listing_url(), None);
}

#[test]
fn test_waypoint_versions() {
    let gc = sample();
    let wpt = &gc.waypoints[0];
    let v0: GeocachingWaypoint = decode(&encode_as(wpt, 0).unwrap()).unwrap();
    assert!(!v0.user_entered);
    assert!(v0.formula.is_empty());
    let v1: GeocachingWaypoint = decode(&encode_as(wpt, 1).unwrap()).unwrap();
    assert!(v1.user_entered);
    assert!(!v1.desc_modified);
    assert!(wpt.has_coordinates());
}

#[test]
fn test_log_and_trackable_versions() {
    let gc = sample();
    let log: GeocachingLog = decode(&encode_as(&gc.logs[0], 0).unwrap()).unwrap();
    assert!(log.images.is_empty());
    assert_eq!(log.text, "TFTC");

    let tb: GeocachingTrackable = decode(&encode_as(&gc.trackables[0], 0).unwrap()).unwrap();
    assert_eq!(tb.name, "Travel Bug");
    assert!(tb.goal.is_empty());
    assert!(tb.tb_code.is_empty());
}

//! Payload kinds the CLI can decode

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::ValueEnum;
use geowire_core::{DecodeLimits, Storable, decode_with_limits};
use geowire_data::{Circle, GeoData, GeocachingData, Location, Point, Track, TrackStats};
use serde::Serialize;
use serde_json::{Map, Value};

/// Fields holding Unix times in milliseconds
const TIME_FIELDS: &[&str] = &[
    "time",
    "time_created",
    "date",
    "date_hidden",
    "date_published",
    "date_updated",
    "released",
    "start_time",
    "stop_time",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Location,
    Point,
    Track,
    Circle,
    Geodata,
    Stats,
    Geocache,
}

impl EntityKind {
    /// Decode `bytes` as this kind and convert the result to JSON.
    ///
    /// Decode failures keep their [`geowire_core::DecodeError`] for downcasting.
    pub fn decode_json(self, bytes: &[u8], limits: DecodeLimits) -> Result<Value> {
        match self {
            EntityKind::Location => to_json::<Location>(bytes, limits),
            EntityKind::Point => to_json::<Point>(bytes, limits),
            EntityKind::Track => to_json::<Track>(bytes, limits),
            EntityKind::Circle => to_json::<Circle>(bytes, limits),
            EntityKind::Geodata => to_json::<GeoData>(bytes, limits),
            EntityKind::Stats => to_json::<TrackStats>(bytes, limits),
            EntityKind::Geocache => to_json::<GeocachingData>(bytes, limits),
        }
    }

    /// Highest layout version this build reads
    pub fn supported_version(self) -> i32 {
        match self {
            EntityKind::Location => Location::VERSION,
            EntityKind::Point => Point::VERSION,
            EntityKind::Track => Track::VERSION,
            EntityKind::Circle => Circle::VERSION,
            EntityKind::Geodata => GeoData::VERSION,
            EntityKind::Stats => TrackStats::VERSION,
            EntityKind::Geocache => GeocachingData::VERSION,
        }
    }
}

fn to_json<T: Storable + Serialize>(bytes: &[u8], limits: DecodeLimits) -> Result<Value> {
    let value: T = decode_with_limits(bytes, limits)?;
    let mut json = serde_json::to_value(&value)
        .with_context(|| format!("Failed to convert {} to JSON", T::NAME))?;
    annotate_times(&mut json);
    Ok(json)
}

/// Add a `<field>_utc` RFC 3339 rendering next to every set timestamp
pub fn annotate_times(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let mut rendered = Map::new();
            for (key, field) in map.iter_mut() {
                if TIME_FIELDS.contains(&key.as_str()) {
                    if let Some(text) = field.as_i64().and_then(render_millis) {
                        rendered.insert(format!("{key}_utc"), Value::String(text));
                    }
                } else {
                    annotate_times(field);
                }
            }
            map.extend(rendered);
        }
        Value::Array(items) => items.iter_mut().for_each(annotate_times),
        _ => {}
    }
}

fn render_millis(millis: i64) -> Option<String> {
    if millis <= 0 {
        return None;
    }
    DateTime::from_timestamp_millis(millis).map(|time| time.to_rfc3339())
}

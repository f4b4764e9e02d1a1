//! Closed set of geodata variants
//!
//! Stored as a kind tag followed by the variant's own tagged block, so each
//! variant keeps its independent version history.

use std::fmt;
use std::io::Write;

use geowire_core::{CodecError, DecodeError, Reader, Storable, Writer, read_object, write_object};
use serde::Serialize;

use crate::base::GeoDataBase;
use crate::circle::Circle;
use crate::point::Point;
use crate::track::Track;

/// Variant discriminant as stored on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeoDataKind {
    Point,
    Track,
    Circle,
}

impl GeoDataKind {
    fn to_i32(self) -> i32 {
        match self {
            GeoDataKind::Point => 1,
            GeoDataKind::Track => 2,
            GeoDataKind::Circle => 3,
        }
    }

    fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(GeoDataKind::Point),
            2 => Some(GeoDataKind::Track),
            3 => Some(GeoDataKind::Circle),
            _ => None,
        }
    }
}

impl fmt::Display for GeoDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoDataKind::Point => write!(f, "point"),
            GeoDataKind::Track => write!(f, "track"),
            GeoDataKind::Circle => write!(f, "circle"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeoData {
    Point(Point),
    Track(Track),
    Circle(Circle),
}

impl Default for GeoData {
    fn default() -> Self {
        GeoData::Point(Point::default())
    }
}

impl GeoData {
    pub fn kind(&self) -> GeoDataKind {
        match self {
            GeoData::Point(_) => GeoDataKind::Point,
            GeoData::Track(_) => GeoDataKind::Track,
            GeoData::Circle(_) => GeoDataKind::Circle,
        }
    }

    pub fn base(&self) -> &GeoDataBase {
        match self {
            GeoData::Point(point) => &point.base,
            GeoData::Track(track) => &track.base,
            GeoData::Circle(circle) => &circle.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut GeoDataBase {
        match self {
            GeoData::Point(point) => &mut point.base,
            GeoData::Track(track) => &mut track.base,
            GeoData::Circle(circle) => &mut circle.base,
        }
    }
}

impl From<Point> for GeoData {
    fn from(point: Point) -> Self {
        GeoData::Point(point)
    }
}

impl From<Track> for GeoData {
    fn from(track: Track) -> Self {
        GeoData::Track(track)
    }
}

impl From<Circle> for GeoData {
    fn from(circle: Circle) -> Self {
        GeoData::Circle(circle)
    }
}

impl Storable for GeoData {
    const VERSION: i32 = 0;
    const NAME: &'static str = "GeoData";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, _version: i32) -> Result<(), CodecError> {
        w.write_i32(self.kind().to_i32())?;
        match self {
            GeoData::Point(point) => write_object(w, point),
            GeoData::Track(track) => write_object(w, track),
            GeoData::Circle(circle) => write_object(w, circle),
        }
    }

    fn read_body(r: &mut Reader<'_>, _version: i32) -> Result<Self, DecodeError> {
        let tag = r.read_i32()?;
        let kind = GeoDataKind::from_i32(tag)
            .ok_or_else(|| DecodeError::invalid("kind", format!("unknown geodata kind {tag}")))?;
        Ok(match kind {
            GeoDataKind::Point => GeoData::Point(read_object(r)?),
            GeoDataKind::Track => GeoData::Track(read_object(r)?),
            GeoDataKind::Circle => GeoData::Circle(read_object(r)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use geowire_core::{decode, decode_list, encode, encode_list};

    #[test]
    fn test_mixed_list_roundtrip() {
        let items: Vec<GeoData> = vec![
            Point::new("P", Location::new(1.0, 2.0)).into(),
            Track::new("T").into(),
            Circle::new("C", Location::new(3.0, 4.0), 10.0).into(),
        ];
        let decoded: Vec<GeoData> = decode_list(&encode_list(&items).unwrap()).unwrap();
        assert_eq!(decoded, items);
        let kinds: Vec<GeoDataKind> = decoded.iter().map(GeoData::kind).collect();
        assert_eq!(
            kinds,
            vec![GeoDataKind::Point, GeoDataKind::Track, GeoDataKind::Circle]
        );
    }

    #[test]
    fn test_unknown_kind() {
        let mut bytes = encode(&GeoData::default()).unwrap();
        bytes[4..8].copy_from_slice(&9i32.to_be_bytes());
        assert!(matches!(
            decode::<GeoData>(&bytes),
            Err(DecodeError::InvalidFieldValue { field: "kind", .. })
        ));
    }

    #[test]
    fn test_base_access() {
        let mut data: GeoData = Track::new("Run").into();
        assert_eq!(data.base().name, "Run");
        data.base_mut().name = "Evening run".to_string();
        assert_eq!(data.base().name, "Evening run");
        assert_eq!(data.kind().to_string(), "track");
    }

    #[test]
    fn test_json_tags_variant() {
        let data: GeoData = Point::new("P", Location::new(1.0, 2.0)).into();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["kind"], "point");
        assert_eq!(json["base"]["name"], "P");
    }
}

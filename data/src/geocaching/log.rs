//! Geocache logs and their images
//!
//! Log layout history:
//!
//! - v0: id, type, date, finder, finder found count, text
//! - v1: images, latitude, longitude

use std::io::Write;

use geowire_core::{CodecError, DecodeError, Reader, Storable, Writer, read_list, write_list};
use serde::Serialize;

/// Log entry type codes
pub mod log_type {
    pub const FOUND: i32 = 0;
    pub const NOT_FOUND: i32 = 1;
    pub const WRITE_NOTE: i32 = 2;
    pub const NEEDS_MAINTENANCE: i32 = 3;
    pub const OWNER_MAINTENANCE: i32 = 4;
    pub const PUBLISH_LISTING: i32 = 5;
    pub const ENABLE_LISTING: i32 = 6;
    pub const TEMPORARILY_DISABLE_LISTING: i32 = 7;
    pub const WILL_ATTEND: i32 = 8;
    pub const ATTENDED: i32 = 9;
    pub const WEBCAM_PHOTO_TAKEN: i32 = 10;
    pub const ARCHIVE: i32 = 11;
}

/// Image attached to a log or a listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeocachingImage {
    pub name: String,
    pub description: String,
    pub thumbnail_url: String,
    pub url: String,
}

impl Storable for GeocachingImage {
    const VERSION: i32 = 0;
    const NAME: &'static str = "GeocachingImage";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, _version: i32) -> Result<(), CodecError> {
        w.write_str(&self.name)?;
        w.write_str(&self.description)?;
        w.write_str(&self.thumbnail_url)?;
        w.write_str(&self.url)
    }

    fn read_body(r: &mut Reader<'_>, _version: i32) -> Result<Self, DecodeError> {
        Ok(Self {
            name: r.read_string()?,
            description: r.read_string()?,
            thumbnail_url: r.read_string()?,
            url: r.read_string()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocachingLog {
    pub id: i64,
    pub log_type: i32,
    /// Unix time in milliseconds
    pub date: i64,
    pub finder: String,
    /// Number of caches the finder had found when logging
    pub finder_found: i32,
    pub text: String,
    pub images: Vec<GeocachingImage>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for GeocachingLog {
    fn default() -> Self {
        Self {
            id: 0,
            log_type: log_type::WRITE_NOTE,
            date: 0,
            finder: String::new(),
            finder_found: -1,
            text: String::new(),
            images: Vec::new(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

impl Storable for GeocachingLog {
    const VERSION: i32 = 1;
    const NAME: &'static str = "GeocachingLog";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, version: i32) -> Result<(), CodecError> {
        w.write_i64(self.id)?;
        w.write_i32(self.log_type)?;
        w.write_i64(self.date)?;
        w.write_str(&self.finder)?;
        w.write_i32(self.finder_found)?;
        w.write_str(&self.text)?;

        if version >= 1 {
            write_list(w, &self.images)?;
            w.write_f64(self.latitude)?;
            w.write_f64(self.longitude)?;
        }
        Ok(())
    }

    fn read_body(r: &mut Reader<'_>, version: i32) -> Result<Self, DecodeError> {
        let mut log = Self {
            id: r.read_i64()?,
            log_type: r.read_i32()?,
            date: r.read_i64()?,
            finder: r.read_string()?,
            finder_found: r.read_i32()?,
            text: r.read_string()?,
            ..Self::default()
        };

        if version >= 1 {
            log.images = read_list(r)?;
            log.latitude = r.read_f64()?;
            log.longitude = r.read_f64()?;
        }
        Ok(log)
    }
}

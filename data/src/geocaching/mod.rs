//! Geocaching records
//!
//! [`GeocachingData`] is a flat listing record attached to a point. It has its
//! own version history, independent of the point carrying it.
//!
//! # Layout history
//!
//! - v0: identity, listing flags, dates, ratings, location texts, description
//!   pair, notes, found state, attributes, logs, trackables, waypoints
//! - v1: computed coordinates and the original coordinates
//! - v2: GCVote rating
//!
//! The short and long descriptions travel as one block:
//!
//! ```text
//! block length: int
//! short length: int (bytes)
//! short bytes ++ long bytes
//! ```

mod attribute;
mod log;
mod trackable;
mod waypoint;

#[cfg(test)]
mod tests;

pub use attribute::GeocachingAttribute;
pub use log::{GeocachingImage, GeocachingLog, log_type};
pub use trackable::GeocachingTrackable;
pub use waypoint::{GeocachingWaypoint, wpt_type};

use std::io::Write;

use geowire_core::{
    CodecError, DecodeError, Reader, Storable, Writer, read_list, write_list,
};
use serde::Serialize;

/// Cache type codes
pub mod cache_type {
    pub const TRADITIONAL: i32 = 0;
    pub const MULTI: i32 = 1;
    pub const MYSTERY: i32 = 2;
    pub const VIRTUAL: i32 = 3;
    pub const EARTH: i32 = 4;
    pub const LETTERBOX: i32 = 6;
    pub const WHERIGO: i32 = 7;
    pub const EVENT: i32 = 8;
    pub const MEGA_EVENT: i32 = 9;
    pub const CITO: i32 = 10;
    pub const WEBCAM: i32 = 12;
}

/// Container size codes
pub mod container {
    pub const NOT_CHOSEN: i32 = 0;
    pub const MICRO: i32 = 1;
    pub const SMALL: i32 = 2;
    pub const REGULAR: i32 = 3;
    pub const LARGE: i32 = 4;
    pub const HUGE: i32 = 5;
    pub const OTHER: i32 = 6;
}

/// Listing service a cache comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CacheSource {
    #[default]
    Undefined,
    GeocachingCom,
    GeocachingHu,
    OpencachingDe,
    OpencachingUk,
    OpencachingUs,
    /// Source code unknown to this build
    Other(i32),
}

impl CacheSource {
    pub fn to_i32(self) -> i32 {
        match self {
            CacheSource::Undefined => 0,
            CacheSource::GeocachingCom => 1,
            CacheSource::GeocachingHu => 2,
            CacheSource::OpencachingDe => 3,
            CacheSource::OpencachingUk => 4,
            CacheSource::OpencachingUs => 5,
            CacheSource::Other(code) => code,
        }
    }

    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => CacheSource::Undefined,
            1 => CacheSource::GeocachingCom,
            2 => CacheSource::GeocachingHu,
            3 => CacheSource::OpencachingDe,
            4 => CacheSource::OpencachingUk,
            5 => CacheSource::OpencachingUs,
            code => CacheSource::Other(code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocachingData {
    pub id: i64,
    /// Cache code, e.g. `GC1234`
    pub cache_id: String,
    pub name: String,
    pub owner: String,
    pub placed_by: String,
    pub source: CacheSource,
    pub cache_type: i32,
    pub container: i32,
    pub available: bool,
    pub archived: bool,
    pub premium_only: bool,
    /// Unix times in milliseconds
    pub date_hidden: i64,
    pub date_published: i64,
    pub date_updated: i64,
    /// 1.0 - 5.0, negative when unknown
    pub difficulty: f32,
    pub terrain: f32,
    pub country: String,
    pub state: String,
    pub encoded_hints: String,
    pub short_description: String,
    pub long_description: String,
    pub notes: String,
    pub found: bool,
    pub favorite_points: i32,
    pub attributes: Vec<GeocachingAttribute>,
    pub logs: Vec<GeocachingLog>,
    pub trackables: Vec<GeocachingTrackable>,
    pub waypoints: Vec<GeocachingWaypoint>,
    pub computed: bool,
    pub lat_original: f64,
    pub lon_original: f64,
    pub gc_vote_average: f32,
    pub gc_vote_count: i32,
    pub gc_vote_user: f32,
}

impl Default for GeocachingData {
    fn default() -> Self {
        Self {
            id: 0,
            cache_id: String::new(),
            name: String::new(),
            owner: String::new(),
            placed_by: String::new(),
            source: CacheSource::Undefined,
            cache_type: cache_type::TRADITIONAL,
            container: container::NOT_CHOSEN,
            available: true,
            archived: false,
            premium_only: false,
            date_hidden: 0,
            date_published: 0,
            date_updated: 0,
            difficulty: -1.0,
            terrain: -1.0,
            country: String::new(),
            state: String::new(),
            encoded_hints: String::new(),
            short_description: String::new(),
            long_description: String::new(),
            notes: String::new(),
            found: false,
            favorite_points: 0,
            attributes: Vec::new(),
            logs: Vec::new(),
            trackables: Vec::new(),
            waypoints: Vec::new(),
            computed: false,
            lat_original: 0.0,
            lon_original: 0.0,
            gc_vote_average: 0.0,
            gc_vote_count: 0,
            gc_vote_user: 0.0,
        }
    }
}

impl GeocachingData {
    pub fn new(cache_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cache_id: cache_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// A record without a cache code is not usable
    pub fn is_valid(&self) -> bool {
        !self.cache_id.is_empty()
    }

    /// Listing page for caches whose source has a public URL scheme
    pub fn listing_url(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        match self.source {
            CacheSource::GeocachingCom => Some(format!("https://coord.info/{}", self.cache_id)),
            CacheSource::OpencachingDe => Some(format!(
                "https://www.opencaching.de/viewcache.php?wp={}",
                self.cache_id
            )),
            _ => None,
        }
    }

    /// Mark coordinates as computed, keeping the published ones
    pub fn set_computed(&mut self, lat_original: f64, lon_original: f64) {
        self.computed = true;
        self.lat_original = lat_original;
        self.lon_original = lon_original;
    }

    fn write_description_pair<W: Write>(&self, w: &mut Writer<W>) -> Result<(), CodecError> {
        if self.short_description.is_empty() && self.long_description.is_empty() {
            return w.write_block(&[]);
        }
        let short = self.short_description.as_bytes();
        let long = self.long_description.as_bytes();
        let mut pair = Vec::with_capacity(4 + short.len() + long.len());
        pair.extend_from_slice(&(short.len() as i32).to_be_bytes());
        pair.extend_from_slice(short);
        pair.extend_from_slice(long);
        w.write_block(&pair)
    }

    fn read_description_pair(r: &mut Reader<'_>) -> Result<(String, String), DecodeError> {
        let pair = r.read_block()?;
        if pair.is_empty() {
            return Ok((String::new(), String::new()));
        }
        let mut inner = Reader::new(&pair);
        let short_len = inner.read_i32()?;
        let short_len = usize::try_from(short_len)
            .ok()
            .filter(|len| *len <= inner.available())
            .ok_or_else(|| {
                DecodeError::invalid(
                    "description",
                    format!("short description length {short_len} exceeds block"),
                )
            })?;
        let short = inner.read_bytes(short_len)?.to_vec();
        let long = inner.read_bytes(inner.available())?.to_vec();
        Ok((
            String::from_utf8(short).map_err(CodecError::from)?,
            String::from_utf8(long).map_err(CodecError::from)?,
        ))
    }
}

impl Storable for GeocachingData {
    const VERSION: i32 = 2;
    const NAME: &'static str = "GeocachingData";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, version: i32) -> Result<(), CodecError> {
        w.write_i64(self.id)?;
        w.write_str(&self.cache_id)?;
        w.write_str(&self.name)?;
        w.write_str(&self.owner)?;
        w.write_str(&self.placed_by)?;
        w.write_i32(self.source.to_i32())?;
        w.write_i32(self.cache_type)?;
        w.write_i32(self.container)?;
        w.write_bool(self.available)?;
        w.write_bool(self.archived)?;
        w.write_bool(self.premium_only)?;
        w.write_i64(self.date_hidden)?;
        w.write_i64(self.date_published)?;
        w.write_i64(self.date_updated)?;
        w.write_f32(self.difficulty)?;
        w.write_f32(self.terrain)?;
        w.write_str(&self.country)?;
        w.write_str(&self.state)?;
        w.write_str(&self.encoded_hints)?;
        self.write_description_pair(w)?;
        w.write_str(&self.notes)?;
        w.write_bool(self.found)?;
        w.write_i32(self.favorite_points)?;
        write_list(w, &self.attributes)?;
        write_list(w, &self.logs)?;
        write_list(w, &self.trackables)?;
        write_list(w, &self.waypoints)?;

        if version >= 1 {
            w.write_bool(self.computed)?;
            w.write_f64(self.lat_original)?;
            w.write_f64(self.lon_original)?;
        }
        if version >= 2 {
            w.write_f32(self.gc_vote_average)?;
            w.write_i32(self.gc_vote_count)?;
            w.write_f32(self.gc_vote_user)?;
        }
        Ok(())
    }

    fn read_body(r: &mut Reader<'_>, version: i32) -> Result<Self, DecodeError> {
        let mut gc = Self {
            id: r.read_i64()?,
            cache_id: r.read_string()?,
            name: r.read_string()?,
            owner: r.read_string()?,
            placed_by: r.read_string()?,
            source: CacheSource::from_i32(r.read_i32()?),
            cache_type: r.read_i32()?,
            container: r.read_i32()?,
            available: r.read_bool()?,
            archived: r.read_bool()?,
            premium_only: r.read_bool()?,
            date_hidden: r.read_i64()?,
            date_published: r.read_i64()?,
            date_updated: r.read_i64()?,
            difficulty: r.read_f32()?,
            terrain: r.read_f32()?,
            country: r.read_string()?,
            state: r.read_string()?,
            encoded_hints: r.read_string()?,
            ..Self::default()
        };
        (gc.short_description, gc.long_description) = Self::read_description_pair(r)?;
        gc.notes = r.read_string()?;
        gc.found = r.read_bool()?;
        gc.favorite_points = r.read_i32()?;
        gc.attributes = read_list(r)?;
        gc.logs = read_list(r)?;
        gc.trackables = read_list(r)?;
        gc.waypoints = read_list(r)?;

        if version >= 1 {
            gc.computed = r.read_bool()?;
            gc.lat_original = r.read_f64()?;
            gc.lon_original = r.read_f64()?;
        }
        if version >= 2 {
            gc.gc_vote_average = r.read_f32()?;
            gc.gc_vote_count = r.read_i32()?;
            gc.gc_vote_user = r.read_f32()?;
        }
        Ok(gc)
    }
}

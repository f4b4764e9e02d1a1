//! Additional waypoints of a geocache (parking, stages, final)
//!
//! Layout history:
//!
//! - v0: code, type, name, lat, lon, description
//! - v1: user entered flag
//! - v2: formula, description modified flag

use std::io::Write;

use geowire_core::{CodecError, DecodeError, Reader, Storable, Writer};
use serde::Serialize;

/// Waypoint type names
pub mod wpt_type {
    pub const FINAL: &str = "Final Location";
    pub const PARKING: &str = "Parking Area";
    pub const VIRTUAL_STAGE: &str = "Virtual Stage";
    pub const PHYSICAL_STAGE: &str = "Physical Stage";
    pub const REFERENCE: &str = "Reference Point";
    pub const TRAILHEAD: &str = "Trailhead";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeocachingWaypoint {
    pub code: String,
    pub wpt_type: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub user_entered: bool,
    /// Coordinate formula for waypoints that must be computed
    pub formula: String,
    pub desc_modified: bool,
}

impl GeocachingWaypoint {
    /// True when the waypoint carries usable coordinates
    pub fn has_coordinates(&self) -> bool {
        !(self.latitude == 0.0 && self.longitude == 0.0)
    }
}

impl Storable for GeocachingWaypoint {
    const VERSION: i32 = 2;
    const NAME: &'static str = "GeocachingWaypoint";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, version: i32) -> Result<(), CodecError> {
        w.write_str(&self.code)?;
        w.write_str(&self.wpt_type)?;
        w.write_str(&self.name)?;
        w.write_f64(self.latitude)?;
        w.write_f64(self.longitude)?;
        w.write_str(&self.description)?;

        if version >= 1 {
            w.write_bool(self.user_entered)?;
        }
        if version >= 2 {
            w.write_str(&self.formula)?;
            w.write_bool(self.desc_modified)?;
        }
        Ok(())
    }

    fn read_body(r: &mut Reader<'_>, version: i32) -> Result<Self, DecodeError> {
        let mut wpt = Self {
            code: r.read_string()?,
            wpt_type: r.read_string()?,
            name: r.read_string()?,
            latitude: r.read_f64()?,
            longitude: r.read_f64()?,
            description: r.read_string()?,
            ..Self::default()
        };

        if version >= 1 {
            wpt.user_entered = r.read_bool()?;
        }
        if version >= 2 {
            wpt.formula = r.read_string()?;
            wpt.desc_modified = r.read_bool()?;
        }
        Ok(wpt)
    }
}

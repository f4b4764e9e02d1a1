//! Circle around a center location
//!
//! Layout history:
//!
//! - v0: base core, center, radius, geodetic flag
//! - v1: base state flags

use std::io::Write;

use geowire_core::{CodecError, DecodeError, Reader, Storable, Writer, read_object, write_object};
use serde::Serialize;

use crate::base::GeoDataBase;
use crate::location::Location;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Circle {
    pub base: GeoDataBase,
    pub center: Location,
    /// Metres
    pub radius: f32,
    /// Drawn along the Earth surface instead of as a flat circle
    pub geodetic: bool,
}

impl Circle {
    pub fn new(name: impl Into<String>, center: Location, radius: f32) -> Self {
        Self {
            base: GeoDataBase::named(name),
            center,
            radius,
            geodetic: false,
        }
    }

    /// True when `location` lies inside or on the circle
    pub fn contains(&self, location: &Location) -> bool {
        self.center.distance_to(location) <= f64::from(self.radius)
    }
}

impl Storable for Circle {
    const VERSION: i32 = 1;
    const NAME: &'static str = "Circle";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, version: i32) -> Result<(), CodecError> {
        self.base.write_core(w)?;
        write_object(w, &self.center)?;
        w.write_f32(self.radius)?;
        w.write_bool(self.geodetic)?;

        if version >= 1 {
            self.base.write_flags(w)?;
        }
        Ok(())
    }

    fn read_body(r: &mut Reader<'_>, version: i32) -> Result<Self, DecodeError> {
        let mut circle = Self {
            base: GeoDataBase::read_core(r)?,
            center: read_object(r)?,
            radius: r.read_f32()?,
            geodetic: r.read_bool()?,
        };

        if version >= 1 {
            circle.base.read_flags(r)?;
        }
        Ok(circle)
    }
}

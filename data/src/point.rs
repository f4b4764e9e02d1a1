//! Single point geodata
//!
//! Layout history:
//!
//! - v0: base core, location, optional geocache
//! - v1: base state flags

use std::io::Write;

use geowire_core::{
    CodecError, DecodeError, Reader, Storable, Writer, read_object, read_optional, write_object,
    write_optional,
};
use serde::Serialize;

use crate::base::GeoDataBase;
use crate::geocaching::GeocachingData;
use crate::location::Location;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Point {
    pub base: GeoDataBase,
    pub location: Location,
    pub gc_data: Option<GeocachingData>,
}

impl Point {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            base: GeoDataBase::named(name),
            location,
            gc_data: None,
        }
    }

    pub fn is_geocache(&self) -> bool {
        self.gc_data.as_ref().is_some_and(GeocachingData::is_valid)
    }
}

impl Storable for Point {
    const VERSION: i32 = 1;
    const NAME: &'static str = "Point";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, version: i32) -> Result<(), CodecError> {
        self.base.write_core(w)?;
        write_object(w, &self.location)?;
        write_optional(w, self.gc_data.as_ref())?;

        if version >= 1 {
            self.base.write_flags(w)?;
        }
        Ok(())
    }

    fn read_body(r: &mut Reader<'_>, version: i32) -> Result<Self, DecodeError> {
        let mut point = Self {
            base: GeoDataBase::read_core(r)?,
            location: read_object(r)?,
            gc_data: read_optional(r)?,
        };

        if version >= 1 {
            point.base.read_flags(r)?;
        }
        Ok(point)
    }
}

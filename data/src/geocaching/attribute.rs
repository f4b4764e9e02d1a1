use std::io::Write;

use geowire_core::{CodecError, DecodeError, Reader, Storable, Writer};
use serde::Serialize;

/// Cache attribute such as "dogs allowed" (positive) or "no dogs" (negative)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeocachingAttribute {
    pub id: i32,
    pub positive: bool,
}

impl GeocachingAttribute {
    pub fn new(id: i32, positive: bool) -> Self {
        Self { id, positive }
    }
}

impl Storable for GeocachingAttribute {
    const VERSION: i32 = 0;
    const NAME: &'static str = "GeocachingAttribute";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, _version: i32) -> Result<(), CodecError> {
        w.write_i32(self.id)?;
        w.write_bool(self.positive)
    }

    fn read_body(r: &mut Reader<'_>, _version: i32) -> Result<Self, DecodeError> {
        Ok(Self {
            id: r.read_i32()?,
            positive: r.read_bool()?,
        })
    }
}

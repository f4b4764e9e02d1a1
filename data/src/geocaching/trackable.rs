use std::io::Write;

use geowire_core::{CodecError, DecodeError, Reader, Storable, Writer};
use serde::Serialize;

/// Travel bug or geocoin currently in a cache.
///
/// v1 added goal, details and the public tracking code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeocachingTrackable {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub details_url: String,
    pub origin: String,
    pub owner: String,
    /// Unix time in milliseconds
    pub released: i64,
    pub goal: String,
    pub details: String,
    pub tb_code: String,
}

impl Storable for GeocachingTrackable {
    const VERSION: i32 = 1;
    const NAME: &'static str = "GeocachingTrackable";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, version: i32) -> Result<(), CodecError> {
        w.write_i64(self.id)?;
        w.write_str(&self.name)?;
        w.write_str(&self.image_url)?;
        w.write_str(&self.details_url)?;
        w.write_str(&self.origin)?;
        w.write_str(&self.owner)?;
        w.write_i64(self.released)?;

        if version >= 1 {
            w.write_str(&self.goal)?;
            w.write_str(&self.details)?;
            w.write_str(&self.tb_code)?;
        }
        Ok(())
    }

    fn read_body(r: &mut Reader<'_>, version: i32) -> Result<Self, DecodeError> {
        let mut trackable = Self {
            id: r.read_i64()?,
            name: r.read_string()?,
            image_url: r.read_string()?,
            details_url: r.read_string()?,
            origin: r.read_string()?,
            owner: r.read_string()?,
            released: r.read_i64()?,
            ..Self::default()
        };

        if version >= 1 {
            trackable.goal = r.read_string()?;
            trackable.details = r.read_string()?;
            trackable.tb_code = r.read_string()?;
        }
        Ok(trackable)
    }
}

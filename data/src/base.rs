//! Fields shared by every geodata variant

use std::io::Write;

use geowire_core::params::keys;
use geowire_core::{
    CodecError, DecodeError, ParamError, ParameterStore, Reader, Writer, read_optional,
    write_optional,
};
use serde::Serialize;

use crate::style::GeoDataStyle;

/// Who may see an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Privacy {
    #[default]
    Private,
    Shared,
    Public,
}

impl Privacy {
    fn to_i32(self) -> i32 {
        match self {
            Privacy::Private => 0,
            Privacy::Shared => 1,
            Privacy::Public => 2,
        }
    }

    fn from_i32(value: i32) -> Self {
        match value {
            1 => Privacy::Shared,
            2 => Privacy::Public,
            _ => Privacy::Private,
        }
    }
}

/// Identity, naming, styling and extra data common to points, tracks and circles.
///
/// The core fields exist since the first layout of every variant; the state
/// flags arrived later and each variant records in which of its versions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoDataBase {
    pub id: i64,
    pub name: String,
    /// Unix time in milliseconds
    pub time_created: i64,
    pub extra: ParameterStore,
    pub style_normal: Option<GeoDataStyle>,
    pub style_highlight: Option<GeoDataStyle>,
    pub privacy: Privacy,
    pub read_only: bool,
    pub visible: bool,
    pub selected: bool,
}

impl Default for GeoDataBase {
    fn default() -> Self {
        Self {
            id: -1,
            name: String::new(),
            time_created: 0,
            extra: ParameterStore::new(),
            style_normal: None,
            style_highlight: None,
            privacy: Privacy::Private,
            read_only: false,
            visible: true,
            selected: false,
        }
    }
}

impl GeoDataBase {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.extra.get_str(keys::DESCRIPTION)
    }

    /// Set or (with an empty string) clear the description
    pub fn set_description(&mut self, description: &str) -> Result<(), ParamError> {
        self.extra.put_str(keys::DESCRIPTION, description)
    }

    pub(crate) fn write_core<W: Write>(&self, w: &mut Writer<W>) -> Result<(), CodecError> {
        w.write_i64(self.id)?;
        w.write_str(&self.name)?;
        w.write_i64(self.time_created)?;
        self.extra.write_to(w)?;
        write_optional(w, self.style_normal.as_ref())?;
        write_optional(w, self.style_highlight.as_ref())
    }

    pub(crate) fn read_core(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: r.read_i64()?,
            name: r.read_string()?,
            time_created: r.read_i64()?,
            extra: ParameterStore::read_from(r)?,
            style_normal: read_optional(r)?,
            style_highlight: read_optional(r)?,
            ..Self::default()
        })
    }

    pub(crate) fn write_flags<W: Write>(&self, w: &mut Writer<W>) -> Result<(), CodecError> {
        w.write_i32(self.privacy.to_i32())?;
        w.write_bool(self.read_only)?;
        w.write_bool(self.visible)?;
        w.write_bool(self.selected)
    }

    pub(crate) fn read_flags(&mut self, r: &mut Reader<'_>) -> Result<(), DecodeError> {
        self.privacy = Privacy::from_i32(r.read_i32()?);
        self.read_only = r.read_bool()?;
        self.visible = r.read_bool()?;
        self.selected = r.read_bool()?;
        Ok(())
    }
}

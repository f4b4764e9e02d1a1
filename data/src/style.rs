//! Display styles attached to geodata
//!
//! A [`GeoDataStyle`] groups optional icon, line, label and polygon styles.
//! Sub-styles are written inline (presence flag + fields) and share the
//! version of the enclosing style.
//!
//! # Layout history
//!
//! - v0: name, icon?, line?, label?
//! - v1: polygon?

use std::io::Write;

use geowire_core::{CodecError, DecodeError, Reader, Storable, Writer};
use serde::Serialize;

/// Opaque white (ARGB)
pub const COLOR_WHITE: i32 = -1;
/// Opaque black (ARGB)
pub const COLOR_BLACK: i32 = 0xFF00_0000_u32 as i32;
/// Opaque blue (ARGB)
pub const COLOR_BLUE: i32 = 0xFF00_00FF_u32 as i32;
/// Half-transparent blue (ARGB)
pub const COLOR_BLUE_FILL: i32 = 0x8000_00FF_u32 as i32;

/// Unit of a hot spot coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HotSpotUnits {
    #[default]
    Fraction,
    Pixels,
    InsetPixels,
}

impl HotSpotUnits {
    fn to_i32(self) -> i32 {
        match self {
            HotSpotUnits::Fraction => 0,
            HotSpotUnits::Pixels => 1,
            HotSpotUnits::InsetPixels => 2,
        }
    }

    fn from_i32(value: i32) -> Self {
        match value {
            1 => HotSpotUnits::Pixels,
            2 => HotSpotUnits::InsetPixels,
            _ => HotSpotUnits::Fraction,
        }
    }
}

/// Unit of a line width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WidthUnits {
    #[default]
    Pixels,
    Meters,
}

impl WidthUnits {
    fn to_i32(self) -> i32 {
        match self {
            WidthUnits::Pixels => 0,
            WidthUnits::Meters => 1,
        }
    }

    fn from_i32(value: i32) -> Self {
        match value {
            1 => WidthUnits::Meters,
            _ => WidthUnits::Pixels,
        }
    }
}

/// Value a line is colored by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Colorize {
    #[default]
    None,
    Altitude,
    Speed,
    HeartRate,
    Cadence,
    Slope,
}

impl Colorize {
    fn to_i32(self) -> i32 {
        match self {
            Colorize::None => 0,
            Colorize::Altitude => 1,
            Colorize::Speed => 2,
            Colorize::HeartRate => 3,
            Colorize::Cadence => 4,
            Colorize::Slope => 5,
        }
    }

    fn from_i32(value: i32) -> Self {
        match value {
            1 => Colorize::Altitude,
            2 => Colorize::Speed,
            3 => Colorize::HeartRate,
            4 => Colorize::Cadence,
            5 => Colorize::Slope,
            _ => Colorize::None,
        }
    }
}

/// Anchor of an icon relative to its image
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HotSpot {
    pub x: f32,
    pub y: f32,
    pub x_units: HotSpotUnits,
    pub y_units: HotSpotUnits,
}

impl Default for HotSpot {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            x_units: HotSpotUnits::Fraction,
            y_units: HotSpotUnits::Fraction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconStyle {
    pub href: String,
    pub color: i32,
    pub scale: f32,
    /// Degrees; negative means "not rotated"
    pub heading: f32,
    pub hot_spot: HotSpot,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            href: String::new(),
            color: COLOR_WHITE,
            scale: 1.0,
            heading: -1.0,
            hot_spot: HotSpot::default(),
        }
    }
}

impl IconStyle {
    fn write<W: Write>(&self, w: &mut Writer<W>) -> Result<(), CodecError> {
        w.write_str(&self.href)?;
        w.write_i32(self.color)?;
        w.write_f32(self.scale)?;
        w.write_f32(self.heading)?;
        w.write_f32(self.hot_spot.x)?;
        w.write_f32(self.hot_spot.y)?;
        w.write_i32(self.hot_spot.x_units.to_i32())?;
        w.write_i32(self.hot_spot.y_units.to_i32())
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            href: r.read_string()?,
            color: r.read_i32()?,
            scale: r.read_f32()?,
            heading: r.read_f32()?,
            hot_spot: HotSpot {
                x: r.read_f32()?,
                y: r.read_f32()?,
                x_units: HotSpotUnits::from_i32(r.read_i32()?),
                y_units: HotSpotUnits::from_i32(r.read_i32()?),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: i32,
    pub width: f32,
    pub units: WidthUnits,
    pub colorize: Colorize,
    pub draw_outline: bool,
    pub outline_color: i32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: COLOR_BLUE,
            width: 1.0,
            units: WidthUnits::Pixels,
            colorize: Colorize::None,
            draw_outline: false,
            outline_color: COLOR_BLACK,
        }
    }
}

impl LineStyle {
    fn write<W: Write>(&self, w: &mut Writer<W>) -> Result<(), CodecError> {
        w.write_i32(self.color)?;
        w.write_f32(self.width)?;
        w.write_i32(self.units.to_i32())?;
        w.write_i32(self.colorize.to_i32())?;
        w.write_bool(self.draw_outline)?;
        w.write_i32(self.outline_color)
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            color: r.read_i32()?,
            width: r.read_f32()?,
            units: WidthUnits::from_i32(r.read_i32()?),
            colorize: Colorize::from_i32(r.read_i32()?),
            draw_outline: r.read_bool()?,
            outline_color: r.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStyle {
    pub color: i32,
    pub scale: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: COLOR_WHITE,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolyStyle {
    pub fill_color: i32,
    pub draw_fill: bool,
    pub draw_outline: bool,
}

impl Default for PolyStyle {
    fn default() -> Self {
        Self {
            fill_color: COLOR_BLUE_FILL,
            draw_fill: true,
            draw_outline: true,
        }
    }
}

/// Named style for a point, track or circle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoDataStyle {
    pub name: String,
    pub icon: Option<IconStyle>,
    pub line: Option<LineStyle>,
    pub label: Option<LabelStyle>,
    pub polygon: Option<PolyStyle>,
}

impl GeoDataStyle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Style with a single icon
    pub fn with_icon(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            icon: Some(IconStyle {
                href: href.into(),
                ..IconStyle::default()
            }),
            ..Self::new(name)
        }
    }

    /// Style with a single line
    pub fn with_line(name: impl Into<String>, color: i32, width: f32) -> Self {
        Self {
            line: Some(LineStyle {
                color,
                width,
                ..LineStyle::default()
            }),
            ..Self::new(name)
        }
    }
}

impl Storable for GeoDataStyle {
    const VERSION: i32 = 1;
    const NAME: &'static str = "GeoDataStyle";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, version: i32) -> Result<(), CodecError> {
        w.write_str(&self.name)?;

        w.write_bool(self.icon.is_some())?;
        if let Some(icon) = &self.icon {
            icon.write(w)?;
        }

        w.write_bool(self.line.is_some())?;
        if let Some(line) = &self.line {
            line.write(w)?;
        }

        w.write_bool(self.label.is_some())?;
        if let Some(label) = &self.label {
            w.write_i32(label.color)?;
            w.write_f32(label.scale)?;
        }

        if version >= 1 {
            w.write_bool(self.polygon.is_some())?;
            if let Some(polygon) = &self.polygon {
                w.write_i32(polygon.fill_color)?;
                w.write_bool(polygon.draw_fill)?;
                w.write_bool(polygon.draw_outline)?;
            }
        }
        Ok(())
    }

    fn read_body(r: &mut Reader<'_>, version: i32) -> Result<Self, DecodeError> {
        let mut style = GeoDataStyle::new(r.read_string()?);

        if r.read_bool()? {
            style.icon = Some(IconStyle::read(r)?);
        }
        if r.read_bool()? {
            style.line = Some(LineStyle::read(r)?);
        }
        if r.read_bool()? {
            style.label = Some(LabelStyle {
                color: r.read_i32()?,
                scale: r.read_f32()?,
            });
        }

        if version >= 1 && r.read_bool()? {
            style.polygon = Some(PolyStyle {
                fill_color: r.read_i32()?,
                draw_fill: r.read_bool()?,
                draw_outline: r.read_bool()?,
            });
        }
        Ok(style)
    }
}

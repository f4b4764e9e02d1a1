//! Geodata entity model
//!
//! Every entity implements [`geowire_core::Storable`] with its own layout
//! history, so payloads written by older builds keep decoding:
//!
//! | Entity | Version |
//! |--------|---------|
//! | [`Location`] | 2 |
//! | [`GeoDataStyle`] | 1 |
//! | [`Point`] | 1 |
//! | [`Track`] | 2 |
//! | [`Circle`] | 1 |
//! | [`GeoData`] | 0 |
//! | [`GeocachingData`] | 2 |
//! | [`TrackStats`] | 1 |

pub mod base;
pub mod circle;
pub mod geocaching;
pub mod geodata;
pub mod location;
pub mod point;
pub mod stats;
pub mod style;
pub mod track;

pub use base::{GeoDataBase, Privacy};
pub use circle::Circle;
pub use geocaching::{
    CacheSource, GeocachingAttribute, GeocachingData, GeocachingImage, GeocachingLog,
    GeocachingTrackable, GeocachingWaypoint,
};
pub use geodata::{GeoData, GeoDataKind};
pub use location::Location;
pub use point::Point;
pub use stats::TrackStats;
pub use style::{GeoDataStyle, IconStyle, LabelStyle, LineStyle, PolyStyle};
pub use track::Track;

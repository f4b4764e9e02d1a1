//! Location - a single geographic fix with optional measurements
//!
//! # Layout history
//!
//! - v0: id, provider, time, lat, lon, basic flags, present basic values
//!   (altitude, speed, bearing, accuracy)
//! - v1: sensor flags, present sensor values (heart rate, cadence, power,
//!   strides, temperature)
//! - v2: vertical accuracy

use std::io::Write;

use geowire_core::{CodecError, DecodeError, Reader, Storable, Writer};
use serde::Serialize;

/// Mean Earth radius in metres
const EARTH_RADIUS: f64 = 6_371_008.8;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BasicFlags: u32 {
        const ALTITUDE = 1 << 0;
        const SPEED = 1 << 1;
        const BEARING = 1 << 2;
        const ACCURACY = 1 << 3;
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct SensorFlags: u32 {
        const HEART_RATE = 1 << 0;
        const CADENCE = 1 << 1;
        const POWER = 1 << 2;
        const STRIDES = 1 << 3;
        const TEMPERATURE = 1 << 4;
    }
}

/// Geographic fix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: i64,
    pub provider: String,
    /// Unix time in milliseconds
    pub time: i64,
    latitude: f64,
    longitude: f64,
    pub altitude: Option<f64>,
    /// Metres per second
    pub speed: Option<f32>,
    /// Degrees clockwise from north
    pub bearing: Option<f32>,
    /// Horizontal accuracy in metres
    pub accuracy: Option<f32>,
    pub heart_rate: Option<i32>,
    pub cadence: Option<i32>,
    /// Watts
    pub power: Option<f32>,
    pub strides: Option<i32>,
    /// Degrees Celsius
    pub temperature: Option<f32>,
    pub accuracy_vertical: Option<f32>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            id: -1,
            provider: String::new(),
            time: 0,
            latitude: 0.0,
            longitude: 0.0,
            altitude: None,
            speed: None,
            bearing: None,
            accuracy: None,
            heart_rate: None,
            cadence: None,
            power: None,
            strides: None,
            temperature: None,
            accuracy_vertical: None,
        }
    }
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        let mut loc = Self::default();
        loc.set_latitude(latitude);
        loc.set_longitude(longitude);
        loc
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Set latitude, clamped into [-90, 90]
    pub fn set_latitude(&mut self, latitude: f64) {
        self.latitude = if latitude.is_nan() {
            tracing::warn!("latitude is NaN, storing 0");
            0.0
        } else if !(-90.0..=90.0).contains(&latitude) {
            let clamped = latitude.clamp(-90.0, 90.0);
            tracing::warn!(latitude, clamped, "latitude out of range, clamping");
            clamped
        } else {
            latitude
        };
    }

    /// Set longitude, wrapped into [-180, 180]
    pub fn set_longitude(&mut self, longitude: f64) {
        self.longitude = if !longitude.is_finite() {
            tracing::warn!(longitude, "longitude is not finite, storing 0");
            0.0
        } else if (-180.0..=180.0).contains(&longitude) {
            longitude
        } else {
            (longitude + 180.0).rem_euclid(360.0) - 180.0
        };
    }

    /// True when any sensor measurement is present
    pub fn has_sensor_data(&self) -> bool {
        !self.sensor_flags().is_empty()
    }

    /// Great-circle distance in metres
    pub fn distance_to(&self, other: &Location) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS * a.sqrt().min(1.0).asin()
    }

    fn basic_flags(&self) -> BasicFlags {
        let mut flags = BasicFlags::empty();
        flags.set(BasicFlags::ALTITUDE, self.altitude.is_some());
        flags.set(BasicFlags::SPEED, self.speed.is_some());
        flags.set(BasicFlags::BEARING, self.bearing.is_some());
        flags.set(BasicFlags::ACCURACY, self.accuracy.is_some());
        flags
    }

    fn sensor_flags(&self) -> SensorFlags {
        let mut flags = SensorFlags::empty();
        flags.set(SensorFlags::HEART_RATE, self.heart_rate.is_some());
        flags.set(SensorFlags::CADENCE, self.cadence.is_some());
        flags.set(SensorFlags::POWER, self.power.is_some());
        flags.set(SensorFlags::STRIDES, self.strides.is_some());
        flags.set(SensorFlags::TEMPERATURE, self.temperature.is_some());
        flags
    }
}

impl Storable for Location {
    const VERSION: i32 = 2;
    const NAME: &'static str = "Location";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, version: i32) -> Result<(), CodecError> {
        w.write_i64(self.id)?;
        w.write_str(&self.provider)?;
        w.write_i64(self.time)?;
        w.write_f64(self.latitude)?;
        w.write_f64(self.longitude)?;

        w.write_i32(self.basic_flags().bits() as i32)?;
        if let Some(altitude) = self.altitude {
            w.write_f64(altitude)?;
        }
        for value in [self.speed, self.bearing, self.accuracy].into_iter().flatten() {
            w.write_f32(value)?;
        }

        if version >= 1 {
            w.write_i32(self.sensor_flags().bits() as i32)?;
            if let Some(heart_rate) = self.heart_rate {
                w.write_i32(heart_rate)?;
            }
            if let Some(cadence) = self.cadence {
                w.write_i32(cadence)?;
            }
            if let Some(power) = self.power {
                w.write_f32(power)?;
            }
            if let Some(strides) = self.strides {
                w.write_i32(strides)?;
            }
            if let Some(temperature) = self.temperature {
                w.write_f32(temperature)?;
            }
        }

        if version >= 2 {
            w.write_bool(self.accuracy_vertical.is_some())?;
            w.write_f32(self.accuracy_vertical.unwrap_or_default())?;
        }
        Ok(())
    }

    fn read_body(r: &mut Reader<'_>, version: i32) -> Result<Self, DecodeError> {
        let mut loc = Location {
            id: r.read_i64()?,
            provider: r.read_string()?,
            time: r.read_i64()?,
            ..Location::default()
        };
        loc.set_latitude(r.read_f64()?);
        loc.set_longitude(r.read_f64()?);

        let basic = BasicFlags::from_bits_truncate(r.read_i32()? as u32);
        if basic.contains(BasicFlags::ALTITUDE) {
            loc.altitude = Some(r.read_f64()?);
        }
        if basic.contains(BasicFlags::SPEED) {
            loc.speed = Some(r.read_f32()?);
        }
        if basic.contains(BasicFlags::BEARING) {
            loc.bearing = Some(r.read_f32()?);
        }
        if basic.contains(BasicFlags::ACCURACY) {
            loc.accuracy = Some(r.read_f32()?);
        }

        if version >= 1 {
            let sensors = SensorFlags::from_bits_truncate(r.read_i32()? as u32);
            if sensors.contains(SensorFlags::HEART_RATE) {
                loc.heart_rate = Some(r.read_i32()?);
            }
            if sensors.contains(SensorFlags::CADENCE) {
                loc.cadence = Some(r.read_i32()?);
            }
            if sensors.contains(SensorFlags::POWER) {
                loc.power = Some(r.read_f32()?);
            }
            if sensors.contains(SensorFlags::STRIDES) {
                loc.strides = Some(r.read_i32()?);
            }
            if sensors.contains(SensorFlags::TEMPERATURE) {
                loc.temperature = Some(r.read_f32()?);
            }
        }

        if version >= 2 {
            let present = r.read_bool()?;
            let value = r.read_f32()?;
            loc.accuracy_vertical = present.then_some(value);
        }
        Ok(loc)
    }
}

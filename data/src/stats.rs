//! Track statistics
//!
//! # Layout history
//!
//! - v0: counts, times, lengths, speed and altitude extremes, elevation
//!   distances and heights
//! - v1: heart rate and cadence aggregates, energy, strides

use std::io::Write;

use geowire_core::{CodecError, DecodeError, Reader, Storable, Writer};
use serde::Serialize;

use crate::location::Location;

/// Speed below which a point is treated as standing still (m/s)
const MIN_MOVING_SPEED: f32 = 0.5;

/// Derived measurements of a track or a part of it.
///
/// Times are milliseconds, lengths and heights metres, speeds m/s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackStats {
    pub num_of_points: i32,
    /// Negative when unset
    pub start_time: i64,
    /// Negative when unset
    pub stop_time: i64,
    pub total_length: f32,
    pub total_length_move: f32,
    pub total_time: i64,
    pub total_time_move: i64,
    pub speed_max: f32,
    pub altitude_max: f32,
    pub altitude_min: f32,
    pub ele_neutral_distance: f32,
    pub ele_neutral_height: f32,
    pub ele_positive_distance: f32,
    pub ele_positive_height: f32,
    pub ele_negative_distance: f32,
    pub ele_negative_height: f32,
    pub heart_rate_average: i32,
    pub heart_rate_max: i32,
    pub cadence_average: i32,
    pub cadence_max: i32,
    /// Kilocalories
    pub energy: i32,
    pub num_of_strides: i32,
}

impl Default for TrackStats {
    fn default() -> Self {
        Self {
            num_of_points: 0,
            start_time: -1,
            stop_time: -1,
            total_length: 0.0,
            total_length_move: 0.0,
            total_time: 0,
            total_time_move: 0,
            speed_max: 0.0,
            altitude_max: f32::MIN,
            altitude_min: f32::MAX,
            ele_neutral_distance: 0.0,
            ele_neutral_height: 0.0,
            ele_positive_distance: 0.0,
            ele_positive_height: 0.0,
            ele_negative_distance: 0.0,
            ele_negative_height: 0.0,
            heart_rate_average: 0,
            heart_rate_max: 0,
            cadence_average: 0,
            cadence_max: 0,
            energy: 0,
            num_of_strides: 0,
        }
    }
}

impl TrackStats {
    /// Statistics of one continuous run of points
    pub fn from_segment(points: &[Location]) -> Self {
        let mut stats = Self::default();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return stats;
        };
        stats.num_of_points = points.len() as i32;
        stats.start_time = first.time;
        stats.stop_time = last.time;

        for pair in points.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let dist = a.distance_to(b) as f32;
            let dt = b.time.saturating_sub(a.time).max(0);
            stats.total_length += dist;
            stats.total_time = stats.total_time.saturating_add(dt);

            let moving = match b.speed {
                Some(speed) => speed >= MIN_MOVING_SPEED,
                None => dt > 0 && dist / (dt as f32 / 1000.0) >= MIN_MOVING_SPEED,
            };
            if moving {
                stats.total_length_move += dist;
                stats.total_time_move = stats.total_time_move.saturating_add(dt);
            }

            if let (Some(alt_a), Some(alt_b)) = (a.altitude, b.altitude) {
                let dh = (alt_b - alt_a) as f32;
                if dh > 0.0 {
                    stats.ele_positive_distance += dist;
                    stats.ele_positive_height += dh;
                } else if dh < 0.0 {
                    stats.ele_negative_distance += dist;
                    stats.ele_negative_height += -dh;
                } else {
                    stats.ele_neutral_distance += dist;
                }
            }
        }

        let mut hr_sum = 0i64;
        let mut hr_count = 0i64;
        let mut cad_sum = 0i64;
        let mut cad_count = 0i64;
        for loc in points {
            if let Some(altitude) = loc.altitude {
                stats.altitude_max = stats.altitude_max.max(altitude as f32);
                stats.altitude_min = stats.altitude_min.min(altitude as f32);
            }
            if let Some(speed) = loc.speed {
                stats.speed_max = stats.speed_max.max(speed);
            }
            if let Some(hr) = loc.heart_rate.filter(|hr| *hr > 0) {
                stats.heart_rate_max = stats.heart_rate_max.max(hr);
                hr_sum += i64::from(hr);
                hr_count += 1;
            }
            if let Some(cadence) = loc.cadence.filter(|c| *c > 0) {
                stats.cadence_max = stats.cadence_max.max(cadence);
                cad_sum += i64::from(cadence);
                cad_count += 1;
            }
        }
        if hr_count > 0 {
            stats.heart_rate_average = (hr_sum / hr_count) as i32;
        }
        if cad_count > 0 {
            stats.cadence_average = (cad_sum / cad_count) as i32;
        }

        let strides: Vec<i32> = points.iter().filter_map(|loc| loc.strides).collect();
        if let (Some(first), Some(last)) = (strides.first(), strides.last()) {
            stats.num_of_strides = last.saturating_sub(*first).max(0);
        }
        stats
    }

    /// Combine with statistics of another part of the same activity
    pub fn merge(&mut self, other: &TrackStats) {
        self.heart_rate_average = weighted_average(
            self.heart_rate_average,
            self.total_time_move,
            other.heart_rate_average,
            other.total_time_move,
        );
        self.cadence_average = weighted_average(
            self.cadence_average,
            self.total_time_move,
            other.cadence_average,
            other.total_time_move,
        );

        self.num_of_points = self.num_of_points.saturating_add(other.num_of_points);
        self.start_time = earliest(self.start_time, other.start_time);
        self.stop_time = self.stop_time.max(other.stop_time);
        self.total_length += other.total_length;
        self.total_length_move += other.total_length_move;
        self.total_time = self.total_time.saturating_add(other.total_time);
        self.total_time_move = self.total_time_move.saturating_add(other.total_time_move);
        self.speed_max = self.speed_max.max(other.speed_max);
        self.altitude_max = self.altitude_max.max(other.altitude_max);
        self.altitude_min = self.altitude_min.min(other.altitude_min);
        self.ele_neutral_distance += other.ele_neutral_distance;
        self.ele_neutral_height += other.ele_neutral_height;
        self.ele_positive_distance += other.ele_positive_distance;
        self.ele_positive_height += other.ele_positive_height;
        self.ele_negative_distance += other.ele_negative_distance;
        self.ele_negative_height += other.ele_negative_height;
        self.heart_rate_max = self.heart_rate_max.max(other.heart_rate_max);
        self.cadence_max = self.cadence_max.max(other.cadence_max);
        self.energy = self.energy.saturating_add(other.energy);
        self.num_of_strides = self.num_of_strides.saturating_add(other.num_of_strides);
    }

    /// Average speed over the whole time
    pub fn speed_average(&self) -> f32 {
        per_second(self.total_length, self.total_time)
    }

    /// Average speed while moving
    pub fn speed_average_move(&self) -> f32 {
        per_second(self.total_length_move, self.total_time_move)
    }

    /// True when at least one point carried an altitude
    pub fn has_altitude(&self) -> bool {
        self.altitude_max >= self.altitude_min
    }
}

/// Earlier of two start times, ignoring unset (negative) values
fn earliest(a: i64, b: i64) -> i64 {
    match (a < 0, b < 0) {
        (true, _) => b,
        (_, true) => a,
        _ => a.min(b),
    }
}

/// Average of two positive values weighted by non-negative times.
///
/// The result always lies between `a` and `b`.
fn weighted_average(a: i32, weight_a: i64, b: i32, weight_b: i64) -> i32 {
    if a <= 0 {
        return b;
    }
    if b <= 0 {
        return a;
    }
    let (a, b) = (i128::from(a), i128::from(b));
    let weight_a = i128::from(weight_a.max(0));
    let weight_b = i128::from(weight_b.max(0));
    let total = weight_a + weight_b;
    let average = if total > 0 {
        (a * weight_a + b * weight_b) / total
    } else {
        (a + b) / 2
    };
    average as i32
}

fn per_second(length: f32, time_ms: i64) -> f32 {
    if time_ms <= 0 {
        0.0
    } else {
        length / (time_ms as f32 / 1000.0)
    }
}

impl Storable for TrackStats {
    const VERSION: i32 = 1;
    const NAME: &'static str = "TrackStats";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, version: i32) -> Result<(), CodecError> {
        w.write_i32(self.num_of_points)?;
        w.write_i64(self.start_time)?;
        w.write_i64(self.stop_time)?;
        w.write_f32(self.total_length)?;
        w.write_f32(self.total_length_move)?;
        w.write_i64(self.total_time)?;
        w.write_i64(self.total_time_move)?;
        w.write_f32(self.speed_max)?;
        w.write_f32(self.altitude_max)?;
        w.write_f32(self.altitude_min)?;
        w.write_f32(self.ele_neutral_distance)?;
        w.write_f32(self.ele_neutral_height)?;
        w.write_f32(self.ele_positive_distance)?;
        w.write_f32(self.ele_positive_height)?;
        w.write_f32(self.ele_negative_distance)?;
        w.write_f32(self.ele_negative_height)?;

        if version >= 1 {
            w.write_i32(self.heart_rate_average)?;
            w.write_i32(self.heart_rate_max)?;
            w.write_i32(self.cadence_average)?;
            w.write_i32(self.cadence_max)?;
            w.write_i32(self.energy)?;
            w.write_i32(self.num_of_strides)?;
        }
        Ok(())
    }

    fn read_body(r: &mut Reader<'_>, version: i32) -> Result<Self, DecodeError> {
        let mut stats = Self {
            num_of_points: r.read_i32()?,
            start_time: r.read_i64()?,
            stop_time: r.read_i64()?,
            total_length: r.read_f32()?,
            total_length_move: r.read_f32()?,
            total_time: r.read_i64()?,
            total_time_move: r.read_i64()?,
            speed_max: r.read_f32()?,
            altitude_max: r.read_f32()?,
            altitude_min: r.read_f32()?,
            ele_neutral_distance: r.read_f32()?,
            ele_neutral_height: r.read_f32()?,
            ele_positive_distance: r.read_f32()?,
            ele_positive_height: r.read_f32()?,
            ele_negative_distance: r.read_f32()?,
            ele_negative_height: r.read_f32()?,
            ..Self::default()
        };

        if version >= 1 {
            stats.heart_rate_average = r.read_i32()?;
            stats.heart_rate_max = r.read_i32()?;
            stats.cadence_average = r.read_i32()?;
            stats.cadence_max = r.read_i32()?;
            stats.energy = r.read_i32()?;
            stats.num_of_strides = r.read_i32()?;
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geowire_core::{decode, encode, encode_as};

    fn fix(lat: f64, lon: f64, time: i64, altitude: f64) -> Location {
        let mut loc = Location::new(lat, lon);
        loc.time = time;
        loc.altitude = Some(altitude);
        loc
    }

    #[test]
    fn test_merge_scenario() {
        let mut a = TrackStats {
            total_length: 100.0,
            speed_max: 5.0,
            ..TrackStats::default()
        };
        let b = TrackStats {
            total_length: 50.0,
            speed_max: 8.0,
            ..TrackStats::default()
        };
        a.merge(&b);
        assert_eq!(a.total_length, 150.0);
        assert_eq!(a.speed_max, 8.0);
    }

    #[test]
    fn test_merge_times_and_extremes() {
        let mut a = TrackStats {
            num_of_points: 10,
            start_time: 2_000,
            stop_time: 5_000,
            altitude_max: 300.0,
            altitude_min: 200.0,
            heart_rate_average: 120,
            heart_rate_max: 150,
            total_time_move: 1_000,
            energy: 10,
            ..TrackStats::default()
        };
        let b = TrackStats {
            num_of_points: 5,
            start_time: 1_000,
            stop_time: 4_000,
            altitude_max: 250.0,
            altitude_min: 100.0,
            heart_rate_average: 150,
            heart_rate_max: 170,
            total_time_move: 2_000,
            energy: 5,
            ..TrackStats::default()
        };
        a.merge(&b);
        assert_eq!(a.num_of_points, 15);
        assert_eq!(a.start_time, 1_000);
        assert_eq!(a.stop_time, 5_000);
        assert_eq!(a.altitude_max, 300.0);
        assert_eq!(a.altitude_min, 100.0);
        assert_eq!(a.heart_rate_max, 170);
        assert_eq!(a.heart_rate_average, 140);
        assert_eq!(a.total_time_move, 3_000);
        assert_eq!(a.energy, 15);
    }

    #[test]
    fn test_merge_with_unset_times() {
        let mut empty = TrackStats::default();
        let b = TrackStats {
            start_time: 7,
            stop_time: 9,
            ..TrackStats::default()
        };
        empty.merge(&b);
        assert_eq!(empty.start_time, 7);
        assert_eq!(empty.stop_time, 9);
        assert!(!empty.has_altitude());
    }

    #[test]
    fn test_from_segment() {
        let mut points = vec![
            fix(50.0, 14.0, 0, 100.0),
            fix(50.001, 14.0, 60_000, 110.0),
            fix(50.002, 14.0, 120_000, 105.0),
        ];
        points[1].heart_rate = Some(120);
        points[2].heart_rate = Some(140);
        points[2].speed = Some(2.0);

        let stats = TrackStats::from_segment(&points);
        assert_eq!(stats.num_of_points, 3);
        assert_eq!(stats.start_time, 0);
        assert_eq!(stats.stop_time, 120_000);
        assert_eq!(stats.total_time, 120_000);
        assert!((stats.total_length - 222.4).abs() < 1.0, "{}", stats.total_length);
        assert_eq!(stats.ele_positive_height, 10.0);
        assert_eq!(stats.ele_negative_height, 5.0);
        assert_eq!(stats.altitude_max, 110.0);
        assert_eq!(stats.altitude_min, 100.0);
        assert_eq!(stats.speed_max, 2.0);
        assert_eq!(stats.heart_rate_max, 140);
        assert_eq!(stats.heart_rate_average, 130);
        // ~1.85 m/s between fixes: both legs count as moving
        assert_eq!(stats.total_time_move, 120_000);
        assert!(stats.has_altitude());
    }

    #[test]
    fn test_merge_saturates_counters() {
        let mut a = TrackStats {
            num_of_points: i32::MAX,
            total_time: i64::MAX - 10,
            total_time_move: i64::MAX,
            energy: i32::MAX,
            num_of_strides: i32::MAX - 1,
            heart_rate_average: i32::MAX,
            ..TrackStats::default()
        };
        let b = TrackStats {
            num_of_points: 1,
            total_time: 100,
            total_time_move: i64::MAX,
            energy: 5,
            num_of_strides: 7,
            heart_rate_average: i32::MAX - 2,
            ..TrackStats::default()
        };
        a.merge(&b);
        assert_eq!(a.num_of_points, i32::MAX);
        assert_eq!(a.total_time, i64::MAX);
        assert_eq!(a.total_time_move, i64::MAX);
        assert_eq!(a.energy, i32::MAX);
        assert_eq!(a.num_of_strides, i32::MAX);
        assert_eq!(a.heart_rate_average, i32::MAX - 1);
    }

    #[test]
    fn test_weighted_average_ignores_negative_weights() {
        assert_eq!(weighted_average(100, -50, 200, 0), 150);
        assert_eq!(weighted_average(100, -50, 200, 10), 200);
        assert_eq!(weighted_average(0, 10, 90, 10), 90);
    }

    #[test]
    fn test_from_segment_extreme_times() {
        let mut first = Location::new(50.0, 14.0);
        first.time = i64::MIN;
        let mut second = Location::new(50.001, 14.0);
        second.time = i64::MAX;
        let mut third = Location::new(50.002, 14.0);
        third.time = i64::MAX;
        third.speed = Some(3.0);
        first.strides = Some(i32::MIN);
        third.strides = Some(i32::MAX);

        let stats = TrackStats::from_segment(&[first, second, third]);
        assert_eq!(stats.total_time, i64::MAX);
        assert_eq!(stats.start_time, i64::MIN);
        assert_eq!(stats.stop_time, i64::MAX);
        assert_eq!(stats.num_of_strides, i32::MAX);
    }

    #[test]
    fn test_from_empty_segment() {
        assert_eq!(TrackStats::from_segment(&[]), TrackStats::default());
    }

    #[test]
    fn test_speed_average() {
        let stats = TrackStats {
            total_length: 1000.0,
            total_time: 500_000,
            total_length_move: 900.0,
            total_time_move: 300_000,
            ..TrackStats::default()
        };
        assert_eq!(stats.speed_average(), 2.0);
        assert_eq!(stats.speed_average_move(), 3.0);
        assert_eq!(TrackStats::default().speed_average(), 0.0);
    }

    #[test]
    fn test_roundtrip_and_old_version() {
        let stats = TrackStats {
            num_of_points: 3,
            start_time: 10,
            stop_time: 20,
            total_length: 1.5,
            heart_rate_average: 99,
            cadence_max: 80,
            num_of_strides: 12,
            ..TrackStats::default()
        };
        assert_eq!(decode::<TrackStats>(&encode(&stats).unwrap()).unwrap(), stats);

        let v0: TrackStats = decode(&encode_as(&stats, 0).unwrap()).unwrap();
        assert_eq!(
            v0,
            TrackStats {
                heart_rate_average: 0,
                cadence_max: 0,
                num_of_strides: 0,
                ..stats
            }
        );
    }
}

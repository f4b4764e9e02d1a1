//! Recorded or planned track
//!
//! Layout history:
//!
//! - v0: base core, points, breaks, waypoints, statistics
//! - v1: base state flags
//! - v2: activity type, folder style flag
//!
//! Breaks are stored as a count followed by one int per break. A break value
//! `i` splits the track between points `i` and `i + 1`. Decoded breaks are
//! sorted and deduplicated, so a stream with unordered breaks does not
//! re-encode byte for byte.

use std::io::Write;

use geowire_core::{
    CodecError, DecodeError, Reader, Storable, Writer, read_list, read_object, write_list,
    write_object,
};
use serde::Serialize;

use crate::base::GeoDataBase;
use crate::location::Location;
use crate::point::Point;
use crate::stats::TrackStats;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub base: GeoDataBase,
    pub points: Vec<Location>,
    breaks: Vec<i32>,
    pub waypoints: Vec<Point>,
    pub stats: TrackStats,
    pub activity_type: i32,
    pub use_folder_style: bool,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            base: GeoDataBase::default(),
            points: Vec::new(),
            breaks: Vec::new(),
            waypoints: Vec::new(),
            stats: TrackStats::default(),
            activity_type: 0,
            use_folder_style: true,
        }
    }
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: GeoDataBase::named(name),
            ..Self::default()
        }
    }

    pub fn add_point(&mut self, location: Location) {
        self.points.push(location);
    }

    /// Split the track after the point at `index`.
    ///
    /// Returns `false` for a negative index or an existing break.
    pub fn add_break_after(&mut self, index: i32) -> bool {
        if index < 0 {
            tracing::debug!(index, "ignoring negative break index");
            return false;
        }
        match self.breaks.binary_search(&index) {
            Ok(_) => false,
            Err(pos) => {
                self.breaks.insert(pos, index);
                true
            }
        }
    }

    /// Sorted, non-negative break indices
    pub fn breaks(&self) -> &[i32] {
        &self.breaks
    }

    /// Replace all breaks; negative indices are dropped
    pub fn set_breaks(&mut self, breaks: impl IntoIterator<Item = i32>) {
        self.breaks = breaks.into_iter().filter(|index| *index >= 0).collect();
        self.breaks.sort_unstable();
        self.breaks.dedup();
    }

    /// Continuous runs of points between breaks.
    ///
    /// Breaks at or past the last point are ignored; empty runs are skipped.
    pub fn segments(&self) -> impl Iterator<Item = &[Location]> + '_ {
        let len = self.points.len();
        let mut start = 0usize;
        let mut bounds = self
            .breaks
            .iter()
            .map(|b| *b as usize + 1)
            .filter(move |end| *end < len)
            .chain(std::iter::once(len));
        std::iter::from_fn(move || {
            loop {
                let end = bounds.next()?;
                let segment = &self.points[start..end];
                start = end;
                if !segment.is_empty() {
                    return Some(segment);
                }
            }
        })
    }

    /// Recompute statistics from the points, segment by segment
    pub fn compute_stats(&mut self) {
        let mut stats = TrackStats::default();
        for segment in self.segments() {
            stats.merge(&TrackStats::from_segment(segment));
        }
        self.stats = stats;
    }
}

impl Storable for Track {
    const VERSION: i32 = 2;
    const NAME: &'static str = "Track";

    fn write_body<W: Write>(&self, w: &mut Writer<W>, version: i32) -> Result<(), CodecError> {
        self.base.write_core(w)?;
        write_list(w, &self.points)?;
        w.write_count(self.breaks.len())?;
        for brk in &self.breaks {
            w.write_i32(*brk)?;
        }
        write_list(w, &self.waypoints)?;
        write_object(w, &self.stats)?;

        if version >= 1 {
            self.base.write_flags(w)?;
        }
        if version >= 2 {
            w.write_i32(self.activity_type)?;
            w.write_bool(self.use_folder_style)?;
        }
        Ok(())
    }

    fn read_body(r: &mut Reader<'_>, version: i32) -> Result<Self, DecodeError> {
        let base = GeoDataBase::read_core(r)?;
        let points = read_list(r)?;

        let count = r.read_count(4)?;
        let mut breaks = Vec::with_capacity(count);
        for _ in 0..count {
            let index = r.read_i32()?;
            if index < 0 {
                return Err(DecodeError::invalid(
                    "breaks",
                    format!("negative break index {index}"),
                ));
            }
            breaks.push(index);
        }
        breaks.sort_unstable();
        breaks.dedup();

        let mut track = Self {
            base,
            points,
            breaks,
            waypoints: read_list(r)?,
            stats: read_object(r)?,
            ..Self::default()
        };

        if version >= 1 {
            track.base.read_flags(r)?;
        }
        if version >= 2 {
            track.activity_type = r.read_i32()?;
            track.use_folder_style = r.read_bool()?;
        }
        Ok(track)
    }
}

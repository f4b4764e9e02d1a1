//! Sample command - write a demonstration payload

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use geowire_core::storable::write_to_path;
use geowire_core::{AttachmentKind, Storable};
use geowire_data::{
    Circle, GeoData, GeoDataStyle, GeocachingData, GeocachingLog, Location, Point, Track,
};

use crate::kind::EntityKind;

/// Arguments for the sample command
#[derive(Args)]
pub struct SampleArgs {
    /// Output file
    pub out: PathBuf,

    /// Entity kind to write
    #[arg(long, value_enum, default_value = "track")]
    pub kind: EntityKind,
}

/// Execute the sample command
pub fn execute(args: SampleArgs) -> Result<()> {
    match args.kind {
        EntityKind::Location => write(&args, &fix(0)),
        EntityKind::Point => write(&args, &sample_point()?),
        EntityKind::Track => write(&args, &sample_track()),
        EntityKind::Circle => write(&args, &sample_circle()),
        EntityKind::Geodata => write(&args, &GeoData::from(sample_track())),
        EntityKind::Stats => write(&args, &sample_track().stats),
        EntityKind::Geocache => write(&args, &sample_geocache()),
    }
}

fn write<T: Storable>(args: &SampleArgs, value: &T) -> Result<()> {
    write_to_path(&args.out, value)
        .with_context(|| format!("Failed to write sample: {}", args.out.display()))?;
    println!(
        "Wrote {} v{} to {}",
        T::NAME,
        T::VERSION,
        args.out.display()
    );
    Ok(())
}

fn fix(i: usize) -> Location {
    let mut loc = Location::new(50.0870 + i as f64 * 0.0004, 14.4210 + i as f64 * 0.0002);
    loc.provider = "gps".to_string();
    loc.time = 1_700_000_000_000 + i as i64 * 10_000;
    loc.altitude = Some(190.0 + i as f64 * 0.5);
    loc.speed = Some(4.5);
    loc.heart_rate = Some(128 + i as i32);
    loc
}

fn sample_track() -> Track {
    let mut track = Track::new("Sample run");
    track.base.time_created = 1_700_000_000_000;
    track.base.style_normal = Some(GeoDataStyle::with_line(
        "track",
        geowire_data::style::COLOR_BLUE,
        4.0,
    ));
    for i in 0..12 {
        track.add_point(fix(i));
    }
    track.add_break_after(5);
    track.waypoints.push(Point::new("Turnaround", fix(6)));
    track.compute_stats();
    track
}

fn sample_point() -> Result<Point> {
    let mut point = Point::new("Old Town Square", Location::new(50.0875, 14.4214));
    point.base.set_description("Meeting point")?;
    point.base.extra.add_attachment(
        AttachmentKind::Url,
        "wiki",
        "https://en.wikipedia.org/wiki/Old_Town_Square",
    )?;
    point.gc_data = Some(sample_geocache());
    Ok(point)
}

fn sample_circle() -> Circle {
    let mut circle = Circle::new("Search area", Location::new(50.0875, 14.4214), 150.0);
    circle.geodetic = true;
    circle
}

fn sample_geocache() -> GeocachingData {
    let mut gc = GeocachingData::new("GC12AB3", "Old Town Multi");
    gc.owner = "geowire".to_string();
    gc.difficulty = 2.0;
    gc.terrain = 1.5;
    gc.short_description = "A short walk through the old town.".to_string();
    gc.logs.push(GeocachingLog {
        finder: "hiker".to_string(),
        text: "TFTC".to_string(),
        date: 1_700_000_500_000,
        ..GeocachingLog::default()
    });
    gc
}

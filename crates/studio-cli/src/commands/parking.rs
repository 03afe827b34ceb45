use std::path::PathBuf;

use clap::Args;
use studio_core::parking::{AvailabilityLevel, style_segments, validate_hour};
use studio_infrastructure::load_segments;

use crate::context::AppContext;
use crate::ui;

#[derive(Args, Debug)]
pub struct ParkingArgs {
    /// Hour of day, 0 to 23
    #[arg(long, default_value_t = 8, value_parser = parse_hour)]
    hour: u8,

    /// GeoJSON FeatureCollection of street segments
    #[arg(long)]
    segments: Option<PathBuf>,
}

fn parse_hour(value: &str) -> Result<u8, String> {
    let hour: u8 = value.parse().map_err(|e| format!("{e}"))?;
    validate_hour(hour).map_err(|e| e.user_message())
}

pub fn run(ctx: &AppContext, args: ParkingArgs) {
    let path = args.segments.unwrap_or_else(|| ctx.paths.segments_file());
    let segments = match load_segments(&path) {
        Ok(segments) => segments,
        Err(e) => {
            ui::error(&e.to_string());
            return;
        }
    };

    ui::heading(&format!("Parking availability at {:02}:00", args.hour));
    for segment in style_segments(&segments, args.hour) {
        ui::print_segment(&segment);
    }
    let legend: Vec<String> = [
        AvailabilityLevel::Low,
        AvailabilityLevel::Medium,
        AvailabilityLevel::High,
    ]
    .iter()
    .map(|level| format!("{level} {}", level.color()))
    .collect();
    println!("\n  {}", ui::muted(&legend.join(" · ")));
}

//! Inside command - test a point against the geofence.

use clap::Args;
use geotrack::coord::Coordinate;
use geotrack::geometry::{distance_to_boundary_meters, great_circle_distance_meters};

use super::common::{load_config, FenceArgs};
use crate::error::CliError;

/// Arguments for the inside command.
#[derive(Debug, Args)]
pub struct InsideArgs {
    /// Latitude of the point
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the point
    #[arg(allow_negative_numbers = true)]
    pub lon: f64,

    #[command(flatten)]
    pub fence: FenceArgs,
}

/// Run the inside command.
pub fn run(args: InsideArgs) -> Result<(), CliError> {
    let config = load_config()?;
    let region = args.fence.resolve(&config)?;
    let point = Coordinate::checked(args.lat, args.lon)?;

    let inside = region.contains(point);
    let to_center = great_circle_distance_meters(point, region.center());
    let to_boundary = distance_to_boundary_meters(point, &region);

    println!("Fence:    {}", region);
    println!("Point:    {}", point);
    println!("Status:   {}", if inside { "inside" } else { "outside" });
    println!("Center:   {:.1} m away", to_center);
    if inside {
        println!("Boundary: {:.1} m to go", -to_boundary);
    } else {
        println!("Boundary: {:.1} m beyond", to_boundary);
    }
    Ok(())
}

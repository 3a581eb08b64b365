//! Distance command - great-circle distance and bearing between two points.

use clap::Args;
use geotrack::coord::Coordinate;
use geotrack::geometry::{great_circle_distance_meters, initial_bearing_degrees};

use crate::error::CliError;

/// Arguments for the distance command.
#[derive(Debug, Args)]
pub struct DistanceArgs {
    /// Latitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lat1: f64,

    /// Longitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lon1: f64,

    /// Latitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lat2: f64,

    /// Longitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lon2: f64,
}

/// Run the distance command.
pub fn run(args: DistanceArgs) -> Result<(), CliError> {
    let from = Coordinate::checked(args.lat1, args.lon1)?;
    let to = Coordinate::checked(args.lat2, args.lon2)?;

    let meters = great_circle_distance_meters(from, to);
    let bearing = initial_bearing_degrees(from, to);

    println!("From:     {}", from);
    println!("To:       {}", to);
    println!("Distance: {:.1} m ({:.3} km)", meters, meters / 1000.0);
    println!("Bearing:  {:.1}°", bearing);
    Ok(())
}

//! Polygon command - rasterize a circle into vertices.

use std::path::PathBuf;

use clap::Args;
use geotrack::geometry::circle_to_polygon;
use geotrack::surface::{GeoJsonSurface, MapSurface, OverlayKind, PolygonStyle};

use super::common::{load_config, write_output, FenceArgs};
use crate::error::CliError;

/// Arguments for the polygon command.
#[derive(Debug, Args)]
pub struct PolygonArgs {
    /// Fence center latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub center_lat: Option<f64>,

    /// Fence center longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub center_lon: Option<f64>,

    /// Circle radius in kilometers (default: configured fence radius)
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Number of vertices (default: render.polygon_points)
    #[arg(long)]
    pub points: Option<usize>,

    /// Write the polygon as GeoJSON to this file instead of printing vertices
    #[arg(long, value_name = "FILE")]
    pub geojson: Option<PathBuf>,
}

/// Run the polygon command.
pub fn run(args: PolygonArgs) -> Result<(), CliError> {
    let config = load_config()?;
    let center = FenceArgs {
        center_lat: args.center_lat,
        center_lon: args.center_lon,
        radius_m: None,
    }
    .center(&config)?;
    let radius_km = args.radius_km.unwrap_or(config.fence.radius_m / 1000.0);
    let points = args.points.unwrap_or(config.render.polygon_points);

    let ring = circle_to_polygon(center, radius_km, points)?;

    match args.geojson {
        Some(path) => {
            let surface = GeoJsonSurface::new();
            surface.draw_polygon(&ring, OverlayKind::Geofence, PolygonStyle::default());
            let text = surface.to_string_pretty().map_err(|e| CliError::Output {
                path: path.clone(),
                message: e.to_string(),
            })?;
            write_output(&path, &text)?;
            println!(
                "Wrote {}-vertex polygon ({} km around {}) to {}",
                ring.len(),
                radius_km,
                center,
                path.display()
            );
        }
        None => {
            println!("latitude,longitude");
            for vertex in &ring {
                println!("{:.8},{:.8}", vertex.latitude, vertex.longitude);
            }
        }
    }
    Ok(())
}

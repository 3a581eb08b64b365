//! Circle rasterization.
//!
//! Approximates a circle of a given radius around a center as an ordered ring
//! of vertices. The ring is NOT closed: the first vertex is not repeated at the
//! end, renderers close it implicitly.
//!
//! # Approximation
//!
//! ```text
//! θ_i   = 2π·i / n
//! Δlat  = (r / R) · cos θ_i
//! Δlon  = (r / R) · sin θ_i / cos(lat_center)
//! ```
//!
//! This is a flat-Earth small-angle approximation, not a geodesic circle. The
//! `cos(lat)` term compensates for meridian convergence and is undefined at the
//! poles, so pole-centred circles are rejected rather than producing infinite
//! longitudes.

use std::f64::consts::PI;

use super::GeometryError;
use crate::coord::{Coordinate, EARTH_RADIUS_KM};

/// Default number of vertices when rendering a circle.
pub const DEFAULT_POLYGON_POINTS: usize = 60;

/// Fewest vertices that still form a polygon.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Rasterize a circle into `num_points` vertices.
///
/// Vertex 0 lies due north of the center; subsequent vertices proceed
/// clockwise (north, east, south, west) at equal angular steps.
///
/// # Errors
///
/// - [`GeometryError::TooFewPoints`] if `num_points < 3`
/// - [`GeometryError::InvalidRadius`] if `radius_km` is not positive and finite
/// - [`GeometryError::PoleSingularity`] if the center sits on a pole
/// - [`GeometryError::InvalidCenter`] if the center is not finite
pub fn circle_to_polygon(
    center: Coordinate,
    radius_km: f64,
    num_points: usize,
) -> Result<Vec<Coordinate>, GeometryError> {
    if num_points < MIN_POLYGON_POINTS {
        return Err(GeometryError::TooFewPoints(num_points));
    }
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(GeometryError::InvalidRadius(radius_km));
    }
    if !center.latitude.is_finite() || !center.longitude.is_finite() {
        return Err(GeometryError::InvalidCenter {
            latitude: center.latitude,
            longitude: center.longitude,
        });
    }
    if center.latitude.abs() >= 90.0 {
        return Err(GeometryError::PoleSingularity(center.latitude));
    }

    let angular_radius = radius_km / EARTH_RADIUS_KM;
    let lat_scale = center.latitude.to_radians().cos();

    let points = (0..num_points)
        .map(|i| {
            let angle = (i as f64 / num_points as f64) * 2.0 * PI;

            let lat_offset = angular_radius * angle.cos();
            let lon_offset = angular_radius * angle.sin() / lat_scale;

            Coordinate::new(
                center.latitude + lat_offset.to_degrees(),
                center.longitude + lon_offset.to_degrees(),
            )
        })
        .collect();

    Ok(points)
}

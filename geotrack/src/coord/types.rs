//! Core coordinate and region types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{self, GeometryError};

/// Minimum latitude in degrees.
pub const MIN_LAT: f64 = -90.0;

/// Maximum latitude in degrees.
pub const MAX_LAT: f64 = 90.0;

/// Minimum longitude in degrees.
pub const MIN_LON: f64 = -180.0;

/// Maximum longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors raised when validating raw latitude/longitude input.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CoordError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("Invalid latitude: {0} (must be between -90 and 90)")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not finite.
    #[error("Invalid longitude: {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without validation.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Whether both components are finite and within WGS84 range.
    pub fn is_valid(&self) -> bool {
        Self::checked(self.latitude, self.longitude).is_ok()
    }

    /// Great-circle distance to another coordinate in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        geometry::great_circle_distance_meters(*self, *other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_hem = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let lon_hem = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.6}°{} {:.6}°{}",
            self.latitude.abs(),
            lat_hem,
            self.longitude.abs(),
            lon_hem
        )
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coord: Coordinate) -> Self {
        (coord.latitude, coord.longitude)
    }
}

/// A circular geofence: a center and a radius in meters.
///
/// The radius is guaranteed positive and finite by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleRegion {
    center: Coordinate,
    radius_m: f64,
}

impl CircleRegion {
    /// Create a region, rejecting non-positive or non-finite radii.
    pub fn new(center: Coordinate, radius_m: f64) -> Result<Self, GeometryError> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius_m));
        }
        Ok(Self { center, radius_m })
    }

    /// Center of the region.
    pub fn center(&self) -> Coordinate {
        self.center
    }

    /// Radius in meters.
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Whether `point` lies inside the region (boundary inclusive).
    pub fn contains(&self, point: Coordinate) -> bool {
        geometry::is_inside_region(point, self)
    }

    /// Approximate the region boundary as a polygon for rendering.
    pub fn to_polygon(&self, num_points: usize) -> Result<Vec<Coordinate>, GeometryError> {
        geometry::circle_to_polygon(self.center, self.radius_m / 1000.0, num_points)
    }
}

impl fmt::Display for CircleRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} r={:.0}m", self.center, self.radius_m)
    }
}

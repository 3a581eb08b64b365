//! Geographic coordinate types.
//!
//! Provides the WGS84 [`Coordinate`] used throughout the crate and the
//! [`CircleRegion`] geofence built on top of it.
//!
//! Coordinates are plain latitude/longitude pairs in degrees. Construction via
//! [`Coordinate::new`] performs no validation so that raw fixes from a location
//! stream pass through untouched; use [`Coordinate::checked`] where input comes
//! from a user or a file.

mod types;

pub use types::{CircleRegion, CoordError, Coordinate, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Mean Earth radius used by every spherical calculation in the crate (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = EARTH_RADIUS_KM * 1000.0;

//! Spherical geometry for geofencing.
//!
//! Two independent pieces live here:
//!
//! - **Evaluator** ([`distance`]): haversine great-circle distance and the
//!   inclusive point-in-circle test built on it.
//! - **Rasterizer** ([`polygon`]): approximates a circle on the sphere as an
//!   ordered ring of vertices for rendering.
//!
//! Both use a spherical Earth of radius [`crate::coord::EARTH_RADIUS_KM`]. The
//! error is the usual haversine approximation error, acceptable for regions
//! under ~100 km.
//!
//! # Example
//!
//! ```
//! use geotrack::coord::{CircleRegion, Coordinate};
//! use geotrack::geometry::{circle_to_polygon, great_circle_distance_meters};
//!
//! let a = Coordinate::new(0.0, 0.0);
//! let b = Coordinate::new(1.0, 0.0);
//! let d = great_circle_distance_meters(a, b);
//! assert!((d - 111_195.0).abs() < 1.0);
//!
//! let fence = CircleRegion::new(a, 150_000.0).unwrap();
//! assert!(fence.contains(b));
//!
//! let ring = circle_to_polygon(a, 1.0, 4).unwrap();
//! assert_eq!(ring.len(), 4);
//! ```

mod distance;
mod error;
mod polygon;

pub use distance::{
    distance_to_boundary_meters, great_circle_distance_meters, initial_bearing_degrees,
    is_inside_region, is_within_distance,
};
pub use error::GeometryError;
pub use polygon::{circle_to_polygon, DEFAULT_POLYGON_POINTS, MIN_POLYGON_POINTS};

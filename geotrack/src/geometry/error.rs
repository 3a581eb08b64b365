//! Error types for geometry operations.

use thiserror::Error;

/// Invalid input to a geometric computation.
///
/// Raised instead of letting NaN or infinity propagate into rendered shapes.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A polygon needs at least three vertices.
    #[error("Polygon needs at least 3 points, got {0}")]
    TooFewPoints(usize),

    /// Radius is zero, negative or not finite.
    #[error("Invalid radius: {0} (must be positive and finite)")]
    InvalidRadius(f64),

    /// Longitude offsets are undefined at the poles.
    #[error("Cannot rasterize a circle centred on a pole (latitude {0})")]
    PoleSingularity(f64),

    /// Center coordinate is not finite.
    #[error("Invalid center: ({latitude}, {longitude})")]
    InvalidCenter { latitude: f64, longitude: f64 },
}

//! Map drawing surface.
//!
//! The session never renders anything itself; it issues drawing commands to a
//! [`MapSurface`] supplied by the UI layer. [`GeoJsonSurface`] is a bundled
//! implementation that keeps the latest scene as GeoJSON, useful for exporting
//! a session or inspecting it in tests.

mod geojson;

pub use geojson::GeoJsonSurface;

use std::fmt;

use crate::coord::Coordinate;

/// Icon shown for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerIcon {
    /// The tracked device.
    Vehicle,
    /// A fixed destination point.
    Destination,
}

impl MarkerIcon {
    /// Stable identifier used in exported scenes.
    pub fn name(&self) -> &'static str {
        match self {
            MarkerIcon::Vehicle => "vehicle",
            MarkerIcon::Destination => "destination",
        }
    }
}

impl fmt::Display for MarkerIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a polygon overlay represents.
///
/// A surface holds at most one overlay per kind; drawing again replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// The monitored geofence.
    Geofence,
    /// The ring drawn around the destination marker.
    DestinationRing,
}

impl OverlayKind {
    /// Stable identifier used in exported scenes.
    pub fn name(&self) -> &'static str {
        match self {
            OverlayKind::Geofence => "geofence",
            OverlayKind::DestinationRing => "destination-ring",
        }
    }
}

/// An RGBA colour with alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Create a colour.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Fill and stroke for a polygon overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: f32,
}

impl Default for PolygonStyle {
    /// Translucent red fence.
    fn default() -> Self {
        Self {
            fill: Rgba::new(255, 0, 0, 0.1),
            stroke: Rgba::new(255, 0, 0, 1.0),
            stroke_width: 2.0,
        }
    }
}

/// Receiver of map drawing commands.
///
/// Methods take `&self` because surfaces are shared between the session and the
/// UI; implementations use interior mutability. Commands are issued while the
/// session holds its state lock, so implementations must not call back into the
/// session.
pub trait MapSurface: Send + Sync {
    /// Move the camera so `center` is in view.
    fn set_camera_center(&self, center: Coordinate);

    /// Show a marker at `at`, replacing any previous marker with the same icon.
    fn place_marker(&self, at: Coordinate, icon: MarkerIcon);

    /// Draw the travelled path, replacing any previous path.
    fn draw_polyline(&self, path: &[Coordinate]);

    /// Draw a closed polygon overlay, replacing any previous overlay of the
    /// same kind. The ring is passed without repeating the first vertex.
    fn draw_polygon(&self, ring: &[Coordinate], kind: OverlayKind, style: PolygonStyle);

    /// Remove the vehicle marker and the travelled path.
    fn clear_track(&self) {}
}

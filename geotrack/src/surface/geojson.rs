//! GeoJSON-backed map surface.
//!
//! Records the current scene (camera, markers, path, polygons) and exports it
//! as a GeoJSON `FeatureCollection`. Coordinates are written in GeoJSON's
//! `[longitude, latitude]` order and polygon rings are closed on export.

use parking_lot::Mutex;
use serde_json::{json, Value};

use super::{MapSurface, MarkerIcon, OverlayKind, PolygonStyle};
use crate::coord::Coordinate;

#[derive(Debug, Default)]
struct Scene {
    camera: Option<Coordinate>,
    markers: Vec<(MarkerIcon, Coordinate)>,
    polyline: Vec<Coordinate>,
    polygons: Vec<(OverlayKind, Vec<Coordinate>, PolygonStyle)>,
}

/// Map surface that keeps the latest scene in memory.
#[derive(Debug, Default)]
pub struct GeoJsonSurface {
    scene: Mutex<Scene>,
}

impl GeoJsonSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last camera center, if any.
    pub fn camera_center(&self) -> Option<Coordinate> {
        self.scene.lock().camera
    }

    /// Position of the marker with `icon`, if shown.
    pub fn marker(&self, icon: MarkerIcon) -> Option<Coordinate> {
        self.scene
            .lock()
            .markers
            .iter()
            .find(|(i, _)| *i == icon)
            .map(|(_, c)| *c)
    }

    /// Currently drawn path.
    pub fn polyline(&self) -> Vec<Coordinate> {
        self.scene.lock().polyline.clone()
    }

    /// Number of polygon overlays drawn.
    pub fn polygon_count(&self) -> usize {
        self.scene.lock().polygons.len()
    }

    /// Ring of the overlay with `kind`, if drawn.
    pub fn polygon(&self, kind: OverlayKind) -> Option<Vec<Coordinate>> {
        self.scene
            .lock()
            .polygons
            .iter()
            .find(|(k, _, _)| *k == kind)
            .map(|(_, ring, _)| ring.clone())
    }

    /// Export the scene as a GeoJSON `FeatureCollection`.
    pub fn to_geojson(&self) -> Value {
        let scene = self.scene.lock();
        let mut features = Vec::new();

        for (kind, ring, style) in &scene.polygons {
            let mut closed: Vec<[f64; 2]> = ring.iter().map(position).collect();
            if let Some(first) = closed.first().copied() {
                closed.push(first);
            }
            features.push(json!({
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [closed] },
                "properties": {
                    "kind": kind.name(),
                    "fill": style.fill.to_string(),
                    "stroke": style.stroke.to_string(),
                    "stroke-width": style.stroke_width,
                },
            }));
        }

        if !scene.polyline.is_empty() {
            let line: Vec<[f64; 2]> = scene.polyline.iter().map(position).collect();
            features.push(json!({
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": line },
                "properties": { "kind": "path" },
            }));
        }

        for (icon, at) in &scene.markers {
            features.push(json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": position(at) },
                "properties": { "kind": "marker", "icon": icon.name() },
            }));
        }

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }

    /// Export the scene as pretty-printed GeoJSON text.
    pub fn to_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_geojson())
    }
}

fn position(coord: &Coordinate) -> [f64; 2] {
    [coord.longitude, coord.latitude]
}

impl MapSurface for GeoJsonSurface {
    fn set_camera_center(&self, center: Coordinate) {
        self.scene.lock().camera = Some(center);
    }

    fn place_marker(&self, at: Coordinate, icon: MarkerIcon) {
        let mut scene = self.scene.lock();
        match scene.markers.iter_mut().find(|(i, _)| *i == icon) {
            Some(entry) => entry.1 = at,
            None => scene.markers.push((icon, at)),
        }
    }

    fn draw_polyline(&self, path: &[Coordinate]) {
        self.scene.lock().polyline = path.to_vec();
    }

    fn draw_polygon(&self, ring: &[Coordinate], kind: OverlayKind, style: PolygonStyle) {
        let mut scene = self.scene.lock();
        match scene.polygons.iter_mut().find(|(k, _, _)| *k == kind) {
            Some(entry) => {
                entry.1 = ring.to_vec();
                entry.2 = style;
            }
            None => scene.polygons.push((kind, ring.to_vec(), style)),
        }
    }

    fn clear_track(&self) {
        let mut scene = self.scene.lock();
        scene.polyline.clear();
        scene.markers.retain(|(icon, _)| *icon != MarkerIcon::Vehicle);
    }
}

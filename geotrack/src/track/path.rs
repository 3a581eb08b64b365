//! Travelled path history.
//!
//! Keeps every delivered fix in arrival order for drawing the travelled
//! polyline, and derives metrics (length, heading, bounds) from it on demand.
//!
//! # Design
//!
//! - Unbounded by default: the path equals the sequence of delivered fixes
//! - An optional capacity limit trims the oldest fixes for long sessions
//! - Heading is the great-circle bearing of the most recent leg

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::coord::Coordinate;
use crate::geometry::{great_circle_distance_meters, initial_bearing_degrees};

/// Legs shorter than this are treated as stationary when deriving heading.
const MIN_DISTANCE_FOR_HEADING_M: f64 = 1.0;

/// A single fix in the path.
#[derive(Debug, Clone, Copy)]
pub struct TrackPoint {
    /// Where the device was.
    pub coordinate: Coordinate,
    /// When the fix was recorded.
    pub timestamp: Instant,
}

impl TrackPoint {
    /// Create a track point stamped with the current time.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            timestamp: Instant::now(),
        }
    }

    /// Create a track point with an explicit timestamp.
    pub fn with_timestamp(coordinate: Coordinate, timestamp: Instant) -> Self {
        Self {
            coordinate,
            timestamp,
        }
    }
}

/// Geographic bounding box of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Southernmost latitude
    pub min_lat: f64,
    /// Northernmost latitude
    pub max_lat: f64,
    /// Westernmost longitude
    pub min_lon: f64,
    /// Easternmost longitude
    pub max_lon: f64,
}

impl GeoBounds {
    /// Create a bounding box from a single point.
    pub fn from_point(coord: Coordinate) -> Self {
        Self {
            min_lat: coord.latitude,
            max_lat: coord.latitude,
            min_lon: coord.longitude,
            max_lon: coord.longitude,
        }
    }

    /// Expand this bounding box to include a point.
    pub fn expand(&mut self, coord: Coordinate) {
        self.min_lat = self.min_lat.min(coord.latitude);
        self.max_lat = self.max_lat.max(coord.latitude);
        self.min_lon = self.min_lon.min(coord.longitude);
        self.max_lon = self.max_lon.max(coord.longitude);
    }

    /// Center of the bounds.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

/// Ordered history of visited coordinates (oldest first).
#[derive(Debug, Clone, Default)]
pub struct TrackPath {
    points: VecDeque<TrackPoint>,
    capacity_limit: Option<usize>,
}

impl TrackPath {
    /// Create an empty, unbounded path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path that keeps at most `limit` fixes, dropping the oldest.
    ///
    /// A limit of zero is treated as one.
    pub fn with_capacity_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            points: VecDeque::with_capacity(limit),
            capacity_limit: Some(limit),
        }
    }

    /// Append a fix stamped with the current time.
    pub fn push(&mut self, coordinate: Coordinate) {
        self.push_point(TrackPoint::new(coordinate));
    }

    /// Append a fix with an explicit timestamp.
    pub fn push_point(&mut self, point: TrackPoint) {
        self.points.push_back(point);

        if let Some(limit) = self.capacity_limit {
            while self.points.len() > limit {
                self.points.pop_front();
            }
        }
    }

    /// Number of fixes in the path.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no fixes.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent fix.
    pub fn latest(&self) -> Option<Coordinate> {
        self.points.back().map(|p| p.coordinate)
    }

    /// Iterate over fixes, oldest first.
    pub fn points(&self) -> impl Iterator<Item = &TrackPoint> {
        self.points.iter()
    }

    /// Iterate over coordinates, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.points.iter().map(|p| p.coordinate)
    }

    /// Copy the coordinates out, oldest first.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.iter().collect()
    }

    /// Drop every fix.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Total travelled length in meters (sum of consecutive legs).
    pub fn length_meters(&self) -> f64 {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .map(|(a, b)| great_circle_distance_meters(a.coordinate, b.coordinate))
            .sum()
    }

    /// Heading of the most recent leg in degrees (0 = north).
    ///
    /// Returns `None` with fewer than two fixes or when the last leg is too
    /// short to give a stable bearing.
    pub fn heading_degrees(&self) -> Option<f64> {
        let len = self.points.len();
        if len < 2 {
            return None;
        }

        let previous = self.points.get(len - 2)?.coordinate;
        let latest = self.points.get(len - 1)?.coordinate;

        if great_circle_distance_meters(previous, latest) < MIN_DISTANCE_FOR_HEADING_M {
            return None;
        }

        Some(initial_bearing_degrees(previous, latest))
    }

    /// Bounding box of the whole path.
    pub fn bounds(&self) -> Option<GeoBounds> {
        let mut iter = self.iter();
        let mut bounds = GeoBounds::from_point(iter.next()?);
        for coord in iter {
            bounds.expand(coord);
        }
        Some(bounds)
    }

    /// Time between the oldest and newest fix.
    pub fn time_span(&self) -> Option<Duration> {
        let oldest = self.points.front()?;
        let newest = self.points.back()?;
        Some(newest.timestamp.duration_since(oldest.timestamp))
    }
}

//! Per-session tracking state.

use serde::Serialize;

use super::TrackPath;
use crate::coord::Coordinate;

/// Mutable state owned by a tracking session.
///
/// Created empty when a session starts, mutated on every delivered fix and
/// cleared when the session stops.
#[derive(Debug, Clone, Default)]
pub struct TrackState {
    /// Latest known position.
    pub position: Option<Coordinate>,
    /// Every fix delivered since the session started.
    pub path: TrackPath,
    /// Whether the latest position was inside the geofence.
    pub inside: bool,
}

/// Outcome of feeding a fix into [`TrackState::record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Containment did not change.
    None,
    /// Moved from outside to inside.
    Entered,
    /// Moved from inside to outside.
    Exited,
}

impl TrackState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty state whose path keeps at most `limit` fixes.
    pub fn with_path_capacity(limit: usize) -> Self {
        Self {
            path: TrackPath::with_capacity_limit(limit),
            ..Self::default()
        }
    }

    /// Record a fix and its containment result, reporting any transition.
    pub fn record(&mut self, coordinate: Coordinate, now_inside: bool) -> Transition {
        self.position = Some(coordinate);
        self.path.push(coordinate);

        if now_inside == self.inside {
            return Transition::None;
        }

        self.inside = now_inside;
        if now_inside {
            Transition::Entered
        } else {
            Transition::Exited
        }
    }

    /// Reset to the empty state.
    pub fn clear(&mut self) {
        self.position = None;
        self.path.clear();
        self.inside = false;
    }

    /// Point-in-time copy for readers outside the session.
    pub fn snapshot(&self) -> TrackSnapshot {
        TrackSnapshot {
            position: self.position,
            path: self.path.coordinates(),
            inside: self.inside,
            length_m: self.path.length_meters(),
            heading_deg: self.path.heading_degrees(),
        }
    }
}

/// Read-only copy of a session's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSnapshot {
    /// Latest known position.
    pub position: Option<Coordinate>,
    /// Visited coordinates, oldest first.
    pub path: Vec<Coordinate>,
    /// Whether the device is inside the geofence.
    pub inside: bool,
    /// Travelled distance in meters.
    pub length_m: f64,
    /// Heading of the last leg, if moving.
    pub heading_deg: Option<f64>,
}

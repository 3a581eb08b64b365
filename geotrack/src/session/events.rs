//! Events broadcast by a tracking session.

use std::fmt;

use thiserror::Error;

use crate::coord::Coordinate;
use crate::provider::ProviderError;

/// Something the UI layer may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    /// The device moved from outside to inside the geofence.
    Entered { position: Coordinate },

    /// The device moved from inside to outside the geofence.
    Exited { position: Coordinate },

    /// The location provider failed. The session is stopped afterwards.
    Error(ProviderError),

    /// The location stream finished. Path and position are kept until the
    /// session is stopped or restarted.
    StreamEnded,
}

impl TrackingEvent {
    /// Whether this is an enter or exit transition.
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            TrackingEvent::Entered { .. } | TrackingEvent::Exited { .. }
        )
    }
}

impl fmt::Display for TrackingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingEvent::Entered { position } => write!(f, "entered region at {}", position),
            TrackingEvent::Exited { position } => write!(f, "exited region at {}", position),
            TrackingEvent::Error(e) => write!(f, "location error: {}", e),
            TrackingEvent::StreamEnded => write!(f, "location stream ended"),
        }
    }
}

/// Errors returned by session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The provider refused to start a watch.
    #[error("Failed to start location watch: {0}")]
    Provider(#[from] ProviderError),
}

//! Location stream providers.
//!
//! A [`LocationProvider`] pushes position fixes to a [`LocationSink`] after
//! [`LocationProvider::watch`] is called, until the matching
//! [`LocationProvider::clear_watch`]. Delivery is push-based and may happen on
//! any thread; the sink is the only way fixes reach a session.
//!
//! # Architecture
//!
//! ```text
//! ManualProvider ──┐
//!                  ├──► LocationSink ──► TrackingSession ──► TrackingEvent
//! ReplayProvider ──┘    (epoch-tagged)
//! ```
//!
//! Providers apply the stream's own distance filter ([`DistanceFilter`]) so
//! jitter below `distance_filter_m` never reaches the session.

mod filter;
mod manual;
mod replay;
mod track_file;

pub use filter::DistanceFilter;
pub use manual::ManualProvider;
pub use replay::ReplayProvider;
pub use track_file::{load_track, parse_track_csv, parse_track_json, TrackFileError};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::coord::Coordinate;

/// Default minimum movement between delivered fixes (meters).
pub const DEFAULT_DISTANCE_FILTER_M: f64 = 10.0;

/// Default maximum age of a cached fix the provider may hand out.
pub const DEFAULT_MAXIMUM_AGE: Duration = Duration::from_millis(1000);

/// Errors reported by a location provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The user or platform refused location access.
    #[error("Location permission denied")]
    PermissionDenied,

    /// No position source is available.
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    /// The provider gave up waiting for a fix.
    #[error("Timed out waiting for a position fix")]
    Timeout,
}

/// Options passed to [`LocationProvider::watch`].
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    /// Request the most accurate position source available.
    pub enable_high_accuracy: bool,
    /// Minimum movement in meters before a new fix is delivered.
    pub distance_filter_m: f64,
    /// Maximum age of a cached position the provider may deliver.
    pub maximum_age: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            distance_filter_m: DEFAULT_DISTANCE_FILTER_M,
            maximum_age: DEFAULT_MAXIMUM_AGE,
        }
    }
}

impl WatchOptions {
    /// Set the distance filter.
    pub fn with_distance_filter_m(mut self, meters: f64) -> Self {
        self.distance_filter_m = meters;
        self
    }

    /// Set the maximum cached fix age.
    pub fn with_maximum_age(mut self, age: Duration) -> Self {
        self.maximum_age = age;
        self
    }

    /// Set the accuracy preference.
    pub fn with_high_accuracy(mut self, enabled: bool) -> Self {
        self.enable_high_accuracy = enabled;
        self
    }
}

/// Handle identifying an active watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(pub u64);

impl fmt::Display for WatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single message on a location stream.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    /// A new position fix.
    Position(Coordinate),
    /// The stream failed.
    Error(ProviderError),
    /// The stream has no more fixes (finite sources such as replays).
    Ended,
}

/// Receiving end of a location stream.
///
/// Cheap to clone; every clone forwards to the same handler.
#[derive(Clone)]
pub struct LocationSink {
    handler: Arc<dyn Fn(LocationUpdate) + Send + Sync>,
}

impl LocationSink {
    /// Wrap a handler function.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(LocationUpdate) + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Deliver a position fix.
    pub fn deliver(&self, coordinate: Coordinate) {
        (self.handler)(LocationUpdate::Position(coordinate));
    }

    /// Report a stream failure.
    pub fn fail(&self, error: ProviderError) {
        (self.handler)(LocationUpdate::Error(error));
    }

    /// Signal that no more fixes will arrive.
    pub fn end(&self) {
        (self.handler)(LocationUpdate::Ended);
    }
}

impl fmt::Debug for LocationSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationSink").finish_non_exhaustive()
    }
}

/// Source of live position fixes.
///
/// Implementations must stop calling the sink once `clear_watch` returns for
/// its watch, except for a delivery already in flight; sessions guard against
/// that case themselves.
pub trait LocationProvider: Send + Sync {
    /// Begin delivering fixes to `sink`.
    fn watch(&self, options: WatchOptions, sink: LocationSink) -> Result<WatchId, ProviderError>;

    /// Stop delivering fixes for `id`. Unknown ids are ignored.
    fn clear_watch(&self, id: WatchId);
}

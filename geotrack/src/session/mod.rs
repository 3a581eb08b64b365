//! Live location tracking against a geofence.
//!
//! A [`TrackingSession`] subscribes to a [`LocationProvider`], records every
//! delivered fix and reports transitions across the geofence boundary.
//!
//! # Lifecycle
//!
//! ```text
//!            start()                      fix ──► path += fix
//! Stopped ───────────► Watching ──────────────►   evaluate region
//!    ▲                  │   │                     flip? ──► Entered / Exited
//!    │      stop()      │   │ provider error
//!    └──────────────────┘   └──────────────► Error event, Stopped
//! ```
//!
//! # Concurrency
//!
//! All state sits behind one mutex. Each `start` creates a sink tagged with a
//! fresh epoch; `stop` bumps the epoch before unsubscribing, so a delivery that
//! was already in flight when `stop` ran is discarded instead of mutating the
//! cleared state.
//!
//! [`LocationProvider`]: crate::provider::LocationProvider

mod events;
mod tracker;

pub use events::{SessionError, TrackingEvent};
pub use tracker::{Destination, TrackingSession, TrackingSessionBuilder, DEFAULT_EVENT_CAPACITY};

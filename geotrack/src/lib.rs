//! GeoTrack - live location tracking with circular geofences
//!
//! This library tracks a device's position from a location stream, records the
//! travelled path and reports when the device enters or leaves a circular
//! region.
//!
//! # Modules
//!
//! - [`coord`]: coordinates and the [`coord::CircleRegion`] geofence
//! - [`geometry`]: haversine distance, containment and circle rasterization
//! - [`track`]: path history and per-session state
//! - [`provider`]: location stream trait and bundled providers
//! - [`surface`]: map drawing trait and a GeoJSON implementation
//! - [`session`]: the tracking session tying it all together
//! - [`config`]: INI configuration file
//! - [`logging`]: tracing subscriber setup

pub mod config;
pub mod coord;
pub mod geometry;
pub mod logging;
pub mod provider;
pub mod session;
pub mod surface;
pub mod track;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Path history and tracking state.
//!
//! [`TrackPath`] stores the travelled path; [`TrackState`] bundles it with the
//! current position and the inside/outside flag a session mutates on every fix.

mod path;
mod state;

pub use path::{GeoBounds, TrackPath, TrackPoint};
pub use state::{TrackSnapshot, TrackState, Transition};

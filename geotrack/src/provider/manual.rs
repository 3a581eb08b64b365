//! Push-driven provider for embedding and tests.
//!
//! The host feeds fixes in through [`ManualProvider::push`]; the provider fans
//! them out synchronously to every active watch on the caller's thread, after
//! each watch's distance filter.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use super::{DistanceFilter, LocationProvider, LocationSink, ProviderError, WatchId, WatchOptions};
use crate::coord::Coordinate;

struct ManualWatch {
    sink: LocationSink,
    filter: DistanceFilter,
}

#[derive(Default)]
struct ManualState {
    next_id: u64,
    watches: HashMap<WatchId, ManualWatch>,
    fail_next_watch: Option<ProviderError>,
}

/// Location provider driven by explicit calls.
///
/// Sinks are invoked with the internal lock released, so a sink may call back
/// into the provider (for example to clear its own watch).
#[derive(Default)]
pub struct ManualProvider {
    state: Mutex<ManualState>,
}

impl ManualProvider {
    /// Create a provider with no watches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a fix to every active watch. Returns how many watches received it.
    pub fn push(&self, coordinate: Coordinate) -> usize {
        let sinks: Vec<LocationSink> = {
            let mut state = self.state.lock();
            state
                .watches
                .values_mut()
                .filter_map(|watch| {
                    watch
                        .filter
                        .accept(coordinate)
                        .then(|| watch.sink.clone())
                })
                .collect()
        };

        debug!(%coordinate, watches = sinks.len(), "Manual fix pushed");
        for sink in &sinks {
            sink.deliver(coordinate);
        }
        sinks.len()
    }

    /// Report a stream error to every active watch.
    pub fn push_error(&self, error: ProviderError) {
        for sink in self.sinks() {
            sink.fail(error.clone());
        }
    }

    /// Signal end-of-stream to every active watch.
    pub fn end_streams(&self) {
        for sink in self.sinks() {
            sink.end();
        }
    }

    /// Make the next `watch` call fail with `error`.
    pub fn fail_next_watch(&self, error: ProviderError) {
        self.state.lock().fail_next_watch = Some(error);
    }

    /// Number of active watches.
    pub fn active_watches(&self) -> usize {
        self.state.lock().watches.len()
    }

    fn sinks(&self) -> Vec<LocationSink> {
        self.state
            .lock()
            .watches
            .values()
            .map(|watch| watch.sink.clone())
            .collect()
    }
}

impl LocationProvider for ManualProvider {
    fn watch(&self, options: WatchOptions, sink: LocationSink) -> Result<WatchId, ProviderError> {
        let mut state = self.state.lock();

        if let Some(error) = state.fail_next_watch.take() {
            return Err(error);
        }

        state.next_id += 1;
        let id = WatchId(state.next_id);
        state.watches.insert(
            id,
            ManualWatch {
                sink,
                filter: DistanceFilter::new(options.distance_filter_m),
            },
        );

        debug!(watch = %id, distance_filter_m = options.distance_filter_m, "Manual watch started");
        Ok(id)
    }

    fn clear_watch(&self, id: WatchId) {
        if self.state.lock().watches.remove(&id).is_some() {
            debug!(watch = %id, "Manual watch cleared");
        }
    }
}

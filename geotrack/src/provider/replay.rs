//! Replays a recorded track as a live location stream.
//!
//! Each watch spawns a Tokio task that walks the recorded fixes at a fixed
//! interval, applies the distance filter and pushes survivors to the sink.
//! When the fixes run out the sink receives [`LocationUpdate::Ended`].
//!
//! [`LocationUpdate::Ended`]: super::LocationUpdate::Ended

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{DistanceFilter, LocationProvider, LocationSink, ProviderError, WatchId, WatchOptions};
use crate::coord::Coordinate;

/// Default delay between replayed fixes.
pub const DEFAULT_REPLAY_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Default)]
struct ReplayState {
    next_id: u64,
    tasks: HashMap<WatchId, JoinHandle<()>>,
}

/// Location provider backed by a recorded list of fixes.
///
/// Requires a Tokio runtime at `watch` time.
pub struct ReplayProvider {
    fixes: Arc<[Coordinate]>,
    interval: Duration,
    state: Arc<Mutex<ReplayState>>,
}

impl ReplayProvider {
    /// Create a replay of `fixes` with the default interval.
    pub fn new(fixes: Vec<Coordinate>) -> Self {
        Self::with_interval(fixes, DEFAULT_REPLAY_INTERVAL)
    }

    /// Create a replay with a custom delay between fixes.
    pub fn with_interval(fixes: Vec<Coordinate>, interval: Duration) -> Self {
        Self {
            fixes: fixes.into(),
            interval,
            state: Arc::new(Mutex::new(ReplayState::default())),
        }
    }

    /// Number of recorded fixes.
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    /// Whether the recording is empty.
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Number of replays still running.
    pub fn active_watches(&self) -> usize {
        self.state
            .lock()
            .tasks
            .values()
            .filter(|task| !task.is_finished())
            .count()
    }
}

impl LocationProvider for ReplayProvider {
    fn watch(&self, options: WatchOptions, sink: LocationSink) -> Result<WatchId, ProviderError> {
        let runtime = Handle::try_current()
            .map_err(|_| ProviderError::Unavailable("no async runtime for replay".to_string()))?;

        let mut state = self.state.lock();
        state.tasks.retain(|_, task| !task.is_finished());
        state.next_id += 1;
        let id = WatchId(state.next_id);

        let fixes = Arc::clone(&self.fixes);
        let interval = self.interval;
        let registry = Arc::clone(&self.state);
        let task = runtime.spawn(async move {
            let mut filter = DistanceFilter::new(options.distance_filter_m);
            let mut delivered = 0usize;

            for (index, coordinate) in fixes.iter().copied().enumerate() {
                if index > 0 && !interval.is_zero() {
                    tokio::time::sleep(interval).await;
                }
                if filter.accept(coordinate) {
                    sink.deliver(coordinate);
                    delivered += 1;
                }
                // Let clear_watch take effect between fixes even with a zero interval
                tokio::task::yield_now().await;
            }

            info!(watch = %id, total = fixes.len(), delivered, "Replay finished");
            registry.lock().tasks.remove(&id);
            sink.end();
        });

        state.tasks.insert(id, task);
        debug!(watch = %id, fixes = self.fixes.len(), interval_ms = interval.as_millis() as u64, "Replay started");
        Ok(id)
    }

    fn clear_watch(&self, id: WatchId) {
        if let Some(task) = self.state.lock().tasks.remove(&id) {
            task.abort();
            debug!(watch = %id, "Replay cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::LocationUpdate;
    use tokio::sync::mpsc;

    fn channel_sink() -> (LocationSink, mpsc::UnboundedReceiver<LocationUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            LocationSink::new(move |update| {
                let _ = tx.send(update);
            }),
            rx,
        )
    }

    fn line(n: usize) -> Vec<Coordinate> {
        (0..n)
            .map(|i| Coordinate::new(0.001 * i as f64, 0.0))
            .collect()
    }

    #[test]
    fn test_watch_without_runtime_fails() {
        let provider = ReplayProvider::new(line(3));
        let (sink, _rx) = channel_sink();
        assert!(matches!(
            provider.watch(WatchOptions::default(), sink),
            Err(ProviderError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_replays_all_fixes_then_ends() {
        let provider = ReplayProvider::with_interval(line(4), Duration::ZERO);
        let (sink, mut rx) = channel_sink();
        provider.watch(WatchOptions::default(), sink).unwrap();

        let mut positions = Vec::new();
        while let Some(update) = rx.recv().await {
            match update {
                LocationUpdate::Position(c) => positions.push(c),
                LocationUpdate::Ended => break,
                LocationUpdate::Error(e) => panic!("unexpected error {e}"),
            }
        }

        assert_eq!(positions, line(4));
    }

    #[tokio::test]
    async fn test_replay_applies_distance_filter() {
        let fixes = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.00001, 0.0),
            Coordinate::new(0.001, 0.0),
        ];
        let provider = ReplayProvider::with_interval(fixes, Duration::ZERO);
        let (sink, mut rx) = channel_sink();
        provider.watch(WatchOptions::default(), sink).unwrap();

        let mut count = 0;
        while let Some(update) = rx.recv().await {
            match update {
                LocationUpdate::Position(_) => count += 1,
                _ => break,
            }
        }
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_clear_watch_cancels_replay() {
        let provider = ReplayProvider::with_interval(line(100), Duration::from_millis(20));
        let (sink, mut rx) = channel_sink();
        let id = provider.watch(WatchOptions::default(), sink).unwrap();

        // First fix is immediate
        let first = rx.recv().await.unwrap();
        assert!(matches!(first, LocationUpdate::Position(_)));

        provider.clear_watch(id);
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(provider.active_watches(), 0);
        // Aborted task drops its sink, closing the channel without Ended
        while let Ok(update) = rx.try_recv() {
            assert_ne!(update, LocationUpdate::Ended);
        }
    }
}

//! Tracking session implementation.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{SessionError, TrackingEvent};
use crate::coord::{CircleRegion, Coordinate};
use crate::geometry::{circle_to_polygon, GeometryError, DEFAULT_POLYGON_POINTS};
use crate::provider::{
    LocationProvider, LocationSink, LocationUpdate, ProviderError, WatchId, WatchOptions,
};
use crate::surface::{MapSurface, MarkerIcon, OverlayKind, PolygonStyle};
use crate::track::{TrackSnapshot, TrackState, Transition};

/// Default capacity of the event broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// A fixed point of interest drawn with a marker and a ring around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Destination {
    /// Marker position.
    pub position: Coordinate,
    /// Radius of the ring drawn around the marker (km).
    pub ring_radius_km: f64,
    /// Vertices used for the ring.
    pub ring_points: usize,
}

/// Mutable session state, guarded by a single mutex.
#[derive(Debug, Default)]
struct Inner {
    /// Generation token; bumped on every start/stop so stale sinks are ignored.
    epoch: u64,
    watch: Option<WatchId>,
    track: TrackState,
    /// Error that ended the current epoch's stream, kept for `start`.
    failure: Option<ProviderError>,
}

struct Shared {
    provider: Arc<dyn LocationProvider>,
    region: CircleRegion,
    options: WatchOptions,
    surface: Option<Arc<dyn MapSurface>>,
    destination: Option<Destination>,
    polygon_points: usize,
    events: broadcast::Sender<TrackingEvent>,
    inner: Mutex<Inner>,
}

impl Shared {
    /// Build a sink bound to `epoch`. Holds only a weak reference so a provider
    /// keeping the sink alive never keeps the session alive.
    fn sink_for(self: &Arc<Self>, epoch: u64) -> LocationSink {
        let weak: Weak<Shared> = Arc::downgrade(self);
        LocationSink::new(move |update| {
            if let Some(shared) = weak.upgrade() {
                shared.handle_update(epoch, update);
            }
        })
    }

    fn handle_update(&self, epoch: u64, update: LocationUpdate) {
        match update {
            LocationUpdate::Position(coordinate) => self.on_position(epoch, coordinate),
            LocationUpdate::Error(error) => self.on_error(epoch, error),
            LocationUpdate::Ended => self.on_ended(epoch),
        }
    }

    fn on_position(&self, epoch: u64, coordinate: Coordinate) {
        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            debug!(%coordinate, "Dropping fix from stale watch");
            return;
        }

        let now_inside = self.region.contains(coordinate);
        let transition = inner.track.record(coordinate, now_inside);

        debug!(
            %coordinate,
            inside = now_inside,
            path_len = inner.track.path.len(),
            "Position update"
        );

        if let Some(surface) = &self.surface {
            surface.set_camera_center(coordinate);
            surface.place_marker(coordinate, MarkerIcon::Vehicle);
            surface.draw_polyline(&inner.track.path.coordinates());
        }

        match transition {
            Transition::None => {}
            Transition::Entered => {
                info!(%coordinate, region = %self.region, "Entered region");
                self.emit(TrackingEvent::Entered {
                    position: coordinate,
                });
            }
            Transition::Exited => {
                info!(%coordinate, region = %self.region, "Exited region");
                self.emit(TrackingEvent::Exited {
                    position: coordinate,
                });
            }
        }
    }

    fn on_error(&self, epoch: u64, error: ProviderError) {
        let watch = {
            let mut inner = self.inner.lock();
            if inner.epoch != epoch {
                return;
            }
            inner.epoch += 1;
            inner.failure = Some(error.clone());
            inner.track.clear();
            if let Some(surface) = &self.surface {
                surface.clear_track();
            }
            inner.watch.take()
        };

        if let Some(id) = watch {
            self.provider.clear_watch(id);
        }

        warn!(error = %error, "Location stream failed, session stopped");
        self.emit(TrackingEvent::Error(error));
    }

    fn on_ended(&self, epoch: u64) {
        let watch = {
            let mut inner = self.inner.lock();
            if inner.epoch != epoch {
                return;
            }
            inner.epoch += 1;
            inner.watch.take()
        };

        if let Some(id) = watch {
            self.provider.clear_watch(id);
        }

        info!("Location stream ended");
        self.emit(TrackingEvent::StreamEnded);
    }

    /// Broadcast an event. Having no subscribers is not an error.
    fn emit(&self, event: TrackingEvent) {
        let _ = self.events.send(event);
    }
}

/// Live tracking session for a single geofence.
///
/// Owns at most one provider subscription and the [`TrackState`] it feeds.
/// Every delivered fix is appended to the path, mirrored to the map surface
/// and evaluated against the region; inside/outside flips are broadcast as
/// [`TrackingEvent`]s.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use geotrack::coord::{CircleRegion, Coordinate};
/// use geotrack::provider::ManualProvider;
/// use geotrack::session::{TrackingEvent, TrackingSession};
///
/// let provider = Arc::new(ManualProvider::new());
/// let region = CircleRegion::new(Coordinate::new(0.0, 0.0), 500.0).unwrap();
/// let session = TrackingSession::new(provider.clone(), region);
/// let mut events = session.subscribe();
///
/// session.start().unwrap();
/// provider.push(Coordinate::new(0.0, 0.001));
///
/// assert!(matches!(events.try_recv(), Ok(TrackingEvent::Entered { .. })));
/// ```
pub struct TrackingSession {
    shared: Arc<Shared>,
}

impl TrackingSession {
    /// Create a session with default options and no map surface.
    pub fn new(provider: Arc<dyn LocationProvider>, region: CircleRegion) -> Self {
        Self::builder(provider, region).build()
    }

    /// Start building a session.
    pub fn builder(
        provider: Arc<dyn LocationProvider>,
        region: CircleRegion,
    ) -> TrackingSessionBuilder {
        TrackingSessionBuilder {
            provider,
            region,
            options: WatchOptions::default(),
            surface: None,
            destination: None,
            polygon_points: DEFAULT_POLYGON_POINTS,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            path_capacity: None,
        }
    }

    /// Start watching the provider.
    ///
    /// Any previous watch is stopped first and the state is reset, so calling
    /// `start` twice leaves exactly one subscription. If the provider refuses,
    /// the session stays stopped and the error is both returned and broadcast.
    ///
    /// A stream that fails before `watch` returns is treated the same as a
    /// refused watch. A stream that ends before `watch` returns yields `Ok`
    /// with the session already inactive, as after any [`TrackingEvent::StreamEnded`].
    pub fn start(&self) -> Result<WatchId, SessionError> {
        self.stop();

        let shared = &self.shared;
        let epoch = {
            let mut inner = shared.inner.lock();
            inner.epoch += 1;
            inner.failure = None;
            inner.epoch
        };

        let sink = shared.sink_for(epoch);
        match shared.provider.watch(shared.options.clone(), sink) {
            Ok(id) => {
                let lost = {
                    let mut inner = shared.inner.lock();
                    if inner.epoch == epoch {
                        inner.watch = Some(id);
                        None
                    } else {
                        Some(inner.failure.take())
                    }
                };

                match lost {
                    None => {
                        info!(
                            watch = %id,
                            region = %shared.region,
                            distance_filter_m = shared.options.distance_filter_m,
                            "Tracking session started"
                        );
                        Ok(id)
                    }
                    Some(failure) => {
                        shared.provider.clear_watch(id);
                        match failure {
                            Some(error) => Err(SessionError::Provider(error)),
                            None => Ok(id),
                        }
                    }
                }
            }
            Err(error) => {
                warn!(error = %error, "Failed to start location watch");
                shared.emit(TrackingEvent::Error(error.clone()));
                Err(SessionError::Provider(error))
            }
        }
    }

    /// Stop watching and discard the path and position.
    ///
    /// Unsubscribes synchronously; any delivery still in flight is ignored.
    /// Stopping an idle session is a no-op.
    pub fn stop(&self) {
        let shared = &self.shared;
        let watch = {
            let mut inner = shared.inner.lock();
            inner.epoch += 1;
            inner.track.clear();
            if let Some(surface) = &shared.surface {
                surface.clear_track();
            }
            inner.watch.take()
        };

        if let Some(id) = watch {
            shared.provider.clear_watch(id);
            info!(watch = %id, "Tracking session stopped");
        }
    }

    /// Draw the static overlay: the geofence polygon and, if configured, the
    /// destination marker with its ring.
    ///
    /// Safe to call repeatedly; each overlay replaces the one drawn before.
    pub fn render_overlay(&self) -> Result<(), GeometryError> {
        let shared = &self.shared;
        let Some(surface) = &shared.surface else {
            return Ok(());
        };

        let fence = shared.region.to_polygon(shared.polygon_points)?;
        surface.draw_polygon(&fence, OverlayKind::Geofence, PolygonStyle::default());

        if let Some(destination) = &shared.destination {
            let ring = circle_to_polygon(
                destination.position,
                destination.ring_radius_km,
                destination.ring_points,
            )?;
            surface.place_marker(destination.position, MarkerIcon::Destination);
            surface.draw_polygon(&ring, OverlayKind::DestinationRing, PolygonStyle::default());
        }
        Ok(())
    }

    /// Subscribe to enter/exit/error events.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackingEvent> {
        self.shared.events.subscribe()
    }

    /// Whether a watch is currently active.
    pub fn is_active(&self) -> bool {
        self.shared.inner.lock().watch.is_some()
    }

    /// Latest position, if any.
    pub fn position(&self) -> Option<Coordinate> {
        self.shared.inner.lock().track.position
    }

    /// Visited coordinates, oldest first.
    pub fn path(&self) -> Vec<Coordinate> {
        self.shared.inner.lock().track.path.coordinates()
    }

    /// Whether the latest position is inside the region.
    pub fn is_inside(&self) -> bool {
        self.shared.inner.lock().track.inside
    }

    /// Point-in-time copy of the tracking state.
    pub fn snapshot(&self) -> TrackSnapshot {
        self.shared.inner.lock().track.snapshot()
    }

    /// The monitored region.
    pub fn region(&self) -> CircleRegion {
        self.shared.region
    }

    /// Options passed to the provider on `start`.
    pub fn options(&self) -> &WatchOptions {
        &self.shared.options
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Builder for [`TrackingSession`].
pub struct TrackingSessionBuilder {
    provider: Arc<dyn LocationProvider>,
    region: CircleRegion,
    options: WatchOptions,
    surface: Option<Arc<dyn MapSurface>>,
    destination: Option<Destination>,
    polygon_points: usize,
    event_capacity: usize,
    path_capacity: Option<usize>,
}

impl TrackingSessionBuilder {
    /// Options passed to the provider.
    pub fn options(mut self, options: WatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Map surface receiving drawing commands.
    pub fn surface(mut self, surface: Arc<dyn MapSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Destination drawn by [`TrackingSession::render_overlay`].
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Vertices used when drawing the geofence.
    pub fn polygon_points(mut self, points: usize) -> Self {
        self.polygon_points = points;
        self
    }

    /// Capacity of the event channel (minimum 1).
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Keep at most `limit` fixes in the path, dropping the oldest.
    ///
    /// Unbounded by default.
    pub fn path_capacity(mut self, limit: usize) -> Self {
        self.path_capacity = Some(limit);
        self
    }

    /// Build the session. The session starts stopped.
    pub fn build(self) -> TrackingSession {
        let (events, _) = broadcast::channel(self.event_capacity.max(1));
        let track = self
            .path_capacity
            .map(TrackState::with_path_capacity)
            .unwrap_or_default();
        TrackingSession {
            shared: Arc::new(Shared {
                provider: self.provider,
                region: self.region,
                options: self.options,
                surface: self.surface,
                destination: self.destination,
                polygon_points: self.polygon_points,
                events,
                inner: Mutex::new(Inner {
                    track,
                    ..Inner::default()
                }),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ManualProvider;
    use crate::surface::GeoJsonSurface;
    use tokio::sync::broadcast::error::TryRecvError;

    /// Provider that never forgets a sink, to simulate late deliveries.
    #[derive(Default)]
    struct LeakyProvider {
        sinks: Mutex<Vec<LocationSink>>,
    }

    impl LocationProvider for LeakyProvider {
        fn watch(&self, _options: WatchOptions, sink: LocationSink) -> Result<WatchId, ProviderError> {
            let mut sinks = self.sinks.lock();
            sinks.push(sink);
            Ok(WatchId(sinks.len() as u64))
        }

        fn clear_watch(&self, _id: WatchId) {}
    }

    /// Provider whose stream settles before `watch` returns.
    struct SettledProvider {
        update: LocationUpdate,
        cleared: Mutex<Vec<WatchId>>,
    }

    impl SettledProvider {
        fn new(update: LocationUpdate) -> Self {
            Self {
                update,
                cleared: Mutex::new(Vec::new()),
            }
        }
    }

    impl LocationProvider for SettledProvider {
        fn watch(&self, _options: WatchOptions, sink: LocationSink) -> Result<WatchId, ProviderError> {
            match &self.update {
                LocationUpdate::Error(error) => sink.fail(error.clone()),
                LocationUpdate::Ended => sink.end(),
                LocationUpdate::Position(coordinate) => sink.deliver(*coordinate),
            }
            Ok(WatchId(7))
        }

        fn clear_watch(&self, id: WatchId) {
            self.cleared.lock().push(id);
        }
    }

    fn fence() -> CircleRegion {
        CircleRegion::new(Coordinate::new(0.0, 0.0), 1000.0).unwrap()
    }

    fn drain(rx: &mut broadcast::Receiver<TrackingEvent>) -> Vec<TrackingEvent> {
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                Err(TryRecvError::Lagged(_)) => continue,
            }
        }
        events
    }

    #[test]
    fn test_session_starts_stopped() {
        let session = TrackingSession::new(Arc::new(ManualProvider::new()), fence());
        assert!(!session.is_active());
        assert!(session.position().is_none());
        assert!(session.path().is_empty());
        assert!(!session.is_inside());
    }

    #[test]
    fn test_enter_after_outside_fixes() {
        let provider = Arc::new(ManualProvider::new());
        let session = TrackingSession::new(provider.clone(), fence());
        let mut rx = session.subscribe();
        session.start().unwrap();

        let p1 = Coordinate::new(0.1, 0.0);
        let p2 = Coordinate::new(0.05, 0.0);
        let p3 = Coordinate::new(0.001, 0.0);
        provider.push(p1);
        provider.push(p2);
        provider.push(p3);

        assert_eq!(drain(&mut rx), vec![TrackingEvent::Entered { position: p3 }]);
        assert_eq!(session.path(), vec![p1, p2, p3]);
        assert_eq!(session.position(), Some(p3));
        assert!(session.is_inside());
    }

    #[test]
    fn test_exit_transition() {
        let provider = Arc::new(ManualProvider::new());
        let session = TrackingSession::new(provider.clone(), fence());
        let mut rx = session.subscribe();
        session.start().unwrap();

        let inside = Coordinate::new(0.0, 0.0);
        let outside = Coordinate::new(0.0, 0.02);
        provider.push(inside);
        provider.push(outside);

        assert_eq!(
            drain(&mut rx),
            vec![
                TrackingEvent::Entered { position: inside },
                TrackingEvent::Exited { position: outside },
            ]
        );
    }

    #[test]
    fn test_first_fix_outside_emits_nothing() {
        let provider = Arc::new(ManualProvider::new());
        let session = TrackingSession::new(provider.clone(), fence());
        let mut rx = session.subscribe();
        session.start().unwrap();

        provider.push(Coordinate::new(1.0, 1.0));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_stop_clears_state_and_unsubscribes() {
        let provider = Arc::new(ManualProvider::new());
        let session = TrackingSession::new(provider.clone(), fence());
        session.start().unwrap();
        provider.push(Coordinate::new(0.0, 0.0));

        session.stop();

        assert!(!session.is_active());
        assert!(session.path().is_empty());
        assert!(session.position().is_none());
        assert_eq!(provider.active_watches(), 0);

        assert_eq!(provider.push(Coordinate::new(0.5, 0.5)), 0);
        assert!(session.path().is_empty());
    }

    #[test]
    fn test_stale_delivery_after_stop_is_ignored() {
        let provider = Arc::new(LeakyProvider::default());
        let session = TrackingSession::new(provider.clone(), fence());
        let mut rx = session.subscribe();
        session.start().unwrap();
        session.stop();

        let stale = provider.sinks.lock()[0].clone();
        stale.deliver(Coordinate::new(0.0, 0.0));

        assert!(session.path().is_empty());
        assert!(session.position().is_none());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_restart_ignores_previous_watch() {
        let provider = Arc::new(LeakyProvider::default());
        let session = TrackingSession::new(provider.clone(), fence());
        session.start().unwrap();
        session.start().unwrap();

        let (old, current) = {
            let sinks = provider.sinks.lock();
            (sinks[0].clone(), sinks[1].clone())
        };
        old.deliver(Coordinate::new(0.3, 0.3));
        current.deliver(Coordinate::new(0.0, 0.0));

        assert_eq!(session.path(), vec![Coordinate::new(0.0, 0.0)]);
    }

    #[test]
    fn test_start_is_idempotent() {
        let provider = Arc::new(ManualProvider::new());
        let session = TrackingSession::new(provider.clone(), fence());
        session.start().unwrap();
        session.start().unwrap();
        assert_eq!(provider.active_watches(), 1);
    }

    #[test]
    fn test_start_failure_leaves_session_stopped() {
        let provider = Arc::new(ManualProvider::new());
        provider.fail_next_watch(ProviderError::PermissionDenied);

        let session = TrackingSession::new(provider.clone(), fence());
        let mut rx = session.subscribe();

        let result = session.start();
        assert_eq!(
            result,
            Err(SessionError::Provider(ProviderError::PermissionDenied))
        );
        assert!(!session.is_active());
        assert_eq!(
            drain(&mut rx),
            vec![TrackingEvent::Error(ProviderError::PermissionDenied)]
        );

        // No automatic retry, but a manual restart works
        assert!(session.start().is_ok());
        assert!(session.is_active());
    }

    #[test]
    fn test_stream_failing_during_watch_fails_start() {
        let provider = Arc::new(SettledProvider::new(LocationUpdate::Error(
            ProviderError::Unavailable("no fix".into()),
        )));
        let session = TrackingSession::new(provider.clone(), fence());
        let mut rx = session.subscribe();

        assert_eq!(
            session.start(),
            Err(SessionError::Provider(ProviderError::Unavailable(
                "no fix".into()
            )))
        );
        assert!(!session.is_active());
        assert_eq!(*provider.cleared.lock(), vec![WatchId(7)]);
        assert_eq!(
            drain(&mut rx),
            vec![TrackingEvent::Error(ProviderError::Unavailable(
                "no fix".into()
            ))]
        );
    }

    #[test]
    fn test_stream_ending_during_watch_starts_inactive() {
        let provider = Arc::new(SettledProvider::new(LocationUpdate::Ended));
        let session = TrackingSession::new(provider.clone(), fence());
        let mut rx = session.subscribe();

        assert_eq!(session.start(), Ok(WatchId(7)));
        assert!(!session.is_active());
        assert_eq!(*provider.cleared.lock(), vec![WatchId(7)]);
        assert_eq!(drain(&mut rx), vec![TrackingEvent::StreamEnded]);
    }

    #[test]
    fn test_path_capacity_trims_oldest_fixes() {
        let provider = Arc::new(ManualProvider::new());
        let session = TrackingSession::builder(provider.clone(), fence())
            .path_capacity(2)
            .build();
        session.start().unwrap();

        let fixes = [
            Coordinate::new(0.1, 0.0),
            Coordinate::new(0.2, 0.0),
            Coordinate::new(0.3, 0.0),
        ];
        for fix in fixes {
            provider.push(fix);
        }
        assert_eq!(session.path(), vec![fixes[1], fixes[2]]);

        // Restarting keeps the limit
        session.start().unwrap();
        for fix in fixes {
            provider.push(fix);
        }
        assert_eq!(session.path(), vec![fixes[1], fixes[2]]);
        assert_eq!(session.position(), Some(fixes[2]));
    }

    #[test]
    fn test_stream_error_stops_session() {
        let provider = Arc::new(ManualProvider::new());
        let session = TrackingSession::new(provider.clone(), fence());
        let mut rx = session.subscribe();
        session.start().unwrap();
        provider.push(Coordinate::new(0.0, 0.0));

        provider.push_error(ProviderError::Timeout);

        assert!(!session.is_active());
        assert!(session.path().is_empty());
        assert!(session.position().is_none());
        assert_eq!(provider.active_watches(), 0);

        let events = drain(&mut rx);
        assert_eq!(events.last(), Some(&TrackingEvent::Error(ProviderError::Timeout)));
    }

    #[test]
    fn test_stream_end_keeps_path() {
        let provider = Arc::new(ManualProvider::new());
        let session = TrackingSession::new(provider.clone(), fence());
        let mut rx = session.subscribe();
        session.start().unwrap();
        provider.push(Coordinate::new(0.5, 0.0));

        provider.end_streams();

        assert!(!session.is_active());
        assert_eq!(session.path(), vec![Coordinate::new(0.5, 0.0)]);
        assert_eq!(drain(&mut rx), vec![TrackingEvent::StreamEnded]);
    }

    #[test]
    fn test_surface_receives_track() {
        let provider = Arc::new(ManualProvider::new());
        let surface = Arc::new(GeoJsonSurface::new());
        let session = TrackingSession::builder(provider.clone(), fence())
            .surface(surface.clone())
            .build();
        session.start().unwrap();

        let a = Coordinate::new(0.01, 0.0);
        let b = Coordinate::new(0.02, 0.0);
        provider.push(a);
        provider.push(b);

        assert_eq!(surface.camera_center(), Some(b));
        assert_eq!(surface.marker(MarkerIcon::Vehicle), Some(b));
        assert_eq!(surface.polyline(), vec![a, b]);

        session.stop();
        assert!(surface.polyline().is_empty());
        assert!(surface.marker(MarkerIcon::Vehicle).is_none());
    }

    #[test]
    fn test_render_overlay() {
        let surface = Arc::new(GeoJsonSurface::new());
        let destination = Destination {
            position: Coordinate::new(37.78825, -122.4324),
            ring_radius_km: 1.0,
            ring_points: 100,
        };
        let session = TrackingSession::builder(Arc::new(ManualProvider::new()), fence())
            .surface(surface.clone())
            .destination(destination)
            .build();

        session.render_overlay().unwrap();

        assert_eq!(surface.polygon_count(), 2);
        assert_eq!(
            surface.marker(MarkerIcon::Destination),
            Some(destination.position)
        );
        assert_eq!(
            surface.polygon(OverlayKind::Geofence).map(|ring| ring.len()),
            Some(DEFAULT_POLYGON_POINTS)
        );
        assert_eq!(
            surface.polygon(OverlayKind::DestinationRing).map(|ring| ring.len()),
            Some(100)
        );
    }

    #[test]
    fn test_render_overlay_twice_replaces() {
        let surface = Arc::new(GeoJsonSurface::new());
        let session = TrackingSession::builder(Arc::new(ManualProvider::new()), fence())
            .surface(surface.clone())
            .destination(Destination {
                position: Coordinate::new(37.78825, -122.4324),
                ring_radius_km: 1.0,
                ring_points: 100,
            })
            .build();

        session.render_overlay().unwrap();
        session.render_overlay().unwrap();

        assert_eq!(surface.polygon_count(), 2);
        let features = surface.to_geojson()["features"].as_array().unwrap().clone();
        let kinds: Vec<_> = features
            .iter()
            .map(|f| f["properties"]["kind"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(kinds, vec!["geofence", "destination-ring", "marker"]);
    }

    #[test]
    fn test_render_overlay_rejects_bad_polygon() {
        let surface = Arc::new(GeoJsonSurface::new());
        let session = TrackingSession::builder(Arc::new(ManualProvider::new()), fence())
            .surface(surface)
            .polygon_points(2)
            .build();

        assert_eq!(
            session.render_overlay(),
            Err(GeometryError::TooFewPoints(2))
        );
    }

    #[test]
    fn test_drop_clears_watch() {
        let provider = Arc::new(ManualProvider::new());
        {
            let session = TrackingSession::new(provider.clone(), fence());
            session.start().unwrap();
            assert_eq!(provider.active_watches(), 1);
        }
        assert_eq!(provider.active_watches(), 0);
    }
}

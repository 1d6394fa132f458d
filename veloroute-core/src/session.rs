//! The event loop tying stops, lookups and the view together.
//!
//! A [`RoutingSession`] owns every piece of mutable state: the
//! [`StopStore`], the [`RouteFetcher`] and the [`MapView`]. It is driven from
//! one task; only the backend lookups run as spawned Tokio tasks, and they
//! report back over a channel instead of touching session state.
//!
//! Lookups may finish in any order. The fetcher's generation check decides
//! which results reach the view, so aborting superseded tasks is only a
//! saving, never a requirement.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use crate::{
    FetchAction, Generation, MapEvent, MapView, PositionEventAdapter, Route, RouteFetcher,
    RouteRequest, RouteResponse, RoutingBackend, RoutingError, SessionConfig, SessionConfigError,
    StopList, StopStore, ToggleState,
};

/// A lookup task and the task reporting its outcome.
#[derive(Debug)]
struct InFlight {
    generation: Generation,
    lookup: AbortHandle,
    handle: JoinHandle<()>,
}

/// Stops, route lookups and a view kept in step.
///
/// Methods that may issue a lookup spawn it on the current Tokio runtime and
/// panic when called outside one, as [`tokio::spawn`] does.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use veloroute_core::test_support::{RecordingMapView, StubRoutingBackend};
/// use veloroute_core::{MapEvent, RoutingSession, SessionConfig};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let backend = Arc::new(StubRoutingBackend::straight_line());
/// let mut session = RoutingSession::new(
///     &SessionConfig::default().with_seed(None),
///     backend,
///     RecordingMapView::default(),
/// )
/// .expect("default config is valid");
/// session.start();
///
/// session.handle_event(&MapEvent::click(8.68, 50.12));
/// session.handle_event(&MapEvent::click(8.69, 50.11));
/// session.settle().await;
///
/// assert_eq!(session.stops().len(), 2);
/// assert!(session.route().and_then(|route| route.path()).is_some());
/// # }
/// ```
pub struct RoutingSession<V> {
    store: StopStore,
    adapter: PositionEventAdapter,
    fetcher: RouteFetcher,
    backend: Arc<dyn RoutingBackend>,
    profile: Arc<str>,
    abort_superseded: bool,
    view: V,
    in_flight: Vec<InFlight>,
    responses_tx: mpsc::UnboundedSender<RouteResponse>,
    responses_rx: mpsc::UnboundedReceiver<RouteResponse>,
}

impl<V: MapView> RoutingSession<V> {
    /// Build a session seeded from `config`.
    ///
    /// Nothing is looked up or drawn until [`RoutingSession::start`].
    ///
    /// # Errors
    ///
    /// Returns the [`SessionConfigError`] from [`SessionConfig::validate`].
    pub fn new(
        config: &SessionConfig,
        backend: Arc<dyn RoutingBackend>,
        view: V,
    ) -> Result<Self, SessionConfigError> {
        config.validate()?;
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        let store = config
            .seed
            .clone()
            .map_or_else(StopStore::new, StopStore::seeded);
        Ok(Self {
            store,
            adapter: PositionEventAdapter,
            fetcher: RouteFetcher::new(),
            backend,
            profile: Arc::from(config.profile.as_str()),
            abort_superseded: config.abort_superseded,
            view,
            in_flight: Vec::new(),
            responses_tx,
            responses_rx,
        })
    }

    /// Current stops.
    pub const fn stops(&self) -> &StopList {
        self.store.stops()
    }

    /// Current click toggle.
    pub const fn toggle(&self) -> ToggleState {
        self.store.toggle()
    }

    /// Most recently published route.
    pub const fn route(&self) -> Option<&Route> {
        self.fetcher.latest()
    }

    /// Generation of the current stops.
    pub const fn generation(&self) -> Generation {
        self.fetcher.generation()
    }

    /// Number of lookup tasks not yet reported back.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// The view routes are drawn on.
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Show the seeded stops, looking up a route when there are two.
    pub fn start(&mut self) {
        self.sync();
    }

    /// Apply a map event and follow up on any stop change.
    pub fn handle_event(&mut self, event: &MapEvent) {
        if self.adapter.apply(&mut self.store, event).is_some() {
            self.sync();
        }
    }

    /// Replace the stops outright, leaving the click toggle alone.
    pub fn set_stops(&mut self, stops: StopList) {
        self.store.set_stops(stops);
        self.sync();
    }

    /// Wait for the next lookup result and apply it.
    ///
    /// Returns `false` without waiting when no lookup is outstanding.
    pub async fn next_response(&mut self) -> bool {
        if self.in_flight.is_empty() {
            return false;
        }
        match self.responses_rx.recv().await {
            Some(response) => {
                self.apply_response(response);
                true
            }
            None => false,
        }
    }

    /// Apply lookup results until the current stops have a published route.
    pub async fn settle(&mut self) {
        while self.fetcher.is_pending() {
            if !self.next_response().await {
                break;
            }
        }
    }

    /// Run until `events` closes, then settle and hand back the view.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<MapEvent>) -> V {
        self.start();
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(&event),
                    None => break,
                },
                Some(response) = self.responses_rx.recv() => self.apply_response(response),
            }
        }
        self.settle().await;
        self.view
    }

    fn sync(&mut self) {
        match self.fetcher.observe(self.store.stops()) {
            FetchAction::Unchanged => {}
            FetchAction::Publish(route) => {
                self.supersede();
                self.publish(&route);
            }
            FetchAction::Request(request) => {
                self.supersede();
                self.spawn(request);
            }
        }
    }

    fn supersede(&mut self) {
        self.in_flight.retain(|task| !task.handle.is_finished());
        if !self.abort_superseded {
            return;
        }
        for task in self.in_flight.drain(..) {
            log::debug!("aborting superseded lookup {}", task.generation);
            task.handle.abort();
            task.lookup.abort();
        }
    }

    // Every lookup reports back exactly once unless the session aborted it.
    fn spawn(&mut self, request: RouteRequest) {
        let generation = request.generation;
        let stops = request.stops.clone();
        let backend = Arc::clone(&self.backend);
        let profile = Arc::clone(&self.profile);
        let lookup = tokio::spawn(async move { request.execute(backend.as_ref(), &profile).await });
        let lookup_abort = lookup.abort_handle();
        let responses = self.responses_tx.clone();
        let handle = tokio::spawn(async move {
            let response = match lookup.await {
                Ok(response) => response,
                Err(err) => {
                    log::warn!("lookup {generation} ended without an answer: {err}");
                    RouteResponse {
                        generation,
                        stops,
                        outcome: Err(RoutingError::Interrupted {
                            message: err.to_string(),
                        }),
                    }
                }
            };
            if responses.send(response).is_err() {
                log::debug!("session closed before lookup {generation} finished");
            }
        });
        self.in_flight.push(InFlight {
            generation,
            lookup: lookup_abort,
            handle,
        });
    }

    fn apply_response(&mut self, response: RouteResponse) {
        let generation = response.generation;
        self.in_flight.retain(|task| task.generation != generation);
        match self.fetcher.resolve(response) {
            Ok(route) => self.publish(&route),
            Err(stale) => log::debug!("discarding {stale}"),
        }
    }

    fn publish(&mut self, route: &Route) {
        log::info!(
            "publishing route {} for {} stop(s), path: {}",
            self.fetcher.generation(),
            route.stops().len(),
            route.path().is_some()
        );
        self.view.render(route);
    }
}

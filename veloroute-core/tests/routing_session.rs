//! End-to-end tests driving a `RoutingSession` with stub collaborators.

use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};
use veloroute_core::test_support::{RecordingMapView, StubRoutingBackend};
use veloroute_core::{
    Coordinate, DEFAULT_PROFILE, MapEvent, MarkerRole, RoutePath, RoutingBackend, RoutingError,
    RoutingSession, SessionConfig, StopList, ToggleState,
};

const SEED_START: Coordinate = Coordinate::new(50.1215, 8.6770);
const SEED_END: Coordinate = Coordinate::new(50.1098, 8.6907);

fn geometry() -> RoutePath {
    RoutePath::new(vec![
        SEED_START,
        Coordinate::new(50.1180, 8.6810),
        Coordinate::new(50.1130, 8.6870),
        SEED_END,
    ])
}

#[fixture]
fn empty_config() -> SessionConfig {
    SessionConfig::default().with_seed(None)
}

fn session_with(
    backend: &Arc<StubRoutingBackend>,
    config: &SessionConfig,
) -> RoutingSession<RecordingMapView> {
    RoutingSession::new(
        config,
        Arc::clone(backend) as Arc<dyn RoutingBackend>,
        RecordingMapView::default(),
    )
    .expect("valid config")
}

#[rstest]
#[tokio::test]
async fn seeded_stops_publish_backend_geometry() {
    let backend = Arc::new(StubRoutingBackend::with_path(geometry()));
    let config = SessionConfig::default().with_seed(Some(StopList::pair(SEED_START, SEED_END)));
    let mut session = session_with(&backend, &config);

    session.start();
    session.settle().await;

    let route = session.route().expect("route published");
    assert_eq!(route.path(), Some(&geometry()));
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].stops, vec![SEED_START, SEED_END]);
    assert_eq!(calls[0].profile, DEFAULT_PROFILE);
}

#[rstest]
#[tokio::test]
async fn clicks_then_drag_issue_lookups(empty_config: SessionConfig) {
    let backend = Arc::new(StubRoutingBackend::straight_line());
    let mut session = session_with(&backend, &empty_config);
    session.start();
    assert_eq!(session.toggle(), ToggleState::ExpectNewStart);

    session.handle_event(&MapEvent::click(8.6800, 50.1200));
    let start = Coordinate::new(50.1200, 8.6800);
    assert_eq!(session.stops(), &StopList::start_only(start));
    let route = session.view().last_route().expect("single stop is drawn");
    assert!(route.path().is_none());
    assert!(backend.calls().is_empty());

    session.handle_event(&MapEvent::click(8.6900, 50.1100));
    let end = Coordinate::new(50.1100, 8.6900);
    assert_eq!(session.stops(), &StopList::pair(start, end));
    session.settle().await;
    assert_eq!(backend.calls().len(), 1);

    session.handle_event(&MapEvent::drag_end(1, 8.6950, 50.1150));
    let moved = Coordinate::new(50.1150, 8.6950);
    assert_eq!(session.stops(), &StopList::pair(start, moved));
    assert_eq!(session.toggle(), ToggleState::ExpectNewStart);
    session.settle().await;

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].stops, vec![start, moved]);
    let frame = session.view().last_frame().expect("frame drawn");
    let ends: Vec<_> = frame
        .markers
        .iter()
        .filter(|marker| marker.role == MarkerRole::End)
        .map(|marker| (marker.position.x, marker.position.y))
        .collect();
    assert_eq!(ends, vec![(8.6950, 50.1150)]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn newest_stops_win_when_lookups_finish_out_of_order(empty_config: SessionConfig) {
    let backend = Arc::new(
        StubRoutingBackend::straight_line()
            .with_delays([Duration::from_secs(2), Duration::from_millis(50)]),
    );
    let config = empty_config.with_abort_superseded(false);
    let mut session = session_with(&backend, &config);
    session.start();

    session.handle_event(&MapEvent::click(8.6800, 50.1200));
    session.handle_event(&MapEvent::click(8.6900, 50.1100));
    session.handle_event(&MapEvent::drag_end(1, 8.6950, 50.1150));
    assert_eq!(session.in_flight(), 2);

    while session.next_response().await {}

    let expected = StopList::pair(
        Coordinate::new(50.1200, 8.6800),
        Coordinate::new(50.1150, 8.6950),
    );
    let last = session.view().last_route().expect("route drawn");
    assert_eq!(last.stops(), &expected);
    assert!(last.path().is_some());
    assert!(
        session
            .view()
            .routes()
            .iter()
            .all(|route| route.stops().end() != Some(Coordinate::new(50.1100, 8.6900))
                || route.path().is_none()),
        "the superseded lookup must never be drawn"
    );
}

#[rstest]
#[tokio::test]
async fn set_stops_keeps_latitude_first(empty_config: SessionConfig) {
    let backend = Arc::new(StubRoutingBackend::straight_line());
    let mut session = session_with(&backend, &empty_config);
    session.start();

    let stops = StopList::try_from(vec![
        Coordinate::from([50.12, 8.68]),
        Coordinate::from([50.11, 8.69]),
    ])
    .expect("two stops");
    session.set_stops(stops);
    session.settle().await;

    let start = session.stops().start().expect("start present");
    assert_eq!(start.as_lat_lng(), [50.12, 8.68]);
    assert_eq!(backend.calls()[0].stops[0].lat(), 50.12);
    assert_eq!(session.toggle(), ToggleState::ExpectNewStart);
}

#[rstest]
#[tokio::test]
async fn no_route_found_is_distinguishable(empty_config: SessionConfig) {
    let backend = Arc::new(StubRoutingBackend::with_error(RoutingError::NoRouteFound {
        message: "No path could be found for input".into(),
    }));
    let mut session = session_with(&backend, &empty_config);
    session.start();

    session.set_stops(StopList::pair(SEED_START, SEED_END));
    session.settle().await;

    let frame = session.view().last_frame().expect("frame drawn");
    assert!(frame.line.is_none());
    assert_eq!(
        frame.failure.as_ref().map(|failure| failure.message()),
        Some("no route found")
    );
}

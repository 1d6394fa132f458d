//! In-memory doubles for exercising sessions without a routing service.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::{Coordinate, MapView, RenderFrame, Route, RoutePath, RoutingBackend, RoutingError};

/// A lookup received by [`StubRoutingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Stops passed to the backend.
    pub stops: Vec<Coordinate>,
    /// Travel profile passed to the backend.
    pub profile: String,
}

#[derive(Debug, Clone)]
enum Reply {
    StraightLine,
    Path(RoutePath),
    Error(RoutingError),
    Panic,
}

/// Routing backend answering from a fixed script.
///
/// Each call first sleeps for the next queued delay, if any, so tests can
/// control the order lookups finish in with a paused Tokio clock.
#[derive(Debug)]
pub struct StubRoutingBackend {
    reply: Reply,
    delays: Mutex<VecDeque<Duration>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubRoutingBackend {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            delays: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer every lookup with a path straight through the given stops.
    #[must_use]
    pub fn straight_line() -> Self {
        Self::with_reply(Reply::StraightLine)
    }

    /// Answer every lookup with `path`.
    #[must_use]
    pub fn with_path(path: RoutePath) -> Self {
        Self::with_reply(Reply::Path(path))
    }

    /// Fail every lookup with `error`.
    #[must_use]
    pub fn with_error(error: RoutingError) -> Self {
        Self::with_reply(Reply::Error(error))
    }

    /// Panic inside every lookup, as a faulty backend would.
    #[must_use]
    pub fn panicking() -> Self {
        Self::with_reply(Reply::Panic)
    }

    /// Delay successive lookups by these durations, in call order.
    #[must_use]
    pub fn with_delays(self, delays: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            delays: Mutex::new(delays.into_iter().collect()),
            ..self
        }
    }

    /// Lookups received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RoutingBackend for StubRoutingBackend {
    async fn compute_route(
        &self,
        stops: &[Coordinate],
        profile: &str,
    ) -> Result<RoutePath, RoutingError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                stops: stops.to_vec(),
                profile: profile.to_owned(),
            });
        let delay = self
            .delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if stops.len() < 2 {
            return Err(RoutingError::TooFewStops { count: stops.len() });
        }
        match &self.reply {
            Reply::StraightLine => Ok(RoutePath::new(stops.to_vec())),
            Reply::Path(path) => Ok(path.clone()),
            Reply::Error(error) => Err(error.clone()),
            Reply::Panic => panic!("stub backend panicked"),
        }
    }
}

/// Map view that keeps everything it was asked to draw.
#[derive(Debug, Clone, Default)]
pub struct RecordingMapView {
    routes: Vec<Route>,
    frames: Vec<RenderFrame>,
}

impl RecordingMapView {
    /// Number of render calls.
    #[must_use]
    pub fn renders(&self) -> usize {
        self.routes.len()
    }

    /// Routes drawn, oldest first.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Most recently drawn route.
    #[must_use]
    pub fn last_route(&self) -> Option<&Route> {
        self.routes.last()
    }

    /// Most recently drawn frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.frames.last()
    }
}

impl MapView for RecordingMapView {
    fn render(&mut self, route: &Route) {
        self.routes.push(route.clone());
        self.frames.push(RenderFrame::from_route(route));
    }
}

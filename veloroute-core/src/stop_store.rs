//! Click and drag interpretation for the start/end stops.
//!
//! The store keeps the stop list and the click toggle together in one
//! [`StopState`] snapshot. Each operation replaces the snapshot and returns
//! the resulting [`StopList`].

use crate::{Coordinate, StopError, StopList};

/// How the next map click is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ToggleState {
    /// The next click discards the current stops and places a new start.
    #[default]
    ExpectNewStart,
    /// The next click places the end after the current start.
    ExpectEnd,
}

impl ToggleState {
    /// The state following a click.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::ExpectNewStart => Self::ExpectEnd,
            Self::ExpectEnd => Self::ExpectNewStart,
        }
    }
}

/// Stops and click toggle captured together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StopState {
    /// Current stops.
    pub stops: StopList,
    /// Interpretation of the next click.
    pub toggle: ToggleState,
}

/// Owner of the stop list and the click toggle.
///
/// # Examples
/// ```
/// use veloroute_core::{Coordinate, StopStore, ToggleState};
///
/// let mut store = StopStore::new();
/// let first = store.handle_click(Coordinate::new(50.12, 8.68));
/// assert_eq!(first.len(), 1);
/// assert_eq!(store.toggle(), ToggleState::ExpectEnd);
///
/// let second = store.handle_click(Coordinate::new(50.11, 8.69));
/// assert_eq!(second.len(), 2);
/// assert_eq!(store.toggle(), ToggleState::ExpectNewStart);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopStore {
    state: StopState,
}

impl StopStore {
    /// An empty store expecting a new start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with `stops`, expecting a new start.
    #[must_use]
    pub fn seeded(stops: StopList) -> Self {
        Self {
            state: StopState {
                stops,
                toggle: ToggleState::ExpectNewStart,
            },
        }
    }

    /// Current stops.
    #[must_use]
    pub const fn stops(&self) -> &StopList {
        &self.state.stops
    }

    /// Current click toggle.
    #[must_use]
    pub const fn toggle(&self) -> ToggleState {
        self.state.toggle
    }

    /// Current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &StopState {
        &self.state
    }

    /// Interpret a map click.
    ///
    /// With [`ToggleState::ExpectNewStart`] the click becomes the only stop.
    /// With [`ToggleState::ExpectEnd`] the click becomes the end and the
    /// current start is kept, even when an end already existed. If no start
    /// exists at that point the click starts a new route instead. The toggle
    /// flips on every click.
    pub fn handle_click(&mut self, point: Coordinate) -> StopList {
        let (stops, toggle) = match (self.state.toggle, self.state.stops.start()) {
            (ToggleState::ExpectEnd, Some(start)) => {
                (StopList::pair(start, point), ToggleState::ExpectNewStart)
            }
            (ToggleState::ExpectEnd, None) => {
                log::debug!("no start to finish from; treating click as a new start");
                (StopList::start_only(point), ToggleState::ExpectEnd)
            }
            (ToggleState::ExpectNewStart, _) => (StopList::start_only(point), ToggleState::ExpectEnd),
        };
        log::debug!(
            "click {:?} under {:?} -> {} stop(s), now {:?}",
            point.as_lat_lng(),
            self.state.toggle,
            stops.len(),
            toggle
        );
        self.state = StopState {
            stops: stops.clone(),
            toggle,
        };
        stops
    }

    /// Move the stop at `index` to `point`.
    ///
    /// The length and the toggle are unchanged. An index past the end of the
    /// current list leaves the store untouched and returns
    /// [`StopError::InvalidIndex`].
    pub fn handle_drag(&mut self, index: usize, point: Coordinate) -> Result<StopList, StopError> {
        let stops = self.state.stops.with_replaced(index, point)?;
        self.state.stops = stops.clone();
        Ok(stops)
    }

    /// Replace the stops outright. The toggle is left as it is.
    pub fn set_stops(&mut self, stops: StopList) -> StopList {
        self.state.stops = stops.clone();
        stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn seeded() -> StopStore {
        StopStore::seeded(StopList::pair(
            Coordinate::new(50.1215, 8.6770),
            Coordinate::new(50.1098, 8.6907),
        ))
    }

    #[rstest]
    fn toggle_alternates() {
        assert_eq!(ToggleState::default(), ToggleState::ExpectNewStart);
        assert_eq!(ToggleState::ExpectNewStart.next(), ToggleState::ExpectEnd);
        assert_eq!(ToggleState::ExpectEnd.next(), ToggleState::ExpectNewStart);
    }

    #[rstest]
    fn first_click_discards_seeded_stops(mut seeded: StopStore) {
        let point = Coordinate::new(50.1200, 8.6800);

        let stops = seeded.handle_click(point);

        assert_eq!(stops, StopList::start_only(point));
        assert_eq!(seeded.toggle(), ToggleState::ExpectEnd);
    }

    #[rstest]
    fn finishing_click_keeps_pre_click_start() {
        let start = Coordinate::new(50.1200, 8.6800);
        let old_end = Coordinate::new(50.0, 8.0);
        let mut store = StopStore::seeded(StopList::pair(start, old_end));
        store.state.toggle = ToggleState::ExpectEnd;

        let end = Coordinate::new(50.1100, 8.6900);
        let stops = store.handle_click(end);

        assert_eq!(stops, StopList::pair(start, end));
        assert_eq!(store.toggle(), ToggleState::ExpectNewStart);
    }

    #[rstest]
    fn finishing_click_without_start_starts_over() {
        let mut store = StopStore::new();
        store.handle_click(Coordinate::new(1.0, 1.0));
        store.set_stops(StopList::empty());

        let point = Coordinate::new(2.0, 2.0);
        let stops = store.handle_click(point);

        assert_eq!(stops, StopList::start_only(point));
        assert_eq!(store.toggle(), ToggleState::ExpectEnd);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn drag_changes_only_its_slot(mut seeded: StopStore, #[case] index: usize) {
        let before = seeded.stops().clone();
        let toggle = seeded.toggle();
        let point = Coordinate::new(50.1150, 8.6950);

        let after = seeded.handle_drag(index, point).expect("slot exists");

        assert_eq!(after.len(), before.len());
        assert_eq!(after.get(index), Some(point));
        assert_eq!(after.get(1 - index), before.get(1 - index));
        assert_eq!(seeded.toggle(), toggle);
    }

    #[rstest]
    fn drag_past_end_is_a_no_op() {
        let start = Coordinate::new(50.1200, 8.6800);
        let mut store = StopStore::new();
        store.handle_click(start);

        let err = store
            .handle_drag(1, Coordinate::new(0.0, 0.0))
            .expect_err("no end yet");

        assert_eq!(err, StopError::InvalidIndex { index: 1, len: 1 });
        assert_eq!(store.stops(), &StopList::start_only(start));
        assert_eq!(store.toggle(), ToggleState::ExpectEnd);
    }

    #[rstest]
    fn set_stops_keeps_toggle() {
        let mut store = StopStore::new();
        store.handle_click(Coordinate::new(1.0, 1.0));

        let seeded = StopList::pair(Coordinate::new(50.12, 8.68), Coordinate::new(50.11, 8.69));
        let stops = store.set_stops(seeded.clone());

        assert_eq!(stops, seeded);
        assert_eq!(store.toggle(), ToggleState::ExpectEnd);
        assert_eq!(store.snapshot().stops, seeded);
    }
}

//! Raw map input and its translation into stop edits.
//!
//! Map events arrive in map axis order (`geo::Coord`, `x = longitude`).
//! [`PositionEventAdapter`] converts positions to latitude-first
//! [`Coordinate`]s and forwards clicks and finished marker drags to the
//! [`StopStore`]. Everything else is ignored.

use geo::Coord;

use crate::{Coordinate, StopList, StopStore};

/// Input emitted by a map view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum MapEvent {
    /// The map surface was clicked.
    Click {
        /// Clicked position.
        position: Coord<f64>,
    },
    /// A stop marker was dropped after dragging.
    MarkerDragEnd {
        /// Index of the marker, matching the stop index.
        marker: usize,
        /// Drop position.
        position: Coord<f64>,
    },
    /// A stop marker moved while still being dragged.
    MarkerDrag {
        /// Index of the marker.
        marker: usize,
        /// Current position.
        position: Coord<f64>,
    },
    /// The map finished loading.
    Load,
    /// The viewport finished moving.
    MoveEnd,
    /// Any other map event, by name.
    Other {
        /// Event name as reported by the map.
        name: String,
    },
}

impl MapEvent {
    /// A click at `lng`/`lat`.
    #[must_use]
    pub const fn click(lng: f64, lat: f64) -> Self {
        Self::Click {
            position: Coord { x: lng, y: lat },
        }
    }

    /// A finished drag of `marker` to `lng`/`lat`.
    #[must_use]
    pub const fn drag_end(marker: usize, lng: f64, lat: f64) -> Self {
        Self::MarkerDragEnd {
            marker,
            position: Coord { x: lng, y: lat },
        }
    }
}

/// Turns map events into [`StopStore`] operations.
///
/// # Examples
/// ```
/// use veloroute_core::{MapEvent, PositionEventAdapter, StopStore};
///
/// let adapter = PositionEventAdapter;
/// let mut store = StopStore::new();
///
/// let stops = adapter.apply(&mut store, &MapEvent::click(8.68, 50.12));
/// assert_eq!(stops.and_then(|s| s.start()).map(|c| c.lat()), Some(50.12));
/// assert!(adapter.apply(&mut store, &MapEvent::MoveEnd).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionEventAdapter;

impl PositionEventAdapter {
    /// Apply `event` to `store`.
    ///
    /// Returns the new stop list when the event changed the store, `None`
    /// when it was ignored, carried a position off the globe, or addressed a
    /// marker that does not exist.
    pub fn apply(self, store: &mut StopStore, event: &MapEvent) -> Option<StopList> {
        match event {
            MapEvent::Click { position } => {
                let point = checked(*position)?;
                Some(store.handle_click(point))
            }
            MapEvent::MarkerDragEnd { marker, position } => {
                let point = checked(*position)?;
                match store.handle_drag(*marker, point) {
                    Ok(stops) => Some(stops),
                    Err(err) => {
                        log::debug!("ignoring marker drag: {err}");
                        None
                    }
                }
            }
            MapEvent::MarkerDrag { .. }
            | MapEvent::Load
            | MapEvent::MoveEnd
            | MapEvent::Other { .. } => {
                log::debug!("ignoring map event {event:?}");
                None
            }
        }
    }
}

fn checked(position: Coord<f64>) -> Option<Coordinate> {
    Coordinate::try_new(position.y, position.x)
        .inspect_err(|err| log::debug!("ignoring map position: {err}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToggleState;
    use rstest::rstest;

    #[rstest]
    fn click_converts_axis_order() {
        let mut store = StopStore::new();

        let stops = PositionEventAdapter
            .apply(&mut store, &MapEvent::click(8.68, 50.12))
            .expect("clicks are applied");

        assert_eq!(stops, StopList::start_only(Coordinate::new(50.12, 8.68)));
    }

    #[rstest]
    fn drag_end_moves_marker() {
        let start = Coordinate::new(50.1200, 8.6800);
        let end = Coordinate::new(50.1100, 8.6900);
        let mut store = StopStore::seeded(StopList::pair(start, end));

        let stops = PositionEventAdapter
            .apply(&mut store, &MapEvent::drag_end(1, 8.6950, 50.1150))
            .expect("marker 1 exists");

        assert_eq!(stops, StopList::pair(start, Coordinate::new(50.1150, 8.6950)));
    }

    #[rstest]
    fn drag_of_missing_marker_is_ignored() {
        let mut store = StopStore::new();
        PositionEventAdapter.apply(&mut store, &MapEvent::click(8.68, 50.12));

        let result = PositionEventAdapter.apply(&mut store, &MapEvent::drag_end(1, 8.0, 50.0));

        assert!(result.is_none());
        assert_eq!(store.stops().len(), 1);
        assert_eq!(store.toggle(), ToggleState::ExpectEnd);
    }

    #[rstest]
    #[case(MapEvent::click(f64::NAN, 50.12))]
    #[case(MapEvent::click(8.68, 95.0))]
    #[case(MapEvent::drag_end(1, 8.69, f64::NAN))]
    #[case(MapEvent::drag_end(0, 200.0, 50.11))]
    fn off_globe_positions_are_ignored(#[case] event: MapEvent) {
        let seeded = StopList::pair(Coordinate::new(50.12, 8.68), Coordinate::new(50.11, 8.69));
        let mut store = StopStore::seeded(seeded.clone());

        assert!(PositionEventAdapter.apply(&mut store, &event).is_none());
        assert_eq!(store.stops(), &seeded);
        assert_eq!(store.toggle(), ToggleState::ExpectNewStart);
    }

    #[rstest]
    #[case(MapEvent::Load)]
    #[case(MapEvent::MoveEnd)]
    #[case(MapEvent::MarkerDrag { marker: 0, position: Coord { x: 8.0, y: 50.0 } })]
    #[case(MapEvent::Other { name: "zoomend".into() })]
    fn other_events_leave_store_alone(#[case] event: MapEvent) {
        let seeded = StopList::pair(Coordinate::new(50.12, 8.68), Coordinate::new(50.11, 8.69));
        let mut store = StopStore::seeded(seeded.clone());

        assert!(PositionEventAdapter.apply(&mut store, &event).is_none());
        assert_eq!(store.stops(), &seeded);
        assert_eq!(store.toggle(), ToggleState::ExpectNewStart);
    }
}

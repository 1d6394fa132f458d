//! Ordered start/end stops.
//!
//! A [`StopList`] holds zero, one or two coordinates. Index 0 is the start,
//! index 1 the end. Values are never edited in place: every operation hands
//! back a new list so observers can detect change by comparing values.

use std::slice::Iter;

use thiserror::Error;

use crate::Coordinate;

/// Largest number of stops a [`StopList`] can hold.
pub const MAX_STOPS: usize = 2;

/// Errors returned when building a [`StopList`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StopListError {
    /// More than [`MAX_STOPS`] coordinates were offered.
    #[error("a stop list holds at most {MAX_STOPS} stops, got {count}")]
    TooManyStops {
        /// Number of coordinates offered.
        count: usize,
    },
}

/// Errors returned by stop edits that address a slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StopError {
    /// The slot does not exist in the current list.
    #[error("stop index {index} is out of range for {len} stop(s)")]
    InvalidIndex {
        /// Requested slot.
        index: usize,
        /// Length of the list at the time of the request.
        len: usize,
    },
}

/// The current start and optional end of a route.
///
/// # Examples
/// ```
/// use veloroute_core::{Coordinate, StopList};
///
/// let start = Coordinate::new(50.12, 8.68);
/// let end = Coordinate::new(50.11, 8.69);
/// let stops = StopList::pair(start, end);
///
/// assert_eq!(stops.len(), 2);
/// assert_eq!(stops.start(), Some(start));
/// assert_eq!(stops.end(), Some(end));
/// assert!(StopList::try_from(vec![start, end, start]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")
)]
pub struct StopList {
    stops: Vec<Coordinate>,
}

impl StopList {
    /// A list without stops.
    #[must_use]
    pub const fn empty() -> Self {
        Self { stops: Vec::new() }
    }

    /// A list holding only a start.
    #[must_use]
    pub fn start_only(start: Coordinate) -> Self {
        Self { stops: vec![start] }
    }

    /// A list holding a start and an end.
    #[must_use]
    pub fn pair(start: Coordinate, end: Coordinate) -> Self {
        Self {
            stops: vec![start, end],
        }
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the list has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Whether the list has both a start and an end, i.e. a route can be
    /// requested for it.
    #[must_use]
    pub fn is_routable(&self) -> bool {
        self.stops.len() == MAX_STOPS
    }

    /// Stop at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.stops.get(index).copied()
    }

    /// The start stop.
    #[must_use]
    pub fn start(&self) -> Option<Coordinate> {
        self.get(0)
    }

    /// The end stop.
    #[must_use]
    pub fn end(&self) -> Option<Coordinate> {
        self.get(1)
    }

    /// Stops in order.
    #[must_use]
    pub fn as_slice(&self) -> &[Coordinate] {
        &self.stops
    }

    /// Iterate over the stops in order.
    pub fn iter(&self) -> Iter<'_, Coordinate> {
        self.stops.iter()
    }

    /// A copy of this list with the stop at `index` moved to `point`.
    ///
    /// The length and the order of the other stop are kept.
    ///
    /// # Examples
    /// ```
    /// use veloroute_core::{Coordinate, StopError, StopList};
    ///
    /// let stops = StopList::start_only(Coordinate::new(50.0, 8.0));
    /// let moved = stops.with_replaced(0, Coordinate::new(51.0, 9.0))?;
    /// assert_eq!(moved.start(), Some(Coordinate::new(51.0, 9.0)));
    ///
    /// assert_eq!(
    ///     stops.with_replaced(1, Coordinate::new(51.0, 9.0)),
    ///     Err(StopError::InvalidIndex { index: 1, len: 1 }),
    /// );
    /// # Ok::<(), StopError>(())
    /// ```
    pub fn with_replaced(&self, index: usize, point: Coordinate) -> Result<Self, StopError> {
        let mut stops = self.stops.clone();
        let slot = stops.get_mut(index).ok_or(StopError::InvalidIndex {
            index,
            len: self.stops.len(),
        })?;
        *slot = point;
        Ok(Self { stops })
    }
}

impl TryFrom<Vec<Coordinate>> for StopList {
    type Error = StopListError;

    fn try_from(stops: Vec<Coordinate>) -> Result<Self, Self::Error> {
        if stops.len() > MAX_STOPS {
            return Err(StopListError::TooManyStops { count: stops.len() });
        }
        Ok(Self { stops })
    }
}

impl From<StopList> for Vec<Coordinate> {
    fn from(value: StopList) -> Self {
        value.stops
    }
}

impl<'a> IntoIterator for &'a StopList {
    type Item = &'a Coordinate;
    type IntoIter = Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn start() -> Coordinate {
        Coordinate::new(50.1215, 8.6770)
    }

    #[fixture]
    fn end() -> Coordinate {
        Coordinate::new(50.1098, 8.6907)
    }

    #[rstest]
    fn empty_list_is_not_routable() {
        let stops = StopList::empty();
        assert!(stops.is_empty());
        assert!(!stops.is_routable());
        assert_eq!(stops.start(), None);
    }

    #[rstest]
    fn single_stop_has_no_end(start: Coordinate) {
        let stops = StopList::start_only(start);
        assert_eq!(stops.start(), Some(start));
        assert_eq!(stops.end(), None);
        assert!(!stops.is_routable());
    }

    #[rstest]
    fn replacing_end_keeps_start(start: Coordinate, end: Coordinate) {
        let stops = StopList::pair(start, end);
        let moved = Coordinate::new(50.1150, 8.6950);

        let next = stops.with_replaced(1, moved).expect("index 1 exists");

        assert_eq!(next.as_slice(), &[start, moved]);
        assert_eq!(stops.as_slice(), &[start, end], "original is untouched");
    }

    #[rstest]
    #[case(2)]
    #[case(7)]
    fn replacing_missing_slot_fails(start: Coordinate, end: Coordinate, #[case] index: usize) {
        let stops = StopList::pair(start, end);
        let err = stops
            .with_replaced(index, start)
            .expect_err("slot does not exist");
        assert_eq!(err, StopError::InvalidIndex { index, len: 2 });
    }

    #[rstest]
    fn rejects_three_stops(start: Coordinate, end: Coordinate) {
        let err = StopList::try_from(vec![start, end, start]).expect_err("too many stops");
        assert_eq!(err, StopListError::TooManyStops { count: 3 });
    }

    #[rstest]
    fn equality_is_by_value(start: Coordinate, end: Coordinate) {
        assert_eq!(StopList::pair(start, end), StopList::pair(start, end));
        assert_ne!(StopList::pair(start, end), StopList::pair(end, start));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_nested_pairs() {
        let stops: StopList =
            serde_json::from_str("[[50.12, 8.68], [50.11, 8.69]]").expect("two stops");
        assert_eq!(stops.start().map(|c| c.lat()), Some(50.12));

        let too_many = serde_json::from_str::<StopList>("[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]");
        assert!(too_many.is_err());
    }
}

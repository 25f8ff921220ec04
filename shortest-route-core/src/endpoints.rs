//! Choosing which stored points become the route start and end.

use thiserror::Error;

use crate::point::Point;

/// Rule mapping an ordered point list to a start and end point.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use shortest_route_core::{EndpointRule, Point};
///
/// # fn main() -> Result<(), shortest_route_core::EndpointError> {
/// let points = vec![
///     Point::new("A", Coord { x: 0.0, y: 0.0 }),
///     Point::new("B", Coord { x: 0.0, y: 1.0 }),
///     Point::new("C", Coord { x: 1.0, y: 1.0 }),
/// ];
/// let (start, end) = EndpointRule::FirstAndLast.select(&points)?;
/// assert_eq!((start.label.as_str(), end.label.as_str()), ("A", "C"));
/// let (start, end) = EndpointRule::FirstTwo.select(&points)?;
/// assert_eq!((start.label.as_str(), end.label.as_str()), ("A", "B"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum EndpointRule {
    /// The first and the most recently added point.
    #[default]
    FirstAndLast,
    /// The first two points in entry order.
    FirstTwo,
    /// Explicit zero-based positions.
    Indices {
        /// Position of the start point.
        start: usize,
        /// Position of the end point.
        end: usize,
    },
}

/// Errors returned by [`EndpointRule::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// Fewer than two points are stored.
    #[error("a route needs at least two points, found {available}")]
    NotEnoughPoints {
        /// Number of stored points.
        available: usize,
    },
    /// A requested position does not exist.
    #[error("point index {index} is out of range for {len} points")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of stored points.
        len: usize,
    },
    /// Start and end refer to the same point.
    #[error("start and end both refer to point {0}")]
    SamePoint(usize),
}

impl EndpointRule {
    /// Positions of the start and end points within a list of `len` points.
    ///
    /// # Errors
    ///
    /// See [`EndpointError`].
    pub const fn positions(self, len: usize) -> Result<(usize, usize), EndpointError> {
        if len < 2 {
            return Err(EndpointError::NotEnoughPoints { available: len });
        }
        let (start, end) = match self {
            Self::FirstAndLast => (0, len - 1),
            Self::FirstTwo => (0, 1),
            Self::Indices { start, end } => (start, end),
        };
        if start >= len {
            return Err(EndpointError::IndexOutOfRange { index: start, len });
        }
        if end >= len {
            return Err(EndpointError::IndexOutOfRange { index: end, len });
        }
        if start == end {
            return Err(EndpointError::SamePoint(start));
        }
        Ok((start, end))
    }

    /// Pick the start and end point from `points`.
    ///
    /// # Errors
    ///
    /// See [`EndpointError`].
    pub fn select(self, points: &[Point]) -> Result<(&Point, &Point), EndpointError> {
        let len = points.len();
        let (start, end) = self.positions(len)?;
        match (points.get(start), points.get(end)) {
            (Some(first), Some(last)) => Ok((first, last)),
            _ => Err(EndpointError::IndexOutOfRange { index: end, len }),
        }
    }
}

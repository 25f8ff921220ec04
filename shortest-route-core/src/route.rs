//! Candidate routes and the shortest-route selection scan.

use std::fmt;
use std::str::FromStr;

use geo::{Coord, LineString};
use thiserror::Error;

/// How the traveller moves between endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TransportMode {
    /// On foot.
    #[default]
    Walking,
    /// By car.
    Driving,
    /// By public transport.
    Transit,
}

impl TransportMode {
    /// Lowercase name used in configuration and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Driving => "driving",
            Self::Transit => "transit",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`TransportMode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transport mode {0:?} (expected walking, driving or transit)")]
pub struct ParseTransportModeError(String);

impl FromStr for TransportMode {
    type Err = ParseTransportModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" | "walk" | "foot" => Ok(Self::Walking),
            "driving" | "drive" | "car" => Ok(Self::Driving),
            "transit" => Ok(Self::Transit),
            _ => Err(ParseTransportModeError(s.to_owned())),
        }
    }
}

/// Parameters sent to a [`DirectionsProvider`](crate::DirectionsProvider).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionsRequest {
    /// Route origin, `x` = longitude, `y` = latitude.
    pub start: Coord<f64>,
    /// Route destination.
    pub end: Coord<f64>,
    /// Travel mode.
    pub mode: TransportMode,
    /// Ask the provider for alternate candidates in addition to the primary.
    pub alternates: bool,
}

/// One path returned by a directions provider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateRoute {
    /// Polyline tracing the path.
    pub geometry: LineString<f64>,
    /// Path length in metres.
    pub distance: f64,
}

/// Errors returned by [`CandidateRoute::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CandidateRouteError {
    /// Distance was negative, NaN or infinite.
    #[error("route distance {0} must be a finite, non-negative number of metres")]
    InvalidDistance(f64),
}

impl CandidateRoute {
    /// Validates and constructs a [`CandidateRoute`].
    pub fn new(geometry: LineString<f64>, distance: f64) -> Result<Self, CandidateRouteError> {
        if !is_valid_distance(distance) {
            return Err(CandidateRouteError::InvalidDistance(distance));
        }
        Ok(Self { geometry, distance })
    }

    /// Whether the distance is a finite, non-negative number of metres.
    ///
    /// Always true for values built through [`CandidateRoute::new`]; the
    /// fields are public, so literals may still carry NaN or negatives.
    #[must_use]
    pub const fn has_valid_distance(&self) -> bool {
        is_valid_distance(self.distance)
    }
}

/// The minimum-distance candidate chosen for one request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedRoute {
    /// The chosen candidate.
    pub route: CandidateRoute,
    /// Position of the chosen candidate in the provider's list.
    pub index: usize,
    /// Number of candidates the provider returned.
    pub candidates: usize,
}

impl SelectedRoute {
    /// Geometry to hand to the renderer.
    #[must_use]
    pub const fn geometry(&self) -> &LineString<f64> {
        &self.route.geometry
    }

    /// Length of the chosen route in metres.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.route.distance
    }
}

const fn is_valid_distance(distance: f64) -> bool {
    distance.is_finite() && distance >= 0.0
}

/// Index of the shortest candidate, or `None` when no candidate has a valid
/// distance.
///
/// Candidates whose distance is NaN, infinite or negative are skipped; the
/// returned index still refers to the caller's slice. The scan starts from
/// the first valid candidate and only moves on when a later one is strictly
/// shorter, so the earliest of several equal minima wins.
///
/// # Examples
///
/// ```
/// use geo::LineString;
/// use shortest_route_core::{CandidateRoute, shortest_index};
///
/// let route = |d| CandidateRoute { geometry: LineString::new(Vec::new()), distance: d };
/// assert_eq!(shortest_index(&[route(5.2), route(3.8), route(3.8)]), Some(1));
/// assert_eq!(shortest_index(&[route(f64::NAN), route(3.8)]), Some(1));
/// assert_eq!(shortest_index(&[]), None);
/// ```
#[must_use]
pub fn shortest_index(candidates: &[CandidateRoute]) -> Option<usize> {
    let mut iter = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.has_valid_distance());
    let (first_index, first) = iter.next()?;
    let (best, _) = iter.fold((first_index, first.distance), |(best, min), (i, c)| {
        if c.distance < min {
            (i, c.distance)
        } else {
            (best, min)
        }
    });
    Some(best)
}

/// Select the shortest candidate, consuming the list.
#[must_use]
pub fn select_shortest(candidates: Vec<CandidateRoute>) -> Option<SelectedRoute> {
    let index = shortest_index(&candidates)?;
    let count = candidates.len();
    let route = candidates.into_iter().nth(index)?;
    Some(SelectedRoute {
        route,
        index,
        candidates: count,
    })
}

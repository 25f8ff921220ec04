//! Ordered, resettable collection of resolved points.
//!
//! The store replaces ad-hoc UI state with an explicit value: every mutation
//! reports a [`Readiness`] flag telling the host whether route controls should
//! be shown. A generation counter, bumped on each reset, lets callers drop
//! geocoding responses that were issued before the reset.

use std::sync::{Mutex, MutexGuard, PoisonError};

use geo::{Coord, Rect};
use log::{debug, warn};

use crate::point::{InvalidPointError, Point};

/// Number of points a store must exceed before a route may be requested.
pub const DEFAULT_READY_AFTER: usize = 2;

/// Whether enough points exist to request a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Readiness {
    /// Route and reset controls should be hidden.
    NotReady,
    /// Route and reset controls should be revealed.
    RouteReady,
}

impl Readiness {
    /// Returns `true` for [`Readiness::RouteReady`].
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::RouteReady)
    }
}

/// Opaque token identifying the store contents between resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// Result of [`PointStore::add_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The point was appended.
    Appended(Readiness),
    /// The store was reset after the generation was captured; nothing changed.
    Discarded,
}

/// Consistent view of the store taken under a single lock.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    /// Generation the points belong to.
    pub generation: Generation,
    /// Points in insertion order.
    pub points: Vec<Point>,
    /// Readiness for exactly these points.
    pub readiness: Readiness,
}

#[derive(Debug, Default)]
struct Inner {
    points: Vec<Point>,
    generation: u64,
}

/// Thread-safe ordered store of [`Point`] values.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use shortest_route_core::{Point, PointStore, Readiness};
///
/// # fn main() -> Result<(), shortest_route_core::InvalidPointError> {
/// let store = PointStore::new();
/// store.add(Point::new("A", Coord { x: 0.0, y: 0.0 }))?;
/// store.add(Point::new("B", Coord { x: 0.0, y: 1.0 }))?;
/// let readiness = store.add(Point::new("C", Coord { x: 1.0, y: 1.0 }))?;
/// assert_eq!(readiness, Readiness::RouteReady);
/// assert_eq!(store.reset(), Readiness::NotReady);
/// assert!(store.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PointStore {
    inner: Mutex<Inner>,
    ready_after: usize,
}

impl Default for PointStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PointStore {
    /// Create an empty store that becomes ready after
    /// [`DEFAULT_READY_AFTER`] points.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ready_after(DEFAULT_READY_AFTER)
    }

    /// Create an empty store that becomes ready once it holds more than
    /// `ready_after` points.
    #[must_use]
    pub fn with_ready_after(ready_after: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            ready_after,
        }
    }

    // A poisoned lock still holds a consistent Vec: each mutation is a single
    // push or clear.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    const fn readiness_for(&self, len: usize) -> Readiness {
        if len > self.ready_after {
            Readiness::RouteReady
        } else {
            Readiness::NotReady
        }
    }

    /// Validate and append `point`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPointError`] when the coordinate is non-finite or out
    /// of range. The store is left unchanged.
    pub fn add(&self, point: Point) -> Result<Readiness, InvalidPointError> {
        reject_invalid(&point)?;
        let mut inner = self.lock();
        inner.points.push(point);
        let readiness = self.readiness_for(inner.points.len());
        debug!("stored point #{} ({readiness:?})", inner.points.len());
        Ok(readiness)
    }

    /// Append `point` only if no reset happened since `generation` was taken.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPointError`] when the coordinate is invalid, even if
    /// the generation is stale.
    pub fn add_for(
        &self,
        generation: Generation,
        point: Point,
    ) -> Result<AddOutcome, InvalidPointError> {
        reject_invalid(&point)?;
        let mut inner = self.lock();
        if inner.generation != generation.0 {
            warn!(
                "discarding point {:?} resolved for stale generation {} (current {})",
                point.label, generation.0, inner.generation
            );
            return Ok(AddOutcome::Discarded);
        }
        inner.points.push(point);
        Ok(AddOutcome::Appended(
            self.readiness_for(inner.points.len()),
        ))
    }

    /// Remove every point and invalidate outstanding generations.
    pub fn reset(&self) -> Readiness {
        let mut inner = self.lock();
        inner.points.clear();
        inner.generation = inner.generation.wrapping_add(1);
        debug!("point store reset to generation {}", inner.generation);
        Readiness::NotReady
    }

    /// Snapshot of all points in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<Point> {
        self.lock().points.clone()
    }

    /// Points, generation and readiness read together.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let inner = self.lock();
        StoreSnapshot {
            generation: Generation(inner.generation),
            points: inner.points.clone(),
            readiness: self.readiness_for(inner.points.len()),
        }
    }

    /// Number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().points.len()
    }

    /// Returns `true` when no points are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().points.is_empty()
    }

    /// Current readiness without mutating the store.
    #[must_use]
    pub fn readiness(&self) -> Readiness {
        self.readiness_for(self.len())
    }

    /// Token to pass to [`PointStore::add_for`].
    #[must_use]
    pub fn generation(&self) -> Generation {
        Generation(self.lock().generation)
    }

    /// Bounding box covering every stored point, if any.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect<f64>> {
        let inner = self.lock();
        let mut locations = inner.points.iter().map(|point| point.location);
        let first = locations.next()?;
        let (min, max) = locations.fold((first, first), |(min, max), c| {
            (
                Coord {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coord {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )
        });
        Some(Rect::new(min, max))
    }
}

fn reject_invalid(point: &Point) -> Result<(), InvalidPointError> {
    point.validate().inspect_err(|err| {
        warn!("rejecting point {:?}: {err}", point.label);
    })
}

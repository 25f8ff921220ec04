//! Orchestrates geocoding, point storage and route selection for one user.
//!
//! Geocoding requests are serialised through a fair async lock, so points are
//! appended in the order `add_address` was called. Responses arriving after a
//! [`RouteSession::reset`] are dropped instead of resurrecting old points.

use geo::Rect;
use log::{debug, info, warn};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::endpoints::{EndpointError, EndpointRule};
use crate::error::{ComputeRouteError, GeocodingError};
use crate::point::{InvalidPointError, Point};
use crate::providers::{DirectionsProvider, Geocoder};
use crate::route::{SelectedRoute, TransportMode};
use crate::selector::RouteSelector;
use crate::store::{AddOutcome, PointStore, Readiness, StoreSnapshot};

/// Options controlling how a [`RouteSession`] requests routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Travel mode sent to the directions provider.
    pub mode: TransportMode,
    /// Whether to ask the provider for alternate candidates.
    pub request_alternates: bool,
    /// Which stored points become the route endpoints.
    pub endpoints: EndpointRule,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            mode: TransportMode::Walking,
            request_alternates: true,
            endpoints: EndpointRule::FirstAndLast,
        }
    }
}

/// Result of [`RouteSession::add_address`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddressOutcome {
    /// The address resolved and was stored.
    Added {
        /// The stored point.
        point: Point,
        /// Store readiness after the append.
        readiness: Readiness,
    },
    /// The session was reset while the address was being resolved.
    Discarded,
}

/// Result of [`RouteSession::route`].
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// The shortest candidate, ready to draw.
    Selected(SelectedRoute),
    /// The session was reset while directions were pending.
    Discarded,
}

/// Errors returned by [`RouteSession::add_address`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddAddressError {
    /// The address could not be resolved.
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),
    /// The geocoder returned an unusable coordinate.
    #[error("geocoder returned an invalid coordinate for {address:?}: {source}")]
    InvalidPoint {
        /// Address as entered.
        address: String,
        /// Validation failure.
        #[source]
        source: InvalidPointError,
    },
}

/// Errors returned by [`RouteSession::route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionRouteError {
    /// Not enough points have been added yet.
    #[error("route requested with {points} point(s); add more addresses first")]
    NotReady {
        /// Number of stored points.
        points: usize,
    },
    /// The endpoint rule does not fit the stored points.
    #[error(transparent)]
    Endpoints(#[from] EndpointError),
    /// Route selection failed.
    #[error(transparent)]
    Route(#[from] ComputeRouteError),
}

/// A user's map session: points entered so far and the route between them.
#[derive(Debug)]
pub struct RouteSession<G, D> {
    geocoder: G,
    selector: RouteSelector<D>,
    store: PointStore,
    options: SessionOptions,
    geocode_queue: Mutex<()>,
}

impl<G: Geocoder, D: DirectionsProvider> RouteSession<G, D> {
    /// Create a session with default options.
    pub fn new(geocoder: G, directions: D) -> Self {
        Self::with_options(geocoder, directions, SessionOptions::default())
    }

    /// Create a session with explicit options.
    pub fn with_options(geocoder: G, directions: D, options: SessionOptions) -> Self {
        Self::with_store(geocoder, directions, options, PointStore::new())
    }

    /// Create a session around an existing store.
    pub fn with_store(
        geocoder: G,
        directions: D,
        options: SessionOptions,
        store: PointStore,
    ) -> Self {
        Self {
            geocoder,
            selector: RouteSelector::new(directions),
            store,
            options,
            geocode_queue: Mutex::new(()),
        }
    }

    /// Options in effect.
    pub const fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// The route selector, exposing the last request state.
    pub const fn selector(&self) -> &RouteSelector<D> {
        &self.selector
    }

    /// Resolve `address` and append it to the point list.
    ///
    /// Calls are served one at a time in arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`AddAddressError::Geocoding`] when resolution fails and
    /// [`AddAddressError::InvalidPoint`] when the geocoder yields an unusable
    /// coordinate. No point is stored in either case.
    pub async fn add_address(&self, address: &str) -> Result<AddressOutcome, AddAddressError> {
        let _turn = self.geocode_queue.lock().await;
        let generation = self.store.generation();
        debug!("geocoding {address:?}");
        let placemark = self.geocoder.resolve(address).await.inspect_err(|err| {
            warn!("geocoding {address:?} failed: {err}");
        })?;
        let point = Point::new(address, placemark.location);
        let outcome = self
            .store
            .add_for(generation, point.clone())
            .map_err(|source| AddAddressError::InvalidPoint {
                address: address.to_owned(),
                source,
            })?;
        Ok(match outcome {
            AddOutcome::Appended(readiness) => {
                info!("added {address:?} as {:?}", placemark.display_name);
                AddressOutcome::Added { point, readiness }
            }
            AddOutcome::Discarded => AddressOutcome::Discarded,
        })
    }

    /// Compute the shortest route between the configured endpoints.
    ///
    /// # Errors
    ///
    /// See [`SessionRouteError`].
    pub async fn route(&self) -> Result<RouteOutcome, SessionRouteError> {
        let StoreSnapshot {
            generation,
            points,
            readiness,
        } = self.store.snapshot();
        if !readiness.is_ready() {
            return Err(SessionRouteError::NotReady {
                points: points.len(),
            });
        }
        let (start, end) = self.options.endpoints.select(&points)?;
        debug!("routing {:?} -> {:?}", start.label, end.label);
        let selected = self
            .selector
            .compute_shortest(
                start.location,
                end.location,
                self.options.mode,
                self.options.request_alternates,
            )
            .await?;
        if self.store.generation() != generation {
            warn!("discarding route computed before the last reset");
            return Ok(RouteOutcome::Discarded);
        }
        Ok(RouteOutcome::Selected(selected))
    }

    /// Clear every point; pending responses will be discarded.
    pub fn reset(&self) -> Readiness {
        self.store.reset()
    }

    /// Snapshot of the stored points in entry order.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        self.store.all()
    }

    /// Whether a route may be requested.
    #[must_use]
    pub fn readiness(&self) -> Readiness {
        self.store.readiness()
    }

    /// Bounding box of every stored point, for re-centring the map.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.store.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryGeocoder, StaticDirections, block_on_for_tests};
    use geo::Coord;
    use rstest::{fixture, rstest};

    type Session = RouteSession<MemoryGeocoder, StaticDirections>;

    #[fixture]
    fn session() -> Session {
        RouteSession::new(
            MemoryGeocoder::with_places([
                ("A", Coord { x: 0.0, y: 0.0 }),
                ("B", Coord { x: 0.0, y: 1.0 }),
                ("C", Coord { x: 1.0, y: 1.0 }),
                ("Bad", Coord { x: 500.0, y: 0.0 }),
            ]),
            StaticDirections::with_distances(&[5.2, 3.8]),
        )
    }

    #[rstest]
    fn adds_points_in_call_order(session: Session) {
        block_on_for_tests(async {
            for address in ["A", "B", "C"] {
                session.add_address(address).await.expect("resolves");
            }
        });
        let labels: Vec<_> = session.points().into_iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert!(session.readiness().is_ready());
    }

    #[rstest]
    fn geocoding_failure_adds_nothing(session: Session) {
        let err =
            block_on_for_tests(session.add_address("Atlantis")).expect_err("unknown address");
        assert!(matches!(
            err,
            AddAddressError::Geocoding(GeocodingError::NoResult { .. })
        ));
        assert!(session.points().is_empty());
    }

    #[rstest]
    fn invalid_coordinate_is_rejected(session: Session) {
        let err = block_on_for_tests(session.add_address("Bad")).expect_err("out of range");
        assert!(matches!(err, AddAddressError::InvalidPoint { .. }));
        assert!(session.points().is_empty());
    }

    #[rstest]
    fn route_requires_readiness(session: Session) {
        block_on_for_tests(session.add_address("A")).expect("resolves");
        block_on_for_tests(session.add_address("B")).expect("resolves");
        let err =
            block_on_for_tests(session.route()).expect_err("two points are not enough");
        assert_eq!(err, SessionRouteError::NotReady { points: 2 });
    }

    #[rstest]
    fn routes_first_to_last_by_default(session: Session) {
        let outcome = block_on_for_tests(async {
            for address in ["A", "B", "C"] {
                session.add_address(address).await.expect("resolves");
            }
            session.route().await
        })
        .expect("route");
        let RouteOutcome::Selected(selected) = outcome else {
            panic!("expected a selected route");
        };
        assert_eq!(selected.distance(), 3.8);
        let request = session.selector().provider().requests();
        assert_eq!(request.len(), 1);
        assert_eq!(request[0].start, Coord { x: 0.0, y: 0.0 });
        assert_eq!(request[0].end, Coord { x: 1.0, y: 1.0 });
        assert_eq!(request[0].mode, TransportMode::Walking);
        assert!(request[0].alternates);
    }

    #[rstest]
    fn reset_hides_route_and_clears_points(session: Session) {
        block_on_for_tests(async {
            for address in ["A", "B", "C"] {
                session.add_address(address).await.expect("resolves");
            }
        });
        assert_eq!(session.reset(), Readiness::NotReady);
        assert!(session.points().is_empty());
        assert!(session.bounds().is_none());
    }
}

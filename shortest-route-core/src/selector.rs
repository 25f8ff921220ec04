//! Request candidate routes and pick the shortest one.

use std::sync::{Mutex, PoisonError};

use geo::Coord;
use log::{debug, warn};

use crate::error::{ComputeRouteError, RouteUnavailableError};
use crate::providers::DirectionsProvider;
use crate::route::{DirectionsRequest, SelectedRoute, TransportMode, select_shortest};

/// Lifecycle of the most recent directions request.
///
/// `Succeeded` and `Failed` are terminal; a new call to
/// [`RouteSelector::compute_shortest`] starts over from `Requesting`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    /// No request has been issued yet.
    #[default]
    Idle,
    /// A request is awaiting the provider.
    Requesting,
    /// The last request selected a route.
    Succeeded(SelectedRoute),
    /// The last request failed.
    Failed(ComputeRouteError),
}

/// Selects the shortest of the candidate routes returned by a provider.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use geo::{Coord, LineString};
/// use shortest_route_core::{
///     CandidateRoute, DirectionsProvider, DirectionsRequest, ProviderError, RouteSelector,
///     TransportMode,
/// };
///
/// struct TwoRoutes;
///
/// #[async_trait]
/// impl DirectionsProvider for TwoRoutes {
///     async fn route(
///         &self,
///         request: &DirectionsRequest,
///     ) -> Result<Vec<CandidateRoute>, ProviderError> {
///         let line = LineString::new(vec![request.start, request.end]);
///         Ok(vec![
///             CandidateRoute { geometry: line.clone(), distance: 5.2 },
///             CandidateRoute { geometry: line, distance: 3.8 },
///         ])
///     }
/// }
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let selector = RouteSelector::new(TwoRoutes);
/// let selected = runtime.block_on(selector.compute_shortest(
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 1.0, y: 1.0 },
///     TransportMode::Walking,
///     true,
/// ))?;
/// assert_eq!(selected.distance(), 3.8);
/// assert_eq!(selected.index, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RouteSelector<P> {
    provider: P,
    state: Mutex<RequestState>,
}

impl<P: DirectionsProvider> RouteSelector<P> {
    /// Wrap `provider`.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: Mutex::new(RequestState::Idle),
        }
    }

    /// The wrapped provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// State of the most recent request.
    #[must_use]
    pub fn state(&self) -> RequestState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, state: RequestState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Ask the provider for routes from `start` to `end` and keep the
    /// shortest.
    ///
    /// Ties resolve to the candidate listed first by the provider. No retry
    /// is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeRouteError::Provider`] when the provider fails and
    /// [`ComputeRouteError::Unavailable`] when it answers with no candidate.
    pub async fn compute_shortest(
        &self,
        start: Coord<f64>,
        end: Coord<f64>,
        mode: TransportMode,
        request_alternates: bool,
    ) -> Result<SelectedRoute, ComputeRouteError> {
        let request = DirectionsRequest {
            start,
            end,
            mode,
            alternates: request_alternates,
        };
        self.set_state(RequestState::Requesting);
        let outcome = self.request(&request).await;
        self.set_state(match &outcome {
            Ok(route) => RequestState::Succeeded(route.clone()),
            Err(err) => RequestState::Failed(err.clone()),
        });
        outcome
    }

    async fn request(
        &self,
        request: &DirectionsRequest,
    ) -> Result<SelectedRoute, ComputeRouteError> {
        debug!(
            "requesting {} directions {:?} -> {:?} (alternates: {})",
            request.mode, request.start, request.end, request.alternates
        );
        let candidates = self.provider.route(request).await.inspect_err(|err| {
            warn!("directions provider failed: {err}");
        })?;
        for (index, candidate) in candidates.iter().enumerate() {
            if !candidate.has_valid_distance() {
                warn!(
                    "ignoring candidate {} with invalid distance {}",
                    index + 1,
                    candidate.distance
                );
            }
        }
        let selected = select_shortest(candidates).ok_or(RouteUnavailableError {
            mode: request.mode,
        })?;
        debug!(
            "selected candidate {} of {} ({:.1} m)",
            selected.index + 1,
            selected.candidates,
            selected.distance()
        );
        Ok(selected)
    }
}

//! Test utilities for directions providers.
//!
//! This module provides [`StubDirectionsProvider`], a deterministic test
//! double for [`DirectionsProvider`] that returns pre-configured candidates
//! without making HTTP requests. Like the OSRM adapter, it rejects transit.

use async_trait::async_trait;
use shortest_route_core::{
    CandidateRoute, DirectionsProvider, DirectionsRequest, ProviderError, TransportMode,
};

/// Stub `DirectionsProvider` for testing.
///
/// # Example
///
/// ```
/// use geo::{Coord, LineString};
/// use shortest_route_core::CandidateRoute;
/// use shortest_route_data::routing::test_support::StubDirectionsProvider;
///
/// let line = LineString::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }]);
/// let route = CandidateRoute::new(line, 120.0)?;
/// let provider = StubDirectionsProvider::with_routes(vec![route]);
/// # Ok::<(), shortest_route_core::CandidateRouteError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubDirectionsProvider {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Routes(Vec<CandidateRoute>),
    Error(ProviderError),
}

impl StubDirectionsProvider {
    /// Create a provider that answers every request with `routes`.
    #[must_use]
    pub const fn with_routes(routes: Vec<CandidateRoute>) -> Self {
        Self {
            response: StubResponse::Routes(routes),
        }
    }

    /// Create a provider that fails every supported request with `error`.
    #[must_use]
    pub const fn with_error(error: ProviderError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }

    /// Create a provider that reports no route, as OSRM does for `NoRoute`.
    #[must_use]
    pub const fn without_routes() -> Self {
        Self::with_routes(Vec::new())
    }
}

#[async_trait]
impl DirectionsProvider for StubDirectionsProvider {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        if request.mode == TransportMode::Transit {
            return Err(ProviderError::UnsupportedMode(request.mode));
        }

        match &self.response {
            StubResponse::Routes(routes) if request.alternates => Ok(routes.clone()),
            StubResponse::Routes(routes) => Ok(routes.iter().take(1).cloned().collect()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

//! Stub session wiring shared by the unit and behaviour tests.

use super::*;
use crate::route::{DynRouteSession, RouteConfig, RouteSessionBuilder};
use geo::{Coord, LineString};
use shortest_route_core::{CandidateRoute, RouteSession};
use shortest_route_data::geocoding::test_support::StubGeocoder;
use shortest_route_data::routing::test_support::StubDirectionsProvider;

pub(super) const PLACES: [(&str, Coord<f64>); 3] = [
    ("A", Coord { x: 0.0, y: 0.0 }),
    ("B", Coord { x: 0.0, y: 1.0 }),
    ("C", Coord { x: 1.0, y: 1.0 }),
];

/// Two candidates between any endpoints; the second is shorter.
pub(super) fn two_candidates() -> Vec<CandidateRoute> {
    let direct = LineString::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }]);
    let detour = LineString::new(vec![
        Coord { x: 0.0, y: 0.0 },
        Coord { x: 0.5, y: 0.7 },
        Coord { x: 1.0, y: 1.0 },
    ]);
    vec![
        CandidateRoute::new(direct, 5.2).expect("valid distance"),
        CandidateRoute::new(detour, 3.8).expect("valid distance"),
    ]
}

/// Builds sessions from stubs instead of HTTP adapters.
#[derive(Debug, Clone)]
pub(super) struct StubRouteSessionBuilder {
    pub(super) geocoder: StubGeocoder,
    pub(super) directions: StubDirectionsProvider,
}

impl Default for StubRouteSessionBuilder {
    fn default() -> Self {
        Self {
            geocoder: StubGeocoder::with_places(PLACES),
            directions: StubDirectionsProvider::with_routes(two_candidates()),
        }
    }
}

impl RouteSessionBuilder for StubRouteSessionBuilder {
    fn build(&self, config: &RouteConfig) -> Result<DynRouteSession, CliError> {
        let geocoder: Box<dyn shortest_route_core::Geocoder> = Box::new(self.geocoder.clone());
        let directions: Box<dyn shortest_route_core::DirectionsProvider> =
            Box::new(self.directions.clone());
        Ok(RouteSession::with_options(geocoder, directions, config.options))
    }
}

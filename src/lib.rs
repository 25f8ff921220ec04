//! Facade crate for the shortest-route engine.
//!
//! This crate re-exports the core domain types and exposes the OSRM and
//! Nominatim adapters behind the `http` feature flag.

#![forbid(unsafe_code)]

pub use shortest_route_core::{
    AddAddressError, AddressOutcome, CandidateRoute, ComputeRouteError, DirectionsProvider,
    DirectionsRequest, EndpointError, EndpointRule, Geocoder, GeocodingError, Placemark, Point,
    PointStore, ProviderError, Readiness, RouteOutcome, RouteSelector, RouteSession,
    RouteUnavailableError, SelectedRoute, SessionOptions, SessionRouteError, TransportMode,
};

#[cfg(feature = "http")]
pub use shortest_route_data::{
    ProviderBuildError,
    geocoding::{HttpGeocoder, HttpGeocoderConfig},
    routing::{HttpDirectionsProvider, HttpDirectionsProviderConfig},
};

#[cfg(feature = "test-support")]
pub use shortest_route_core::test_support;

//! Core domain types for shortest-route planning.
//!
//! A user pins addresses on a map; each address is geocoded into a
//! [`Point`] and kept in a [`PointStore`]. Once enough points exist, a
//! [`RouteSelector`] asks a [`DirectionsProvider`] for candidate routes
//! between two of them and keeps the shortest.
//!
//! Route computation itself is delegated; this crate owns only candidate
//! selection and the point list. [`RouteSession`] ties the pieces together
//! for hosts that want a single entry point.

pub mod endpoints;
pub mod error;
pub mod point;
pub mod providers;
pub mod route;
pub mod selector;
pub mod session;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use endpoints::{EndpointError, EndpointRule};
pub use error::{ComputeRouteError, GeocodingError, ProviderError, RouteUnavailableError};
pub use point::{InvalidPointError, Point, validate_coord};
pub use providers::{DirectionsProvider, Geocoder, Placemark};
pub use route::{
    CandidateRoute, CandidateRouteError, DirectionsRequest, ParseTransportModeError,
    SelectedRoute, TransportMode, select_shortest, shortest_index,
};
pub use selector::{RequestState, RouteSelector};
pub use session::{
    AddAddressError, AddressOutcome, RouteOutcome, RouteSession, SessionOptions,
    SessionRouteError,
};
pub use store::{
    AddOutcome, DEFAULT_READY_AFTER, Generation, PointStore, Readiness, StoreSnapshot,
};

//! HTTP adapters for the shortest-route engine.
//!
//! Responsibilities:
//! - Implement [`shortest_route_core::DirectionsProvider`] against OSRM.
//! - Implement [`shortest_route_core::Geocoder`] against Nominatim.
//! - Classify transport failures into the core error taxonomy.
//!
//! Boundaries:
//! - Do not encode selection rules (live in `shortest-route-core`).
//! - No retries; every failure is returned to the caller as a value.
//!
//! Invariants:
//! - Thread-safe; a provider may be shared across tasks.
//! - No global mutable state.

pub mod geocoding;
mod http;
pub mod routing;

pub use http::{DEFAULT_USER_AGENT, ProviderBuildError};

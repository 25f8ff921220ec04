//! HTTP-based directions providers for routing services.
//!
//! This module provides [`HttpDirectionsProvider`], an implementation of
//! [`shortest_route_core::DirectionsProvider`] that fetches candidate routes
//! from an OSRM routing service.
//!
//! # Architecture
//!
//! The provider makes one request to the OSRM Route API per directions
//! request and asks for alternatives when the request allows them. OSRM's
//! primary route comes first, which keeps the selector's tie-break stable.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use shortest_route_data::routing::{HttpDirectionsProvider, HttpDirectionsProviderConfig};
//!
//! let config = HttpDirectionsProviderConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpDirectionsProvider::with_config(config)?;
//! # Ok::<(), shortest_route_data::ProviderBuildError>(())
//! ```

mod osrm;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{HttpDirectionsProvider, HttpDirectionsProviderConfig};

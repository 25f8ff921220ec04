//! Error taxonomy shared by providers and the route selector.

use thiserror::Error;

use crate::route::TransportMode;

/// Failures reported by a [`Geocoder`](crate::Geocoder).
///
/// These are surfaced to the user as a retryable prompt; no point is added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodingError {
    /// The service answered but found nothing for the address.
    #[error("no location found for {address:?}")]
    NoResult {
        /// Address as entered by the user.
        address: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("geocoding request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("geocoding request to {url} failed with HTTP {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The service could not be reached.
    #[error("geocoding service at {url} is unreachable: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Error detail.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse geocoding response: {message}")]
    Parse {
        /// Error detail.
        message: String,
    },
}

/// Transport-level failures reported by a
/// [`DirectionsProvider`](crate::DirectionsProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The request did not complete within the configured timeout.
    #[error("directions request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("directions request to {url} failed with HTTP {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The service could not be reached.
    #[error("directions service at {url} is unreachable: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Error detail.
        message: String,
    },
    /// The service reported an error code in an otherwise valid response.
    #[error("directions service returned {code}: {message}")]
    Service {
        /// Service status code.
        code: String,
        /// Error detail.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse directions response: {message}")]
    Parse {
        /// Error detail.
        message: String,
    },
    /// The provider cannot route with the requested mode.
    #[error("directions provider does not support {0} routes")]
    UnsupportedMode(TransportMode),
}

/// The provider succeeded but returned no usable route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no {mode} route exists between the requested points")]
pub struct RouteUnavailableError {
    /// Mode the route was requested for.
    pub mode: TransportMode,
}

/// Errors returned by [`RouteSelector::compute_shortest`](crate::RouteSelector::compute_shortest).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputeRouteError {
    /// The service was unreachable or failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// The service answered without any candidate.
    #[error(transparent)]
    Unavailable(#[from] RouteUnavailableError),
}

impl ComputeRouteError {
    /// Returns `true` when the provider answered but no route exists.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

//! Consumed interfaces for the external geocoding and directions services.

use async_trait::async_trait;
use geo::Coord;

use crate::error::{GeocodingError, ProviderError};
use crate::route::{CandidateRoute, DirectionsRequest};

/// A geocoder's answer for one address.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placemark {
    /// Resolved position, `x` = longitude, `y` = latitude.
    pub location: Coord<f64>,
    /// Human-readable location reported by the service.
    pub display_name: String,
}

/// Convert free-text addresses to coordinates.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use geo::Coord;
/// use shortest_route_core::{Geocoder, GeocodingError, Placemark};
///
/// struct Origin;
///
/// #[async_trait]
/// impl Geocoder for Origin {
///     async fn resolve(&self, address: &str) -> Result<Placemark, GeocodingError> {
///         if address.is_empty() {
///             return Err(GeocodingError::NoResult { address: address.to_owned() });
///         }
///         Ok(Placemark {
///             location: Coord { x: 0.0, y: 0.0 },
///             display_name: "Null Island".to_owned(),
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `address` to a single location.
    async fn resolve(&self, address: &str) -> Result<Placemark, GeocodingError>;
}

/// Fetch candidate routes between two coordinates.
///
/// Implementations return the candidates in the service's own order; an
/// empty list means the service answered but found no route.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Return zero or more candidate routes for `request`.
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, ProviderError>;
}

#[async_trait]
impl<T: Geocoder + ?Sized> Geocoder for std::sync::Arc<T> {
    async fn resolve(&self, address: &str) -> Result<Placemark, GeocodingError> {
        (**self).resolve(address).await
    }
}

#[async_trait]
impl<T: DirectionsProvider + ?Sized> DirectionsProvider for std::sync::Arc<T> {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        (**self).route(request).await
    }
}

#[async_trait]
impl<T: Geocoder + ?Sized> Geocoder for Box<T> {
    async fn resolve(&self, address: &str) -> Result<Placemark, GeocodingError> {
        (**self).resolve(address).await
    }
}

#[async_trait]
impl<T: DirectionsProvider + ?Sized> DirectionsProvider for Box<T> {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        (**self).route(request).await
    }
}

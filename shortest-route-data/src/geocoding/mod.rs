//! HTTP-based geocoders.
//!
//! [`HttpGeocoder`] implements [`shortest_route_core::Geocoder`] on top of
//! the Nominatim search API, keeping only the best match for each address.

mod nominatim;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{HttpGeocoder, HttpGeocoderConfig};

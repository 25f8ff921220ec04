//! Test utilities for geocoders.
//!
//! [`StubGeocoder`] answers from a fixed gazetteer without making HTTP
//! requests. Lookups ignore case and surrounding whitespace, as a search
//! service would.

use std::collections::HashMap;

use async_trait::async_trait;
use geo::Coord;
use shortest_route_core::{Geocoder, GeocodingError, Placemark};

/// Stub `Geocoder` for testing.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use shortest_route_data::geocoding::test_support::StubGeocoder;
///
/// let geocoder = StubGeocoder::with_places([
///     ("Big Ben", Coord { x: -0.1246, y: 51.5007 }),
///     ("Tower Bridge", Coord { x: -0.0754, y: 51.5055 }),
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct StubGeocoder {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Places(HashMap<String, Placemark>),
    Error(GeocodingError),
}

fn normalise(address: &str) -> String {
    address.trim().to_lowercase()
}

impl StubGeocoder {
    /// Create a geocoder that knows `places`; other addresses yield
    /// [`GeocodingError::NoResult`].
    #[must_use]
    pub fn with_places<I, S>(places: I) -> Self
    where
        I: IntoIterator<Item = (S, Coord<f64>)>,
        S: Into<String>,
    {
        let places = places
            .into_iter()
            .map(|(name, location)| {
                let display_name = name.into();
                let key = normalise(&display_name);
                (
                    key,
                    Placemark {
                        location,
                        display_name,
                    },
                )
            })
            .collect();
        Self {
            response: StubResponse::Places(places),
        }
    }

    /// Create a geocoder that fails every lookup with `error`.
    #[must_use]
    pub const fn with_error(error: GeocodingError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn resolve(&self, address: &str) -> Result<Placemark, GeocodingError> {
        match &self.response {
            StubResponse::Places(places) => places
                .get(&normalise(address))
                .cloned()
                .ok_or_else(|| GeocodingError::NoResult {
                    address: address.to_owned(),
                }),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use shortest_route_core::test_support::block_on_for_tests;

    #[rstest]
    #[case("Big Ben")]
    #[case("  big ben ")]
    #[case("BIG BEN")]
    fn lookups_ignore_case_and_padding(#[case] query: &str) {
        let geocoder = StubGeocoder::with_places([("Big Ben", Coord { x: -0.12, y: 51.5 })]);

        let placemark = block_on_for_tests(geocoder.resolve(query)).expect("known place");

        assert_eq!(placemark.location, Coord { x: -0.12, y: 51.5 });
        assert_eq!(placemark.display_name, "Big Ben");
    }

    #[rstest]
    fn unknown_address_has_no_result() {
        let geocoder = StubGeocoder::with_places([("Big Ben", Coord { x: -0.12, y: 51.5 })]);

        let err = block_on_for_tests(geocoder.resolve("Atlantis")).expect_err("unknown place");

        assert_eq!(
            err,
            GeocodingError::NoResult {
                address: "Atlantis".to_owned()
            }
        );
    }

    #[rstest]
    fn with_error_returns_configured_error() {
        let geocoder = StubGeocoder::with_error(GeocodingError::Timeout {
            url: "http://example.com/search".to_owned(),
            timeout_secs: 30,
        });

        let err = block_on_for_tests(geocoder.resolve("anything")).expect_err("should fail");

        assert!(matches!(err, GeocodingError::Timeout { .. }));
    }
}

//! HTTP-based `Geocoder` using the Nominatim search API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use shortest_route_core::{Geocoder, GeocodingError, Placemark};
use url::Url;

use super::nominatim::SearchResult;
use crate::http::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ProviderBuildError, RequestFailure, build_client,
    parse_base_url,
};

/// Configuration for [`HttpGeocoder`].
#[derive(Debug, Clone)]
pub struct HttpGeocoderConfig {
    /// Base URL for the Nominatim service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    ///
    /// The public Nominatim instance rejects requests without one.
    pub user_agent: String,
}

impl Default for HttpGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpGeocoderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP geocoder backed by Nominatim's `/search` endpoint.
///
/// Only the top-ranked match is used. Coordinates are parsed but not range
/// checked; the point store validates them when the point is added.
///
/// # Example
///
/// ```no_run
/// use shortest_route_core::Geocoder;
/// use shortest_route_data::geocoding::HttpGeocoder;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let geocoder = HttpGeocoder::new("https://nominatim.openstreetmap.org")?;
/// let placemark = geocoder.resolve("Big Ben, London").await?;
/// println!("{} at {:?}", placemark.display_name, placemark.location);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpGeocoder {
    client: Client,
    base_url: Url,
    config: HttpGeocoderConfig,
}

impl HttpGeocoder {
    /// Create a new geocoder with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpGeocoderConfig::new(base_url))
    }

    /// Create a new geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: HttpGeocoderConfig) -> Result<Self, ProviderBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = build_client(&config.user_agent, config.timeout)?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &HttpGeocoderConfig {
        &self.config
    }

    /// Build the search URL for `address`.
    fn build_search_url(&self, address: &str) -> Result<Url, GeocodingError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|err| GeocodingError::Parse {
                message: format!("cannot build search URL: {err}"),
            })?;
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1");
        Ok(url)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> GeocodingError {
        let url = url.as_str().to_owned();
        match RequestFailure::classify(error) {
            RequestFailure::Timeout => GeocodingError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            },
            RequestFailure::Http { status, message } => GeocodingError::Http {
                url,
                status,
                message,
            },
            RequestFailure::Network { message } => GeocodingError::Network { url, message },
        }
    }

    /// Convert search results to the best placemark.
    fn convert_response(
        address: &str,
        results: Vec<SearchResult>,
    ) -> Result<Placemark, GeocodingError> {
        let best = results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodingError::NoResult {
                address: address.to_owned(),
            })?;
        let location = best
            .location()
            .map_err(|message| GeocodingError::Parse { message })?;
        let display_name = if best.display_name.is_empty() {
            address.to_owned()
        } else {
            best.display_name
        };
        Ok(Placemark {
            location,
            display_name,
        })
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn resolve(&self, address: &str) -> Result<Placemark, GeocodingError> {
        let url = self.build_search_url(address)?;
        debug!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let results: Vec<SearchResult> =
            response.json().await.map_err(|err| GeocodingError::Parse {
                message: err.to_string(),
            })?;

        Self::convert_response(address, results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    fn result(lat: &str, lon: &str, display_name: &str) -> SearchResult {
        SearchResult {
            lat: lat.to_owned(),
            lon: lon.to_owned(),
            display_name: display_name.to_owned(),
        }
    }

    #[rstest]
    fn build_search_url_encodes_address() {
        let geocoder =
            HttpGeocoder::new("https://geo.example.com").expect("geocoder should build");

        let url = geocoder
            .build_search_url("10 Downing St, London")
            .expect("URL should build");

        assert_eq!(
            url.as_str(),
            "https://geo.example.com/search?q=10+Downing+St%2C+London&format=jsonv2&limit=1"
        );
    }

    #[rstest]
    fn convert_response_takes_first_result() {
        let results = vec![
            result("51.5", "-0.12", "Westminster"),
            result("40.7", "-74.0", "New York"),
        ];

        let placemark =
            HttpGeocoder::convert_response("westminster", results).expect("should convert");

        assert_eq!(placemark.location, Coord { x: -0.12, y: 51.5 });
        assert_eq!(placemark.display_name, "Westminster");
    }

    #[rstest]
    fn convert_response_reports_no_result() {
        let err = HttpGeocoder::convert_response("nowhere", Vec::new()).expect_err("should fail");

        assert_eq!(
            err,
            GeocodingError::NoResult {
                address: "nowhere".to_owned()
            }
        );
    }

    #[rstest]
    fn convert_response_reports_bad_coordinates() {
        let results = vec![result("", "-0.12", "Somewhere")];

        let err = HttpGeocoder::convert_response("somewhere", results).expect_err("should fail");

        assert!(matches!(err, GeocodingError::Parse { .. }));
    }

    #[rstest]
    fn display_name_falls_back_to_address() {
        let results = vec![result("1.0", "2.0", "")];

        let placemark =
            HttpGeocoder::convert_response("typed text", results).expect("should convert");

        assert_eq!(placemark.display_name, "typed text");
    }

    #[rstest]
    fn default_config_targets_public_nominatim() {
        let config = HttpGeocoderConfig::default().with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}

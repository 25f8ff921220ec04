//! HTTP-based `DirectionsProvider` using OSRM's Route API.
//!
//! This module provides [`HttpDirectionsProvider`], an implementation of the
//! [`DirectionsProvider`] trait that asks an OSRM routing service for a route
//! between two coordinates, optionally with alternatives.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use shortest_route_core::{DirectionsProvider, DirectionsRequest, TransportMode};
//! use shortest_route_data::routing::HttpDirectionsProvider;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = HttpDirectionsProvider::new("http://localhost:5000")?;
//! let request = DirectionsRequest {
//!     start: Coord { x: -0.1, y: 51.5 },
//!     end: Coord { x: -0.2, y: 51.6 },
//!     mode: TransportMode::Walking,
//!     alternates: true,
//! };
//! let candidates = provider.route(&request).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use geo::{Coord, LineString};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use shortest_route_core::{
    CandidateRoute, DirectionsProvider, DirectionsRequest, ProviderError, TransportMode,
};
use url::Url;

use super::osrm::{NO_ROUTE, OsrmRoute, RouteResponse};
use crate::http::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ProviderBuildError, RequestFailure, build_client,
    parse_base_url,
};

/// Configuration for [`HttpDirectionsProvider`].
#[derive(Debug, Clone)]
pub struct HttpDirectionsProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpDirectionsProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpDirectionsProviderConfig {
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

/// OSRM profile segment for `mode`, or `None` when OSRM cannot serve it.
const fn osrm_profile(mode: TransportMode) -> Option<&'static str> {
    match mode {
        TransportMode::Walking => Some("foot"),
        TransportMode::Driving => Some("driving"),
        TransportMode::Transit => None,
    }
}

/// HTTP directions provider backed by the OSRM Route API.
///
/// Candidates are returned in OSRM's order: the primary route first, then
/// alternatives. Routes with a negative or non-finite distance, or with fewer
/// than two vertices, are dropped.
#[derive(Debug)]
pub struct HttpDirectionsProvider {
    client: Client,
    base_url: Url,
    config: HttpDirectionsProviderConfig,
}

impl HttpDirectionsProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDirectionsProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: HttpDirectionsProviderConfig) -> Result<Self, ProviderBuildError> {
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
    pub const fn config(&self) -> &HttpDirectionsProviderConfig {
        &self.config
    }

    /// Build the OSRM Route API URL for `request`.
    ///
    /// The URL format is:
    /// `{base_url}/route/v1/{profile}/{lon},{lat};{lon},{lat}?alternatives=..&overview=full&geometries=geojson`
    fn build_route_url(&self, request: &DirectionsRequest) -> Result<Url, ProviderError> {
        let profile =
            osrm_profile(request.mode).ok_or(ProviderError::UnsupportedMode(request.mode))?;
        let path = format!(
            "route/v1/{profile}/{},{};{},{}",
            request.start.x, request.start.y, request.end.x, request.end.y
        );
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|err| ProviderError::Parse {
                message: format!("cannot build route URL: {err}"),
            })?;
        url.query_pairs_mut()
            .append_pair(
                "alternatives",
                if request.alternates { "true" } else { "false" },
            )
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson")
            .append_pair("steps", "false");
        Ok(url)
    }

    /// Convert a transport failure to a `ProviderError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> ProviderError {
        let url = url.as_str().to_owned();
        match RequestFailure::classify(error) {
            RequestFailure::Timeout => ProviderError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            },
            RequestFailure::Http { status, message } => ProviderError::Http {
                url,
                status,
                message,
            },
            RequestFailure::Network { message } => ProviderError::Network { url, message },
        }
    }

    /// Decode a response body given its HTTP status.
    ///
    /// OSRM reports `NoRoute` and `InvalidQuery` with a 400 status and a JSON
    /// body, so the body is decoded before the status is consulted. A body
    /// that is not an OSRM document is an HTTP error for non-success statuses
    /// and a parse error otherwise.
    fn decode_response(
        status: StatusCode,
        url: &Url,
        body: &[u8],
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        match serde_json::from_slice::<RouteResponse>(body) {
            Ok(route_response) => Self::convert_response(route_response),
            Err(_) if !status.is_success() => Err(ProviderError::Http {
                url: url.as_str().to_owned(),
                status: status.as_u16(),
                message: String::from_utf8_lossy(body).into_owned(),
            }),
            Err(err) => Err(ProviderError::Parse {
                message: err.to_string(),
            }),
        }
    }

    /// Convert an OSRM response to candidate routes.
    fn convert_response(response: RouteResponse) -> Result<Vec<CandidateRoute>, ProviderError> {
        if response.code == NO_ROUTE {
            debug!("OSRM found no route: {}", response.message.unwrap_or_default());
            return Ok(Vec::new());
        }
        if !response.is_ok() {
            return Err(ProviderError::Service {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }
        Ok(response
            .routes
            .into_iter()
            .enumerate()
            .filter_map(|(i, route)| {
                convert_route(route)
                    .inspect_err(|reason| warn!("dropping OSRM route #{i}: {reason}"))
                    .ok()
            })
            .collect())
    }
}

fn convert_route(route: OsrmRoute) -> Result<CandidateRoute, String> {
    if route.geometry.coordinates.len() < 2 {
        return Err(format!(
            "geometry has {} vertices",
            route.geometry.coordinates.len()
        ));
    }
    let geometry: LineString<f64> = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[x, y]| Coord { x, y })
        .collect();
    CandidateRoute::new(geometry, route.distance).map_err(|err| err.to_string())
}

#[async_trait]
impl DirectionsProvider for HttpDirectionsProvider {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        let url = self.build_route_url(request)?;
        debug!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        Self::decode_response(status, &url, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::osrm::LineGeometry;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> DirectionsRequest {
        DirectionsRequest {
            start: Coord { x: -0.1, y: 51.5 },
            end: Coord { x: -0.2, y: 51.6 },
            mode: TransportMode::Walking,
            alternates: true,
        }
    }

    fn osrm_route(distance: f64, vertices: usize) -> OsrmRoute {
        OsrmRoute {
            distance,
            duration: 0.0,
            geometry: LineGeometry {
                coordinates: (0..vertices).map(|_| [0.0, 0.0]).collect(),
            },
        }
    }

    #[rstest]
    fn build_route_url_formats_coordinates(request: DirectionsRequest) {
        let provider =
            HttpDirectionsProvider::new("http://osrm.example.com").expect("provider should build");

        let url = provider.build_route_url(&request).expect("walking is supported");

        assert_eq!(
            url.as_str(),
            "http://osrm.example.com/route/v1/foot/-0.1,51.5;-0.2,51.6\
             ?alternatives=true&overview=full&geometries=geojson&steps=false"
        );
    }

    #[rstest]
    fn build_route_url_keeps_path_prefix(mut request: DirectionsRequest) {
        request.mode = TransportMode::Driving;
        request.alternates = false;
        let provider = HttpDirectionsProvider::new("http://example.com/osrm/")
            .expect("provider should build");

        let url = provider.build_route_url(&request).expect("driving is supported");

        assert!(url.as_str().starts_with("http://example.com/osrm/route/v1/driving/"));
        assert!(url.as_str().contains("alternatives=false"));
    }

    #[rstest]
    fn build_route_url_rejects_transit(mut request: DirectionsRequest) {
        request.mode = TransportMode::Transit;
        let provider =
            HttpDirectionsProvider::new("http://localhost:5000").expect("provider should build");

        let err = provider.build_route_url(&request).expect_err("transit unsupported");

        assert_eq!(err, ProviderError::UnsupportedMode(TransportMode::Transit));
    }

    #[rstest]
    fn convert_response_keeps_order() {
        let response = RouteResponse {
            code: "Ok".to_owned(),
            message: None,
            routes: vec![osrm_route(5200.0, 2), osrm_route(3800.0, 3)],
        };

        let candidates =
            HttpDirectionsProvider::convert_response(response).expect("should convert");

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].distance, 5200.0);
        assert_eq!(candidates[1].distance, 3800.0);
        assert_eq!(candidates[1].geometry.0.len(), 3);
    }

    #[rstest]
    fn convert_response_drops_malformed_routes() {
        let response = RouteResponse {
            code: "Ok".to_owned(),
            message: None,
            routes: vec![
                osrm_route(-1.0, 2),
                osrm_route(f64::NAN, 2),
                osrm_route(100.0, 1),
                osrm_route(250.0, 2),
            ],
        };

        let candidates =
            HttpDirectionsProvider::convert_response(response).expect("should convert");

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].distance, 250.0);
    }

    #[rstest]
    fn convert_response_maps_no_route_to_empty_list() {
        let response = RouteResponse {
            code: NO_ROUTE.to_owned(),
            message: Some("Impossible route between points".to_owned()),
            routes: Vec::new(),
        };

        let candidates =
            HttpDirectionsProvider::convert_response(response).expect("NoRoute is not an error");

        assert!(candidates.is_empty());
    }

    #[rstest]
    fn convert_response_handles_service_error() {
        let response = RouteResponse {
            code: "InvalidQuery".to_owned(),
            message: Some("Query string malformed".to_owned()),
            routes: Vec::new(),
        };

        let err = HttpDirectionsProvider::convert_response(response).expect_err("should fail");

        match err {
            ProviderError::Service { code, message } => {
                assert_eq!(code, "InvalidQuery");
                assert_eq!(message, "Query string malformed");
            }
            _ => panic!("expected Service error, got {err:?}"),
        }
    }

    fn route_url() -> Url {
        Url::parse("http://localhost:5000/route/v1/foot/0,0;1,1").expect("valid URL")
    }

    #[rstest]
    fn decode_response_reads_no_route_from_bad_request() {
        let body = br#"{"code":"NoRoute","message":"Impossible route between points"}"#;

        let candidates =
            HttpDirectionsProvider::decode_response(StatusCode::BAD_REQUEST, &route_url(), body)
                .expect("NoRoute is not an error");

        assert!(candidates.is_empty());
    }

    #[rstest]
    fn decode_response_reads_service_error_from_bad_request() {
        let body = br#"{"code":"InvalidQuery","message":"Query string malformed"}"#;

        let err =
            HttpDirectionsProvider::decode_response(StatusCode::BAD_REQUEST, &route_url(), body)
                .expect_err("should fail");

        assert!(matches!(err, ProviderError::Service { ref code, .. } if code == "InvalidQuery"));
    }

    #[rstest]
    fn decode_response_reports_http_error_for_non_json_failure() {
        let err = HttpDirectionsProvider::decode_response(
            StatusCode::BAD_GATEWAY,
            &route_url(),
            b"<html>Bad Gateway</html>",
        )
        .expect_err("should fail");

        assert_eq!(
            err,
            ProviderError::Http {
                url: route_url().into(),
                status: 502,
                message: "<html>Bad Gateway</html>".to_owned(),
            }
        );
    }

    #[rstest]
    fn decode_response_reports_parse_error_for_garbage_success() {
        let err = HttpDirectionsProvider::decode_response(StatusCode::OK, &route_url(), b"garbage")
            .expect_err("should fail");

        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[rstest]
    fn decode_response_converts_successful_routes() {
        let body = br#"{"code":"Ok","routes":[
            {"distance":5200.0,"duration":60.0,
             "geometry":{"type":"LineString","coordinates":[[0.0,0.0],[1.0,1.0]]}},
            {"distance":3800.0,"duration":50.0,
             "geometry":{"type":"LineString","coordinates":[[0.0,0.0],[0.5,0.5],[1.0,1.0]]}}
        ]}"#;

        let candidates = HttpDirectionsProvider::decode_response(StatusCode::OK, &route_url(), body)
            .expect("should convert");

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].distance, 3800.0);
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpDirectionsProviderConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[rstest]
    fn rejects_invalid_base_url() {
        let err = HttpDirectionsProvider::new("not a url").expect_err("should fail");
        assert!(matches!(err, ProviderBuildError::BaseUrl { .. }));
    }
}

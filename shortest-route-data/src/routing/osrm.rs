//! OSRM API response types for the Route service.
//!
//! Requests are made with `geometries=geojson`, so each route carries its
//! path as a `GeoJSON` `LineString` of `[lon, lat]` pairs.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM code returned when the service found no path between the points.
pub const NO_ROUTE: &str = "NoRoute";

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route found
    /// - `"NoSegment"` - A coordinate could not be snapped to the network
    /// - `"InvalidQuery"` - Invalid query parameters
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Primary route followed by any alternatives.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One route entry of a [`RouteResponse`].
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Length in metres.
    pub distance: f64,
    /// Estimated travel time in seconds.
    #[serde(default)]
    pub duration: f64,
    /// Path geometry.
    pub geometry: LineGeometry,
}

/// `GeoJSON` `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// `[lon, lat]` vertices.
    pub coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [
                {
                    "distance": 5200.0,
                    "duration": 3700.5,
                    "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}
                },
                {
                    "distance": 3800.0,
                    "duration": 2700.0,
                    "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [0.5, 0.7], [1.0, 1.0]]}
                }
            ],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        assert_eq!(response.routes.len(), 2);
        assert_eq!(response.routes[1].distance, 3800.0);
        assert_eq!(response.routes[1].geometry.coordinates[1], [0.5, 0.7]);
    }

    #[test]
    fn deserialise_no_route_response() {
        let json = r#"{
            "code": "NoRoute",
            "message": "Impossible route between points"
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(response.code, NO_ROUTE);
        assert!(response.routes.is_empty());
    }
}

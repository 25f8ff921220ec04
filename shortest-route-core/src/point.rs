//! Resolved map points and their coordinate validation.

use geo::Coord;
use thiserror::Error;

/// A resolved address pinned on the map.
///
/// `location.x` holds the longitude and `location.y` the latitude, both in
/// degrees, matching the `lon,lat` order used by routing services.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use shortest_route_core::Point;
///
/// let point = Point::new("Red Square, Moscow", Coord { x: 37.6208, y: 55.7539 });
/// assert_eq!(point.label, "Red Square, Moscow");
/// assert!(point.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Display text, the raw address string entered by the user.
    pub label: String,
    /// Geographic position in degrees.
    pub location: Coord<f64>,
}

/// Errors returned by [`Point::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidPointError {
    /// Latitude or longitude was NaN or infinite.
    #[error("coordinate ({longitude}, {latitude}) is not finite")]
    NonFinite {
        /// Longitude in degrees.
        longitude: f64,
        /// Latitude in degrees.
        latitude: f64,
    },
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Point {
    /// Build a point without validating the coordinate.
    ///
    /// Validation happens when the point is added to a
    /// [`PointStore`](crate::PointStore).
    pub fn new(label: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            label: label.into(),
            location,
        }
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Check that the coordinate is finite and within WGS84 bounds.
    pub fn validate(&self) -> Result<(), InvalidPointError> {
        validate_coord(self.location)
    }
}

/// Check that `coord` is a finite WGS84 position.
pub fn validate_coord(coord: Coord<f64>) -> Result<(), InvalidPointError> {
    let Coord {
        x: longitude,
        y: latitude,
    } = coord;
    if !longitude.is_finite() || !latitude.is_finite() {
        return Err(InvalidPointError::NonFinite {
            longitude,
            latitude,
        });
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(InvalidPointError::LatitudeOutOfRange(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(InvalidPointError::LongitudeOutOfRange(longitude));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(180.0, 90.0)]
    #[case(-180.0, -90.0)]
    fn accepts_boundary_coordinates(#[case] x: f64, #[case] y: f64) {
        let point = Point::new("edge", Coord { x, y });
        assert!(point.validate().is_ok());
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::NAN)]
    #[case(f64::INFINITY, 0.0)]
    #[case(0.0, f64::NEG_INFINITY)]
    fn rejects_non_finite_coordinates(#[case] x: f64, #[case] y: f64) {
        let err = Point::new("bad", Coord { x, y })
            .validate()
            .expect_err("non-finite coordinate must be rejected");
        assert!(matches!(err, InvalidPointError::NonFinite { .. }));
    }

    #[rstest]
    fn rejects_latitude_out_of_range() {
        let err = validate_coord(Coord { x: 0.0, y: 90.5 }).expect_err("latitude too large");
        assert_eq!(err, InvalidPointError::LatitudeOutOfRange(90.5));
    }

    #[rstest]
    fn rejects_longitude_out_of_range() {
        let err = validate_coord(Coord { x: -181.0, y: 0.0 }).expect_err("longitude too small");
        assert_eq!(err, InvalidPointError::LongitudeOutOfRange(-181.0));
    }

    #[rstest]
    fn accessors_follow_lon_lat_order() {
        let point = Point::new("p", Coord { x: 37.6, y: 55.7 });
        assert_eq!(point.longitude(), 37.6);
        assert_eq!(point.latitude(), 55.7);
    }
}

//! Nominatim search response types.
//!
//! Requests are made with `format=jsonv2`, which returns a JSON array of
//! places ranked best first. Coordinates arrive as decimal strings.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use geo::Coord;
use serde::Deserialize;

/// One place of a Nominatim search response.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    /// Latitude as a decimal string.
    pub lat: String,
    /// Longitude as a decimal string.
    pub lon: String,
    /// Full human-readable address.
    #[serde(default)]
    pub display_name: String,
}

impl SearchResult {
    /// Parse the string coordinates into a `Coord` (`x` = lon, `y` = lat).
    pub fn location(&self) -> Result<Coord<f64>, String> {
        let x = parse_degrees(&self.lon, "longitude")?;
        let y = parse_degrees(&self.lat, "latitude")?;
        Ok(Coord { x, y })
    }
}

fn parse_degrees(raw: &str, axis: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid {axis} {raw:?}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_search_results() {
        let json = r#"[
            {
                "place_id": 1,
                "lat": "51.5007292",
                "lon": "-0.1246254",
                "display_name": "Big Ben, Westminster, London",
                "importance": 0.6
            }
        ]"#;

        let results: Vec<SearchResult> = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(results.len(), 1);
        let location = results[0].location().expect("valid coordinates");
        assert_eq!(location, Coord { x: -0.124_625_4, y: 51.500_729_2 });
        assert_eq!(results[0].display_name, "Big Ben, Westminster, London");
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let result = SearchResult {
            lat: "north".to_owned(),
            lon: "0.0".to_owned(),
            display_name: String::new(),
        };

        let err = result.location().expect_err("latitude is not a number");

        assert!(err.contains("latitude"));
    }
}

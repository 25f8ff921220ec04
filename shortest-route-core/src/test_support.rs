//! Test-only, in-memory provider implementations used by unit and behaviour
//! tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use geo::{Coord, LineString};

use crate::{
    CandidateRoute, DirectionsProvider, DirectionsRequest, Geocoder, GeocodingError, Placemark,
    ProviderError,
};

/// Deterministic `DirectionsProvider` returning a fixed answer and recording
/// every request it receives.
#[derive(Debug)]
pub struct StaticDirections {
    response: Result<Vec<CandidateRoute>, ProviderError>,
    requests: Mutex<Vec<DirectionsRequest>>,
}

impl StaticDirections {
    /// Answer every request with `routes`, in order.
    #[must_use]
    pub fn with_routes(routes: Vec<CandidateRoute>) -> Self {
        Self {
            response: Ok(routes),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer with one straight two-vertex candidate per distance.
    ///
    /// Each geometry is offset by its position so candidates stay
    /// distinguishable when distances tie.
    #[must_use]
    pub fn with_distances(distances: &[f64]) -> Self {
        let routes = distances
            .iter()
            .zip(0_u32..)
            .map(|(&distance, i)| CandidateRoute {
                geometry: LineString::new(vec![
                    Coord { x: 0.0, y: 0.0 },
                    Coord {
                        x: f64::from(i),
                        y: 1.0,
                    },
                ]),
                distance,
            })
            .collect();
        Self::with_routes(routes)
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn with_error(error: ProviderError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DirectionsProvider for StaticDirections {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*request);
        self.response.clone()
    }
}

/// `Geocoder` backed by an address lookup table.
///
/// Unknown addresses resolve to [`GeocodingError::NoResult`].
#[derive(Debug, Default)]
pub struct MemoryGeocoder {
    places: HashMap<String, Coord<f64>>,
}

impl MemoryGeocoder {
    /// Create a geocoder from `(address, coordinate)` pairs.
    pub fn with_places<I, S>(places: I) -> Self
    where
        I: IntoIterator<Item = (S, Coord<f64>)>,
        S: Into<String>,
    {
        Self {
            places: places
                .into_iter()
                .map(|(address, coord)| (address.into(), coord))
                .collect(),
        }
    }
}

#[async_trait]
impl Geocoder for MemoryGeocoder {
    async fn resolve(&self, address: &str) -> Result<Placemark, GeocodingError> {
        self.places
            .get(address)
            .map(|&location| Placemark {
                location,
                display_name: address.to_owned(),
            })
            .ok_or_else(|| GeocodingError::NoResult {
                address: address.to_owned(),
            })
    }
}

/// Drive `future` to completion on a fresh current-thread runtime.
///
/// # Panics
///
/// Panics if the runtime cannot be built.
pub fn block_on_for_tests<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime for tests")
        .block_on(future)
}

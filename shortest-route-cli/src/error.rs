//! Error types emitted by the shortest-route CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use shortest_route_core::{AddAddressError, ParseTransportModeError, SessionRouteError};
use shortest_route_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the shortest-route CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// Fewer addresses than a route needs were supplied.
    #[error("{count} address(es) given; at least {required} are needed")]
    TooFewAddresses { count: usize, required: usize },
    /// The travel mode was not recognised.
    #[error(transparent)]
    InvalidMode(#[from] ParseTransportModeError),
    /// The endpoint rule was not recognised.
    #[error(
        "unknown endpoint rule {value:?} (expected `first-last`, `first-two` or `START,END`)"
    )]
    InvalidEndpoints { value: String },
    /// Constructing the directions provider failed.
    #[error("failed to build directions provider for {base_url:?}: {source}")]
    BuildDirectionsProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Constructing the geocoder failed.
    #[error("failed to build geocoder for {base_url:?}: {source}")]
    BuildGeocoder {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Starting the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// An address could not be geocoded.
    #[error("failed to resolve {address:?}: {source}")]
    Geocode {
        address: String,
        #[source]
        source: AddAddressError,
    },
    /// Route selection failed.
    #[error("failed to compute route: {0}")]
    Route(#[from] SessionRouteError),
    /// The stored points changed while directions were pending.
    #[error("route discarded because the points changed while it was computed")]
    RouteDiscarded,
    /// Serializing the route report failed.
    #[error("failed to serialize route report: {0}")]
    SerializeReport(#[source] serde_json::Error),
    /// Writing the route report failed.
    #[error("failed to write route report: {0}")]
    WriteReport(#[source] std::io::Error),
}

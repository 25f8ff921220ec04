//! Route command implementation for the shortest-route CLI.

use std::io::Write;

use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use shortest_route_core::{
    AddAddressError, AddressOutcome, DEFAULT_READY_AFTER, DirectionsProvider, EndpointRule,
    Geocoder, Point, RouteOutcome, RouteSession, SelectedRoute, SessionOptions, TransportMode,
};
use shortest_route_data::geocoding::{HttpGeocoder, HttpGeocoderConfig};
use shortest_route_data::routing::{HttpDirectionsProvider, HttpDirectionsProviderConfig};

use crate::{
    ARG_ADDRESSES, ARG_ENDPOINTS, ARG_GEOCODER_BASE_URL, ARG_MODE, ARG_NO_ALTERNATES,
    ARG_OSRM_BASE_URL, CliError, ENV_ADDRESSES,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve each address in the order given, then ask an OSRM \
                 instance for directions between two of them and print the \
                 shortest candidate as JSON. Options can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Compute the shortest route between geocoded addresses"
)]
#[ortho_config(prefix = "SHORTEST_ROUTE")]
pub(crate) struct RouteArgs {
    /// Free-text addresses, in entry order.
    #[arg(value_name = ARG_ADDRESSES)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) addresses: Vec<String>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Base URL for the Nominatim geocoder.
    #[arg(long = ARG_GEOCODER_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geocoder_base_url: Option<String>,
    /// Travel mode: walking, driving or transit.
    #[arg(long = ARG_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<String>,
    /// Which addresses become the endpoints: first-last, first-two or START,END.
    #[arg(long = ARG_ENDPOINTS, value_name = "rule")]
    #[serde(default)]
    pub(crate) endpoints: Option<String>,
    /// Only consider the provider's primary route.
    #[arg(
        long = ARG_NO_ALTERNATES,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) no_alternates: Option<bool>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteConfig {
    /// Addresses to resolve, in entry order.
    pub(crate) addresses: Vec<String>,
    /// Base URL for the OSRM route service.
    pub(crate) osrm_base_url: String,
    /// Base URL for the Nominatim search service.
    pub(crate) geocoder_base_url: String,
    /// Session behaviour derived from the flags.
    pub(crate) options: SessionOptions,
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        if args.addresses.is_empty() {
            return Err(CliError::MissingArgument {
                field: ARG_ADDRESSES,
                env: ENV_ADDRESSES,
            });
        }
        let required = DEFAULT_READY_AFTER + 1;
        if args.addresses.len() < required {
            return Err(CliError::TooFewAddresses {
                count: args.addresses.len(),
                required,
            });
        }

        let mode = args
            .mode
            .as_deref()
            .map(str::parse::<TransportMode>)
            .transpose()?
            .unwrap_or_default();
        let endpoints = args
            .endpoints
            .as_deref()
            .map(parse_endpoint_rule)
            .transpose()?
            .unwrap_or_default();
        let options = SessionOptions {
            mode,
            request_alternates: !args.no_alternates.unwrap_or(false),
            endpoints,
        };

        let osrm_base_url = args
            .osrm_base_url
            .unwrap_or_else(|| HttpDirectionsProviderConfig::default().base_url);
        let geocoder_base_url = args
            .geocoder_base_url
            .unwrap_or_else(|| HttpGeocoderConfig::default().base_url);

        Ok(Self {
            addresses: args.addresses,
            osrm_base_url,
            geocoder_base_url,
            options,
        })
    }
}

/// Parse `first-last`, `first-two` or a zero-based `START,END` pair.
pub(crate) fn parse_endpoint_rule(value: &str) -> Result<EndpointRule, CliError> {
    let invalid = || CliError::InvalidEndpoints {
        value: value.to_owned(),
    };
    match value.trim() {
        "first-last" => Ok(EndpointRule::FirstAndLast),
        "first-two" => Ok(EndpointRule::FirstTwo),
        pair => {
            let (start, end) = pair.split_once(',').ok_or_else(invalid)?;
            let start = start.trim().parse().map_err(|_| invalid())?;
            let end = end.trim().parse().map_err(|_| invalid())?;
            Ok(EndpointRule::Indices { start, end })
        }
    }
}

/// Session type driven by the `route` command.
pub(crate) type DynRouteSession = RouteSession<Box<dyn Geocoder>, Box<dyn DirectionsProvider>>;

/// Builds the geocoder and directions provider for the current invocation.
pub(super) trait RouteSessionBuilder {
    fn build(&self, config: &RouteConfig) -> Result<DynRouteSession, CliError>;
}

pub(super) struct DefaultRouteSessionBuilder;

impl RouteSessionBuilder for DefaultRouteSessionBuilder {
    fn build(&self, config: &RouteConfig) -> Result<DynRouteSession, CliError> {
        let geocoder = HttpGeocoder::new(config.geocoder_base_url.clone()).map_err(|source| {
            CliError::BuildGeocoder {
                base_url: config.geocoder_base_url.clone(),
                source,
            }
        })?;
        let directions =
            HttpDirectionsProvider::new(config.osrm_base_url.clone()).map_err(|source| {
                CliError::BuildDirectionsProvider {
                    base_url: config.osrm_base_url.clone(),
                    source,
                }
            })?;
        let geocoder: Box<dyn Geocoder> = Box::new(geocoder);
        let directions: Box<dyn DirectionsProvider> = Box::new(directions);
        Ok(RouteSession::with_options(geocoder, directions, config.options))
    }
}

/// JSON document printed by the `route` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteReport {
    /// Travel mode the route was requested for.
    pub(crate) mode: TransportMode,
    /// Every stored point, in entry order.
    pub(crate) points: Vec<Point>,
    /// Point the route starts at.
    pub(crate) start: Point,
    /// Point the route ends at.
    pub(crate) end: Point,
    /// The shortest candidate.
    pub(crate) route: SelectedRoute,
}

pub(super) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultRouteSessionBuilder;
    run_route_with(args, &builder, &mut stdout)
}

pub(super) fn run_route_with(
    args: RouteArgs,
    builder: &dyn RouteSessionBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_route(args, builder)?;
    write_route_report(writer, &report)
}

fn execute_route(
    args: RouteArgs,
    builder: &dyn RouteSessionBuilder,
) -> Result<RouteReport, CliError> {
    let config = args.into_config()?;
    let session = builder.build(&config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(resolve_and_route(&session, &config))
}

async fn resolve_and_route(
    session: &DynRouteSession,
    config: &RouteConfig,
) -> Result<RouteReport, CliError> {
    for address in &config.addresses {
        match session.add_address(address).await {
            Ok(AddressOutcome::Added { point, .. }) => {
                info!("resolved {address:?} to {:?}", point.location);
            }
            Ok(AddressOutcome::Discarded) => {}
            Err(AddAddressError::InvalidPoint { source, .. }) => {
                warn!("skipping {address:?}: {source}");
            }
            Err(source) => {
                return Err(CliError::Geocode {
                    address: address.clone(),
                    source,
                });
            }
        }
    }

    let RouteOutcome::Selected(route) = session.route().await? else {
        return Err(CliError::RouteDiscarded);
    };
    let points = session.points();
    let (start, end) = config
        .options
        .endpoints
        .select(&points)
        .map(|(start, end)| (start.clone(), end.clone()))
        .map_err(|err| CliError::Route(err.into()))?;
    Ok(RouteReport {
        mode: config.options.mode,
        points,
        start,
        end,
        route,
    })
}

fn write_route_report(writer: &mut dyn Write, report: &RouteReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerializeReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}

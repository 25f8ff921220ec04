//! Command-line interface for computing the shortest route between
//! geocoded addresses.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use log::debug;
use tracing_subscriber::EnvFilter;

mod error;
mod route;

pub use error::CliError;
use route::{RouteArgs, run_route};

const ARG_ADDRESSES: &str = "address";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_GEOCODER_BASE_URL: &str = "geocoder-base-url";
const ARG_MODE: &str = "mode";
const ARG_ENDPOINTS: &str = "endpoints";
const ARG_NO_ALTERNATES: &str = "no-alternates";
const ENV_ADDRESSES: &str = "SHORTEST_ROUTE_ADDRESSES";

/// Default `RUST_LOG` directive when the variable is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`.
///
/// Records emitted through the `log` facade by the library crates are
/// forwarded to the same subscriber. Returns `false` when a global
/// subscriber was already installed, which is then left in place.
pub fn init_logging() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    match tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
    {
        Ok(()) => true,
        Err(err) => {
            debug!("keeping existing log subscriber: {err}");
            false
        }
    }
}

/// Run the CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Route(args) => run_route(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "shortest-route",
    about = "Pick the shortest route between geocoded addresses",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve addresses and print the shortest route between two of them.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;

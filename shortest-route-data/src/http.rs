//! HTTP plumbing shared by the routing and geocoding adapters.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

/// Default user agent for outgoing requests.
pub const DEFAULT_USER_AGENT: &str = "shortest-route/0.1";

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error type for HTTP provider construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The configured base URL could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    BaseUrl {
        /// The rejected URL.
        url: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// Build a client honouring `user_agent` and `timeout`.
pub(crate) fn build_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<Client, ProviderBuildError> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(ProviderBuildError::HttpClient)
}

/// Parse `base_url`, normalising it to end with a single `/` so relative
/// joins keep any path prefix.
pub(crate) fn parse_base_url(base_url: &str) -> Result<url::Url, ProviderBuildError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    url::Url::parse(&normalised).map_err(|source| ProviderBuildError::BaseUrl {
        url: base_url.to_owned(),
        source,
    })
}

/// Transport failure, classified independently of the calling adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestFailure {
    Timeout,
    Http { status: u16, message: String },
    Network { message: String },
}

impl RequestFailure {
    pub(crate) fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }
        if let Some(status) = error.status() {
            return Self::Http {
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        Self::Network {
            message: error.to_string(),
        }
    }
}

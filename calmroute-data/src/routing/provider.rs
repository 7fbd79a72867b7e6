//! HTTP-based `RoutingOracle` using the Google Directions and Geocoding APIs.
//!
//! The [`RoutingOracle`] trait is synchronous so the planners stay free of
//! async plumbing. This oracle bridges the async HTTP calls to the sync
//! interface by blocking on a Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use calmroute_core::RoutingOracle;
//! use calmroute_data::routing::HttpRoutingOracle;
//!
//! let oracle = HttpRoutingOracle::new("my-api-key")?;
//! let routes = oracle.get_routes("Connaught Place, Delhi", "India Gate, Delhi", &[])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::future::Future;
use std::time::Duration;

use calmroute_core::{GeoPoint, RouteOption, RoutingError, RoutingOracle, WaypointToken};
use log::debug;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::TravelMode;
use super::directions::{parse_directions, parse_geocode};
use super::waypoints::serialize_waypoints;

/// Errors raised while constructing an [`HttpRoutingOracle`].
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for routing requests.
pub const DEFAULT_USER_AGENT: &str = "calmroute/0.1";

/// Google Directions endpoint.
pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Google Geocoding endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpRoutingOracle`].
#[derive(Clone)]
pub struct HttpRoutingOracleConfig {
    /// Directions endpoint.
    pub directions_url: String,
    /// Geocoding endpoint.
    pub geocode_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Travel mode for directions requests.
    pub travel_mode: TravelMode,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpRoutingOracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRoutingOracleConfig")
            .field("directions_url", &self.directions_url)
            .field("geocode_url", &self.geocode_url)
            .field("api_key", &"<redacted>")
            .field("travel_mode", &self.travel_mode)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpRoutingOracleConfig {
    fn default() -> Self {
        Self {
            directions_url: DEFAULT_DIRECTIONS_URL.to_owned(),
            geocode_url: DEFAULT_GEOCODE_URL.to_owned(),
            api_key: String::new(),
            travel_mode: TravelMode::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRoutingOracleConfig {
    /// Create a configuration for the public Google endpoints.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Override the Directions endpoint.
    #[must_use]
    pub fn with_directions_url(mut self, url: impl Into<String>) -> Self {
        self.directions_url = url.into();
        self
    }

    /// Override the Geocoding endpoint.
    #[must_use]
    pub fn with_geocode_url(mut self, url: impl Into<String>) -> Self {
        self.geocode_url = url.into();
        self
    }

    /// Set the travel mode.
    #[must_use]
    pub const fn with_travel_mode(mut self, travel_mode: TravelMode) -> Self {
        self.travel_mode = travel_mode;
        self
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

/// Routing oracle backed by the Google Directions and Geocoding APIs.
///
/// Directions requests ask for alternatives with `departure_time=now` and
/// `traffic_model=best_guess` so driving routes carry live traffic
/// durations.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the oracle blocks on its own current-thread
/// runtime. Inside a multi-threaded runtime it uses that runtime's handle
/// with [`tokio::task::block_in_place`]. Inside a `current_thread` runtime
/// it falls back to its own runtime, which can deadlock if the caller's
/// runtime drives IO this request depends on.
pub struct HttpRoutingOracle {
    client: Client,
    config: HttpRoutingOracleConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpRoutingOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRoutingOracle")
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpRoutingOracle {
    /// Create an oracle for the public Google endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRoutingOracleConfig::new(api_key))
    }

    /// Create an oracle with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpRoutingOracleConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Oracle configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpRoutingOracleConfig {
        &self.config
    }

    /// Query parameters for a Directions request, key excluded.
    fn directions_params(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[WaypointToken],
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("origin", origin.to_owned()),
            ("destination", destination.to_owned()),
            ("alternatives", "true".to_owned()),
            ("departure_time", "now".to_owned()),
            ("traffic_model", "best_guess".to_owned()),
            ("mode", self.config.travel_mode.as_str().to_owned()),
        ];
        if let Some(serialized) = serialize_waypoints(waypoints, false) {
            params.push(("waypoints", serialized));
        }
        params
    }

    /// Append `params` and the API key to `base`.
    fn build_url(&self, base: &str, params: &[(&str, String)]) -> Result<Url, RoutingError> {
        let key = ("key", self.config.api_key.as_str());
        Url::parse_with_params(
            base,
            params
                .iter()
                .map(|(name, value)| (*name, value.as_str()))
                .chain(std::iter::once(key)),
        )
        .map_err(|err| RoutingError::Network {
            url: base.to_owned(),
            message: format!("invalid endpoint URL: {err}"),
        })
    }

    /// Fetch a response body, mapping transport and HTTP failures.
    ///
    /// Errors report `base` rather than the full URL so the key never
    /// leaks into messages.
    async fn fetch_body(&self, base: &str, url: Url) -> Result<String, RoutingError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, base))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, base))?;
        if !status.is_success() {
            return Err(RoutingError::Http {
                url: base.to_owned(),
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(body)
    }

    /// Convert a reqwest error to a `RoutingError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: strip_url(error),
            };
        }

        RoutingError::Network {
            url: url.to_owned(),
            message: strip_url(error),
        }
    }

    async fn fetch_routes(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[WaypointToken],
    ) -> Result<Vec<RouteOption>, RoutingError> {
        let base = self.config.directions_url.as_str();
        let url = self.build_url(base, &self.directions_params(origin, destination, waypoints))?;
        let body = self.fetch_body(base, url).await?;
        let routes = parse_directions(&body, waypoints)?;
        debug!(
            "directions returned {} routes for {} waypoints",
            routes.len(),
            waypoints.len()
        );
        Ok(routes)
    }

    async fn fetch_point(&self, address: &str) -> Result<GeoPoint, RoutingError> {
        let base = self.config.geocode_url.as_str();
        let url = self.build_url(base, &[("address", address.to_owned())])?;
        let body = self.fetch_body(base, url).await?;
        parse_geocode(&body, address)
    }

    /// Drive `future` to completion from synchronous code.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        // block_in_place requires a multi-threaded runtime; for
        // current_thread runtimes we fall back to our own stored runtime.
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Error text with any URL (and therefore the API key) removed.
fn strip_url(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    if let Some(url) = error.url() {
        message = message.replace(url.as_str(), "<url>");
    }
    message
}

impl RoutingOracle for HttpRoutingOracle {
    fn get_routes(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[WaypointToken],
    ) -> Result<Vec<RouteOption>, RoutingError> {
        self.block_on(self.fetch_routes(origin, destination, waypoints))
    }

    fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError> {
        self.block_on(self.fetch_point(address))
    }
}

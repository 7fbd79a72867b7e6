use thiserror::Error;

/// Errors from [`crate::oracle::RoutingOracle`] calls.
///
/// [`Network`](Self::Network) and [`Timeout`](Self::Timeout) mean the oracle
/// was unavailable. [`Http`](Self::Http) and [`Rejected`](Self::Rejected)
/// mean it answered but refused the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The request could not be delivered or the connection failed.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Request URL with credentials removed.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The request did not complete in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL with credentials removed.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL with credentials removed.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service reported a non-success status in its payload.
    #[error("routing service rejected the request: {status} {message}")]
    Rejected {
        /// Provider status code, e.g. `REQUEST_DENIED`.
        status: String,
        /// Provider error message, possibly empty.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// Geocoding found no match for the address.
    #[error("no geocoding result for {address:?}")]
    NoGeocodeResult {
        /// The address that was looked up.
        address: String,
    },
}

impl RoutingError {
    /// Whether the oracle could not be reached.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }

    /// Whether the oracle was reached but refused the request.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Rejected { .. })
    }
}

//! Chain-probe contract and the JSON-RPC HTTP probe.
//!
//! A probe is a single network round-trip used to measure an endpoint's
//! latency and observed chain height and to infer reachability. The
//! [`ChainProbe`] trait is the seam between the selection logic and the
//! per-chain wire details; [`JsonRpcProbe`] is the concrete implementation
//! for JSON-RPC chains.

pub mod probe;

pub use probe::JsonRpcProbe;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Raw outcome of one successful probe round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSample {
    /// Measured round-trip latency.
    pub latency: Duration,
    /// Chain height the endpoint reported.
    pub block_height: u64,
}

/// Errors that can occur while probing an endpoint.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// Probe exceeded its bounded sub-timeout.
    #[error("probe timed out")]
    Timeout,

    /// Endpoint answered with a non-2xx HTTP status.
    #[error("HTTP status {0}")]
    Http(u16),

    /// Network-level failure (connect, TLS, body). The message is
    /// sanitized so provider URLs and credentials never leak into logs.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be parsed into a chain height.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ProbeError {
    /// Maps a `reqwest` error into a sanitized [`ProbeError`].
    pub(crate) fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }
        let reason = if error.is_connect() {
            "connection refused or unreachable"
        } else if error.is_request() {
            "request failed"
        } else if error.is_body() || error.is_decode() {
            "response body error"
        } else if error.is_redirect() {
            "too many redirects"
        } else {
            "network error"
        };
        Self::Network(reason.to_string())
    }
}

/// A per-chain client capable of probing one endpoint URL.
///
/// Implementations measure one round-trip and report the latency together
/// with the chain height the endpoint claims to be at. A failed probe is a
/// [`ProbeError`]; there is no partial success.
#[async_trait]
pub trait ChainProbe: Send + Sync {
    /// Probes `url` once, returning latency and observed height.
    async fn ping(&self, url: &str) -> Result<ProbeSample, ProbeError>;
}

use std::time::Duration;

use crate::rpc::ProbeError;

/// A measured candidate URL with latency, height, and health metadata.
///
/// Endpoints are value snapshots: a benchmarking pass creates them fresh
/// and a pick consumes them. They are never persisted or mutated in place.
///
/// `checked == false` means no probe has run against this URL yet and the
/// selector must treat it optimistically (a candidate, not a liability).
/// `healthy` only has meaning when `checked` is `true`. An endpoint never
/// transitions from checked back to unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Candidate URL.
    pub url: String,
    /// Measured round-trip latency; zero when the probe failed or never ran.
    pub latency: Duration,
    /// Chain height the endpoint reported; zero when unknown.
    pub block_height: u64,
    /// Whether the last probe classified this endpoint as usable.
    pub healthy: bool,
    /// Whether any probe has run against this endpoint.
    pub checked: bool,
}

impl Endpoint {
    /// Creates a candidate with no probe data.
    #[must_use]
    pub fn unchecked(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            latency: Duration::ZERO,
            block_height: 0,
            healthy: false,
            checked: false,
        }
    }
}

/// Raw outcome of one benchmarking probe.
///
/// Converted 1:1 into an [`Endpoint`] with `checked: true` and
/// `healthy = error.is_none()`.
#[derive(Debug)]
pub struct BenchmarkResult {
    /// Probed URL.
    pub url: String,
    /// Measured latency; zero when the probe failed.
    pub latency: Duration,
    /// Reported chain height; zero when the probe failed.
    pub block_height: u64,
    /// Probe failure, if any.
    pub error: Option<ProbeError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchecked_endpoint_is_optimistic_candidate() {
        let endpoint = Endpoint::unchecked("https://rpc.example.com");

        assert_eq!(endpoint.url, "https://rpc.example.com");
        assert!(!endpoint.checked);
        assert!(!endpoint.healthy);
        assert_eq!(endpoint.latency, Duration::ZERO);
        assert_eq!(endpoint.block_height, 0);
    }
}

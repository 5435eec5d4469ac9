use std::time::Duration;

use crate::rpc::{ChainProbe, ProbeError};

use super::endpoint::Endpoint;

/// Maximum number of blocks an endpoint may trail the best known height
/// and still count as healthy. The boundary is inclusive: exactly this far
/// behind is healthy, one more is not.
pub const STALE_BLOCK_THRESHOLD: u64 = 3;

/// Bounded sub-timeout for one probe, derived from the caller's context so
/// a single slow endpoint cannot stall a benchmarking pass beyond a fixed
/// ceiling.
pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probes one endpoint and classifies it as healthy or not.
///
/// `best_height` is the reference chain tip for the staleness check; `0`
/// disables the check entirely. The returned endpoint always has
/// `checked: true`. A failed probe (network error, non-2xx status,
/// malformed response, timeout) yields an unhealthy endpoint together with
/// the probe error; callers may ignore the error and read `healthy` alone.
/// A successful probe that is more than [`STALE_BLOCK_THRESHOLD`] blocks
/// behind `best_height` is also unhealthy, with no error: stale data
/// deliberately overrides a successful network call.
pub async fn check_endpoint(
    probe: &dyn ChainProbe,
    url: &str,
    best_height: u64,
) -> (Endpoint, Option<ProbeError>) {
    let outcome = match tokio::time::timeout(PROBE_TIMEOUT, probe.ping(url)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(ProbeError::Timeout),
    };

    match outcome {
        Ok(sample) => {
            let blocks_behind = best_height.saturating_sub(sample.block_height);
            let healthy = best_height == 0 || blocks_behind <= STALE_BLOCK_THRESHOLD;

            if !healthy {
                tracing::debug!(
                    url = %url,
                    observed_height = sample.block_height,
                    best_height = best_height,
                    blocks_behind = blocks_behind,
                    "endpoint reachable but stale"
                );
            }

            (
                Endpoint {
                    url: url.to_string(),
                    latency: sample.latency,
                    block_height: sample.block_height,
                    healthy,
                    checked: true,
                },
                None,
            )
        }
        Err(error) => {
            tracing::debug!(url = %url, error = %error, "endpoint probe failed");

            (
                Endpoint {
                    url: url.to_string(),
                    latency: Duration::ZERO,
                    block_height: 0,
                    healthy: false,
                    checked: true,
                },
                Some(error),
            )
        }
    }
}

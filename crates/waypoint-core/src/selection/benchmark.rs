use std::time::Duration;

use futures::future::join_all;

use crate::rpc::{ChainProbe, ProbeError};

use super::{
    endpoint::{BenchmarkResult, Endpoint},
    health::PROBE_TIMEOUT,
};

/// Probes every candidate URL concurrently and collects one result per URL,
/// in input order.
///
/// Each probe is an independent future bounded by the same sub-timeout; the
/// call joins on all of them before returning, so the caller never observes
/// a partially filled result set and no probe is abandoned early. Dropping
/// the returned future cancels every in-flight probe together.
///
/// Fan-out is one future per URL with no upper bound; candidate lists come
/// from per-chain configuration and stay small (well under a few dozen).
pub async fn benchmark_endpoints(
    probe: &dyn ChainProbe,
    urls: &[String],
) -> Vec<BenchmarkResult> {
    let probes = urls.iter().map(|url| async move {
        let outcome = match tokio::time::timeout(PROBE_TIMEOUT, probe.ping(url)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(ProbeError::Timeout),
        };

        match outcome {
            Ok(sample) => BenchmarkResult {
                url: url.clone(),
                latency: sample.latency,
                block_height: sample.block_height,
                error: None,
            },
            Err(error) => {
                tracing::debug!(url = %url, error = %error, "benchmark probe failed");
                BenchmarkResult {
                    url: url.clone(),
                    latency: Duration::ZERO,
                    block_height: 0,
                    error: Some(error),
                }
            }
        }
    });

    join_all(probes).await
}

/// Converts benchmark results into endpoints, preserving order.
///
/// Every produced endpoint has `checked: true`; health is simply the
/// absence of a probe error. Staleness relative to the best height is the
/// picker's concern, not this conversion's.
#[must_use]
pub fn results_to_endpoints(results: Vec<BenchmarkResult>) -> Vec<Endpoint> {
    results
        .into_iter()
        .map(|result| Endpoint {
            url: result.url,
            latency: result.latency,
            block_height: result.block_height,
            healthy: result.error.is_none(),
            checked: true,
        })
        .collect()
}

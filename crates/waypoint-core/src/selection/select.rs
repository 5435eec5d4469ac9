use crate::rpc::ChainProbe;

use super::{
    benchmark::{benchmark_endpoints, results_to_endpoints},
    errors::SelectionError,
    picker::{Algorithm, Picker},
};

/// One-shot selection: benchmark the candidates, then pick one URL.
///
/// This is the convenience path for callers that need a single endpoint
/// right now and carry no selection state between calls. A single
/// candidate is returned as-is without probing it; the caller's request
/// will surface any problem with it soon enough, and skipping the probe
/// avoids paying a health-check round trip on the only option available.
///
/// `algorithm` accepts the same strings as [`Algorithm::parse`];
/// unrecognized values fall back to fastest. Because the picker is fresh
/// on every call, round-robin always starts from the first eligible
/// endpoint here; callers that want real rotation should hold a
/// long-lived [`Picker`].
///
/// # Errors
///
/// Returns [`SelectionError::NoHealthyEndpoint`] when `urls` is empty or
/// benchmarking leaves no usable candidate.
pub async fn select_best(
    probe: &dyn ChainProbe,
    urls: &[String],
    algorithm: &str,
) -> Result<String, SelectionError> {
    match urls {
        [] => Err(SelectionError::NoHealthyEndpoint),
        [only] => Ok(only.clone()),
        _ => {
            let results = benchmark_endpoints(probe, urls).await;
            let endpoints = results_to_endpoints(results);
            let picker = Picker::new(Algorithm::parse(algorithm));
            picker.pick(&endpoints)
        }
    }
}

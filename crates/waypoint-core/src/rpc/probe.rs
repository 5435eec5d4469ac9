use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ChainProbe, ProbeError, ProbeSample};

/// Default JSON-RPC method used to read the chain height.
const DEFAULT_HEIGHT_METHOD: &str = "eth_blockNumber";

/// Per-request timeout applied at the HTTP layer.
///
/// The selection layer applies its own bounded sub-timeout on top; this is
/// a backstop so a stalled connection cannot outlive the probe future.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON-RPC height probe over HTTP.
///
/// Sends a single height request (`eth_blockNumber` by default, overridable
/// for chains with a different method name), measures the round-trip
/// latency, and parses the hex-encoded height from the result.
pub struct JsonRpcProbe {
    client: reqwest::Client,
    height_method: String,
}

impl JsonRpcProbe {
    /// Creates a probe with the default height method.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new() -> Result<Self, ProbeError> {
        Self::with_height_method(DEFAULT_HEIGHT_METHOD)
    }

    /// Creates a probe that uses `method` to read the chain height.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn with_height_method(method: impl Into<String>) -> Result<Self, ProbeError> {
        let client = reqwest::ClientBuilder::new()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| ProbeError::from_reqwest(&e))?;

        Ok(Self { client, height_method: method.into() })
    }

    /// Parses a JSON-RPC height result (`"0x10d4f"` style) into a `u64`.
    fn parse_height(result: &Value) -> Result<u64, ProbeError> {
        let hex_str = result
            .as_str()
            .ok_or_else(|| ProbeError::InvalidResponse("height is not a string".to_string()))?;

        let digits = hex_str.trim_start_matches("0x");
        u64::from_str_radix(digits, 16)
            .map_err(|_| ProbeError::InvalidResponse(format!("malformed height {hex_str:?}")))
    }
}

#[async_trait]
impl ChainProbe for JsonRpcProbe {
    async fn ping(&self, url: &str) -> Result<ProbeSample, ProbeError> {
        let request = json!({
            "jsonrpc": "2.0",
            "method": self.height_method,
            "params": [],
            "id": 1,
        });

        let start = Instant::now();

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Http(status.as_u16()));
        }

        let body: Value =
            response.json().await.map_err(|e| ProbeError::from_reqwest(&e))?;

        let latency = start.elapsed();

        if let Some(error) = body.get("error") {
            return Err(ProbeError::InvalidResponse(format!("RPC error: {error}")));
        }

        let result = body
            .get("result")
            .ok_or_else(|| ProbeError::InvalidResponse("missing result field".to_string()))?;
        let block_height = Self::parse_height(result)?;

        tracing::trace!(url = %url, latency_ms = latency.as_millis() as u64, height = block_height, "probe succeeded");

        Ok(ProbeSample { latency, block_height })
    }
}

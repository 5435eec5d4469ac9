use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One historical transaction as reported by an indexer.
///
/// Fields are the common denominator across indexer APIs; anything a
/// specific backend reports beyond these is dropped at the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRecord {
    /// Transaction hash.
    pub hash: String,
    /// Sender address.
    pub from: String,
    /// Recipient address; `None` for contract creations.
    pub to: Option<String>,
    /// Transferred value in the chain's smallest unit, as a decimal string.
    pub value: String,
    /// Block the transaction was included in.
    pub block_height: u64,
    /// Unix timestamp of the containing block, when the indexer reports one.
    pub timestamp: Option<u64>,
}

/// Failure reported by a single history provider.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderError {
    /// The provider could not be reached or returned a server error.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The provider rejected our credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The provider's rate limit or quota was exhausted.
    #[error("quota exceeded")]
    QuotaExceeded,

    /// The provider answered with something we could not parse.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A source of historical transactions for one address.
///
/// Implementations wrap a concrete indexer API. `name` identifies the
/// provider in warnings and logs and should stay stable across runs.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Stable identifier used in warnings and logs.
    fn name(&self) -> &str;

    /// Fetches up to `limit` most recent transactions for `address`.
    ///
    /// An empty result is a valid answer, not an error: it means this
    /// provider knows of no transactions, which may simply reflect a
    /// coverage gap rather than an empty account.
    async fn fetch_history(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TxRecord>, ProviderError>;
}

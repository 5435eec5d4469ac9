//! Transaction history retrieval with provider fallback.
//!
//! Indexer APIs for historical transactions are far less interchangeable
//! than RPC endpoints: each has its own authentication, rate limits, and
//! coverage gaps. Instead of racing them, the [`FallbackRegistry`] tries
//! providers strictly in registration order and stops at the first one
//! that returns actual transactions, collecting a human-readable warning
//! for every provider it had to skip past.

pub mod provider;
pub mod registry;

pub use provider::{HistoryProvider, ProviderError, TxRecord};
pub use registry::{FallbackRegistry, HistoryResult, RegistryBuilder, RegistryError};

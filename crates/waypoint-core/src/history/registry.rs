use std::sync::Arc;

use thiserror::Error;

use super::provider::{HistoryProvider, TxRecord};

/// Outcome of a registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryResult {
    /// Transactions from the first provider that had any.
    pub transactions: Vec<TxRecord>,
    /// Name of the provider that answered; empty when every provider was
    /// tried and none had transactions.
    pub source: String,
    /// One entry per provider that failed or came back empty before the
    /// answering one, in trial order.
    pub warnings: Vec<String>,
}

/// Errors produced by the registry itself, as opposed to per-provider
/// failures which become warnings.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    /// The registry holds no providers at all.
    #[error("all history providers failed")]
    AllProvidersFailed,
}

/// Ordered collection of history providers tried sequentially.
///
/// Order is priority: the first registered provider is always tried
/// first. Trials are strictly sequential so a lower-priority provider is
/// never contacted (and never burns quota) unless every provider before
/// it failed or returned nothing.
pub struct FallbackRegistry {
    providers: Vec<Arc<dyn HistoryProvider>>,
}

impl FallbackRegistry {
    /// Creates a registry over the given providers, highest priority first.
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn HistoryProvider>>) -> Self {
        Self { providers }
    }

    /// Starts building a registry provider by provider.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder { providers: Vec::new() }
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry holds no providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Fetches history for `address`, trying providers in order.
    ///
    /// The first provider returning a non-empty transaction list wins and
    /// ends the pass; providers after it are never contacted. A provider
    /// error or an empty result both append a warning and move on to the
    /// next provider. When every provider was tried and none had
    /// transactions, the call still succeeds with an empty list, an empty
    /// `source`, and the full warning trail, so callers can distinguish
    /// "no data anywhere" from individual provider trouble.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AllProvidersFailed`] only when the
    /// registry holds no providers at all.
    pub async fn fetch_history(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<HistoryResult, RegistryError> {
        if self.providers.is_empty() {
            return Err(RegistryError::AllProvidersFailed);
        }

        let mut warnings = Vec::new();

        for provider in &self.providers {
            let name = provider.name();
            match provider.fetch_history(address, limit).await {
                Ok(transactions) if !transactions.is_empty() => {
                    tracing::debug!(
                        provider = %name,
                        count = transactions.len(),
                        skipped = warnings.len(),
                        "history provider answered"
                    );
                    return Ok(HistoryResult {
                        transactions,
                        source: name.to_string(),
                        warnings,
                    });
                }
                Ok(_) => {
                    tracing::debug!(provider = %name, "history provider returned no transactions");
                    warnings.push(format!("{name}: no transactions found"));
                }
                Err(error) => {
                    tracing::warn!(provider = %name, error = %error, "history provider failed");
                    warnings.push(format!("{name}: {error}"));
                }
            }
        }

        Ok(HistoryResult {
            transactions: Vec::new(),
            source: String::new(),
            warnings,
        })
    }
}

/// Builder for a [`FallbackRegistry`]; registration order is priority order.
pub struct RegistryBuilder {
    providers: Vec<Arc<dyn HistoryProvider>>,
}

impl RegistryBuilder {
    /// Appends a provider at the lowest priority so far.
    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn HistoryProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Appends a provider if present. Convenient for providers whose
    /// construction depends on optional configuration such as API keys.
    #[must_use]
    pub fn maybe_provider(mut self, provider: Option<Arc<dyn HistoryProvider>>) -> Self {
        if let Some(provider) = provider {
            self.providers.push(provider);
        }
        self
    }

    /// Finishes the build.
    #[must_use]
    pub fn build(self) -> FallbackRegistry {
        FallbackRegistry::new(self.providers)
    }
}

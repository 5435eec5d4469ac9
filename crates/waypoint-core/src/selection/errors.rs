use thiserror::Error;

/// Errors produced by endpoint selection.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
    /// Every candidate was filtered out: the list was empty, or each
    /// checked endpoint was unhealthy or too far behind the chain tip.
    #[error("no healthy endpoint available")]
    NoHealthyEndpoint,
}

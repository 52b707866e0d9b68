use thiserror::Error;

use crate::provider::ProviderError;

/// Failures of the search pipeline itself. Provider failures are wrapped with
/// the origin they belong to; one failing origin fails the whole multi-origin
/// request (there is no partial aggregation).
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no origins supplied")]
    NoOrigins,

    #[error("search for origin {origin} failed: {source}")]
    Origin {
        origin: String,
        #[source]
        source: ProviderError,
    },

    /// A single provider record that cannot be normalized (empty or
    /// unparseable segment list). Scoped to that record: the batch drops it
    /// and continues.
    #[error("malformed provider record {id}: {reason}")]
    MalformedProviderData { id: String, reason: String },

    /// A fan-out task panicked or was aborted out from under us.
    #[error("origin task failed: {0}")]
    TaskFailed(String),
}

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{OriginRequest, RawItinerary};

/// Classified failure of one per-origin provider call.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider knows no route from this origin for the requested dates.
    #[error("no route found from {origin}")]
    NoRoute { origin: String },

    /// The provider rejected the request itself (our query was malformed).
    #[error("provider rejected the request: {0}")]
    BadRequest(String),

    /// Network trouble, 5xx, or a timed-out call. Retryable in principle.
    #[error("transient provider failure: {0}")]
    Transient(String),
}

/// The external flight-search service, treated strictly as a black box that
/// turns one origin request into raw itinerary records.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    async fn search(&self, request: &OriginRequest) -> Result<Vec<RawItinerary>, ProviderError>;
}

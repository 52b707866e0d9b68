use std::sync::Arc;
use std::time::Duration;

use skymeet_core::error::SearchError;
use skymeet_core::filters::FilterParams;
use skymeet_core::models::{DestinationAggregate, Itinerary};
use skymeet_core::provider::{FlightProvider, ProviderError};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregate::aggregate;
use crate::fanout::{fan_out, MultiOriginQuery};
use crate::filter::{self, ResultItem};
use crate::normalize::normalize_batch;

/// One shaped result list plus the summary numbers computed over the
/// pre-filter collection.
#[derive(Debug, Clone)]
pub struct SearchOutcome<T> {
    pub rows: Vec<T>,
    /// Result count before filtering and pagination.
    pub total_count: usize,
    /// Rows actually returned after filtering and pagination.
    pub shown_count: usize,
    /// Cheapest result across the unfiltered set, if any.
    pub min_price: Option<f64>,
}

/// Pipeline output: flat itineraries for a single origin, aggregated rows for
/// a multi-origin search.
#[derive(Debug, Clone)]
pub enum SearchResults {
    Single(SearchOutcome<Itinerary>),
    Multi(SearchOutcome<DestinationAggregate>),
}

/// Fan-out / fan-in orchestration over the provider: one concurrent call per
/// origin, each with its own deadline, then a single synchronous aggregation
/// and shaping pass once every origin has settled.
///
/// All-or-nothing: the first origin failure aborts the remaining in-flight
/// calls and fails the whole request, because the common-destination
/// invariant is meaningless without a complete set of origin results.
pub struct SearchPipeline {
    provider: Arc<dyn FlightProvider>,
    per_origin_timeout: Duration,
}

impl SearchPipeline {
    pub fn new(provider: Arc<dyn FlightProvider>, per_origin_timeout: Duration) -> Self {
        Self {
            provider,
            per_origin_timeout,
        }
    }

    pub async fn run(
        &self,
        query: &MultiOriginQuery,
        params: &FilterParams,
    ) -> Result<SearchResults, SearchError> {
        let requests = fan_out(query);
        if requests.is_empty() {
            return Err(SearchError::NoOrigins);
        }

        let search_id = Uuid::new_v4();
        info!(%search_id, origins = requests.len(), "starting flight search");

        let mut tasks: JoinSet<(usize, Result<Vec<Itinerary>, SearchError>)> = JoinSet::new();
        for (idx, request) in requests.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let deadline = self.per_origin_timeout;
            let request = request.clone();
            tasks.spawn(async move {
                let outcome = match timeout(deadline, provider.search(&request)).await {
                    Ok(Ok(raws)) => Ok(normalize_batch(&raws, request.passengers)),
                    Ok(Err(source)) => Err(SearchError::Origin {
                        origin: request.origin.clone(),
                        source,
                    }),
                    Err(_) => Err(SearchError::Origin {
                        origin: request.origin.clone(),
                        source: ProviderError::Transient(format!(
                            "timed out after {}s",
                            deadline.as_secs()
                        )),
                    }),
                };
                (idx, outcome)
            });
        }

        // Fan-in barrier: collect every origin's result positionally; the
        // first failure cancels whatever is still in flight.
        let mut slots: Vec<Option<Vec<Itinerary>>> = vec![None; requests.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, Ok(itineraries))) => slots[idx] = Some(itineraries),
                Ok((_, Err(err))) => {
                    warn!(%search_id, error = %err, "origin search failed, aborting remaining calls");
                    tasks.abort_all();
                    return Err(err);
                }
                Err(join_err) => {
                    tasks.abort_all();
                    return Err(SearchError::TaskFailed(join_err.to_string()));
                }
            }
        }
        let per_origin: Vec<Vec<Itinerary>> =
            slots.into_iter().map(Option::unwrap_or_default).collect();

        if requests.len() == 1 {
            let itineraries = per_origin.into_iter().next().unwrap_or_default();
            info!(%search_id, results = itineraries.len(), "single-origin search settled");
            return Ok(SearchResults::Single(shape(itineraries, params)));
        }

        let origins: Vec<String> = requests.into_iter().map(|r| r.origin).collect();
        let rows = aggregate(&per_origin, &origins)?;
        info!(%search_id, destinations = rows.len(), "multi-origin aggregation settled");
        Ok(SearchResults::Multi(shape(rows, params)))
    }
}

fn shape<T: ResultItem + Clone>(items: Vec<T>, params: &FilterParams) -> SearchOutcome<T> {
    let total_count = items.len();
    let min_price = items
        .iter()
        .map(ResultItem::sort_price)
        .fold(None, |acc: Option<f64>, price| {
            Some(acc.map_or(price, |m| m.min(price)))
        });
    let rows = filter::apply(&items, params);
    SearchOutcome {
        shown_count: rows.len(),
        rows,
        total_count,
        min_price,
    }
}

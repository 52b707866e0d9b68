use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skymeet_core::filters::{FilterParams, SortKey};
use skymeet_core::models::{DestinationAggregate, Itinerary};
use skymeet_search::{MultiOriginQuery, SearchPipeline, SearchResults};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// One IATA/metro code or a comma-separated list.
    pub origin: String,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    /// Open-range variant, single origin only.
    pub departure_date_from: Option<NaiveDate>,
    pub departure_date_to: Option<NaiveDate>,
    /// Comma-separated per-origin counts, same length as `origin`.
    pub adults: Option<String>,
    pub children: Option<String>,
    pub infants: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub max_connections: Option<u32>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResultRows {
    Itineraries(Vec<Itinerary>),
    Aggregates(Vec<DestinationAggregate>),
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Result count before filtering and pagination.
    pub total_count: usize,
    pub shown_count: usize,
    pub min_price: Option<f64>,
    pub results: ResultRows,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/search
/// Single- or multi-origin flight search with shared dates per origin.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let (multi_query, params) = validate(&query, &state)?;

    let pipeline = SearchPipeline::new(state.provider.clone(), state.per_origin_timeout);
    let results = pipeline
        .run(&multi_query, &params)
        .await
        .map_err(AppError::from_search)?;

    let body = match results {
        SearchResults::Single(outcome) => SearchResponse {
            total_count: outcome.total_count,
            shown_count: outcome.shown_count,
            min_price: outcome.min_price,
            results: ResultRows::Itineraries(outcome.rows),
        },
        SearchResults::Multi(outcome) => SearchResponse {
            total_count: outcome.total_count,
            shown_count: outcome.shown_count,
            min_price: outcome.min_price,
            results: ResultRows::Aggregates(outcome.rows),
        },
    };
    Ok(Json(body))
}

// ============================================================================
// Validation
// ============================================================================
// The engine assumes already-sanitized parameters; everything syntactic is
// rejected here, before any provider call is issued.

fn validate(
    query: &SearchQuery,
    state: &AppState,
) -> Result<(MultiOriginQuery, FilterParams), AppError> {
    let origins = parse_origins(&query.origin, state.max_origins)?;

    let adults = parse_count_list("adults", query.adults.as_deref(), origins.len())?;
    let children = parse_count_list("children", query.children.as_deref(), origins.len())?;
    let infants = parse_count_list("infants", query.infants.as_deref(), origins.len())?;

    let (departure_from, departure_to, return_from, return_to) = match (
        query.departure_date,
        query.departure_date_from,
        query.departure_date_to,
    ) {
        (Some(date), None, None) => {
            (date, date, query.return_date, query.return_date)
        }
        (None, Some(from), Some(to)) => {
            if origins.len() > 1 {
                return Err(AppError::ValidationError(
                    "open departure ranges are supported for a single origin only".to_string(),
                ));
            }
            if query.return_date.is_some() {
                return Err(AppError::ValidationError(
                    "return_date cannot be combined with an open departure range".to_string(),
                ));
            }
            if to < from {
                return Err(AppError::ValidationError(
                    "departure_date_to precedes departure_date_from".to_string(),
                ));
            }
            (from, to, None, None)
        }
        _ => {
            return Err(AppError::ValidationError(
                "provide either departure_date or departure_date_from + departure_date_to"
                    .to_string(),
            ))
        }
    };

    if let Some(ret) = return_from {
        if ret < departure_from {
            return Err(AppError::ValidationError(
                "return_date precedes departure_date".to_string(),
            ));
        }
    }

    let page = query.page.unwrap_or(1);
    if page == 0 {
        return Err(AppError::ValidationError("page must be at least 1".to_string()));
    }
    let limit = query.limit.unwrap_or(state.defaults.page_size);
    if limit == 0 || limit > 100 {
        return Err(AppError::ValidationError(
            "limit must be between 1 and 100".to_string(),
        ));
    }
    if let (Some(from), Some(to)) = (query.price_from, query.price_to) {
        if to < from {
            return Err(AppError::ValidationError(
                "price_to precedes price_from".to_string(),
            ));
        }
    }

    let params = FilterParams {
        sort: query
            .sort
            .as_deref()
            .map_or(state.defaults.sort, SortKey::parse),
        page,
        limit,
        max_connections: query.max_connections,
        price_from: query.price_from,
        price_to: query.price_to,
    };

    let multi_query = MultiOriginQuery {
        origins,
        departure_from,
        departure_to,
        return_from,
        return_to,
        adults,
        children,
        infants,
    };
    Ok((multi_query, params))
}

fn parse_origins(raw: &str, max_origins: usize) -> Result<Vec<String>, AppError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|code| code.trim().to_ascii_uppercase())
        .collect();
    if origins.iter().any(String::is_empty) {
        return Err(AppError::ValidationError(
            "origin list contains an empty entry".to_string(),
        ));
    }
    if origins.len() > max_origins {
        return Err(AppError::ValidationError(format!(
            "too many origins: {} (limit {})",
            origins.len(),
            max_origins
        )));
    }
    for code in &origins {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::ValidationError(format!(
                "invalid origin code {code:?}"
            )));
        }
    }
    Ok(origins)
}

/// Largest accepted per-slot passenger count, matching the provider's own
/// booking limit.
const MAX_PASSENGERS_PER_SLOT: u32 = 9;

/// Parse an optional comma-separated count list. When present its length must
/// match the origin list exactly; the fan-out layer re-defends with per-slot
/// defaults, but a mismatch here is a caller mistake worth rejecting.
fn parse_count_list(
    name: &str,
    raw: Option<&str>,
    origin_count: usize,
) -> Result<Vec<u32>, AppError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let counts: Vec<u32> = raw
        .split(',')
        .map(|part| {
            part.trim().parse::<u32>().map_err(|_| {
                AppError::ValidationError(format!("invalid {name} value {part:?}"))
            })
        })
        .collect::<Result<_, _>>()?;
    if let Some(over) = counts.iter().find(|c| **c > MAX_PASSENGERS_PER_SLOT) {
        return Err(AppError::ValidationError(format!(
            "{name} value {over} exceeds the per-origin limit of {MAX_PASSENGERS_PER_SLOT}"
        )));
    }
    if counts.len() != origin_count {
        return Err(AppError::ValidationError(format!(
            "{name} list has {} entries for {} origins",
            counts.len(),
            origin_count
        )));
    }
    Ok(counts)
}

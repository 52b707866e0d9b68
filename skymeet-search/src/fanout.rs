use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skymeet_core::models::{OriginRequest, PassengerCounts};

/// A validated multi-origin search, as handed over by the API layer: origins
/// split from their comma list, dates parsed, passenger lists (if given)
/// already checked for length against the origin list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiOriginQuery {
    pub origins: Vec<String>,
    pub departure_from: NaiveDate,
    pub departure_to: NaiveDate,
    pub return_from: Option<NaiveDate>,
    pub return_to: Option<NaiveDate>,
    /// Per-origin counts, parallel to `origins`. Empty means "default every
    /// slot". May be shorter than `origins` only if upstream validation was
    /// bypassed; missing slots fall back to 1 adult / 0 children / 0 infants.
    #[serde(default)]
    pub adults: Vec<u32>,
    #[serde(default)]
    pub children: Vec<u32>,
    #[serde(default)]
    pub infants: Vec<u32>,
}

/// Expand one multi-origin query into independent per-origin requests,
/// preserving origin order. Pure and infallible: malformed shapes are
/// rejected upstream, and short passenger lists only cause per-slot defaults.
pub fn fan_out(query: &MultiOriginQuery) -> Vec<OriginRequest> {
    query
        .origins
        .iter()
        .enumerate()
        .map(|(i, origin)| OriginRequest {
            origin: origin.clone(),
            departure_from: query.departure_from,
            departure_to: query.departure_to,
            return_from: query.return_from,
            return_to: query.return_to,
            passengers: PassengerCounts {
                adults: query.adults.get(i).copied().unwrap_or(1),
                children: query.children.get(i).copied().unwrap_or(0),
                infants: query.infants.get(i).copied().unwrap_or(0),
            },
        })
        .collect()
}

use std::cmp::Ordering;

use skymeet_core::filters::{FilterParams, SortKey};
use skymeet_core::models::{DestinationAggregate, Itinerary};

/// The per-item surface the filter engine needs, so it can shape a flat
/// single-origin itinerary list and a multi-origin aggregate list through the
/// same code path.
pub trait ResultItem {
    fn sort_price(&self) -> f64;
    fn sort_distance(&self) -> f64;
    fn max_connections(&self) -> usize;
    /// (cheapest, priciest) price level the user would actually pay per leg.
    fn price_spread(&self) -> (f64, f64);
}

impl ResultItem for Itinerary {
    fn sort_price(&self) -> f64 {
        self.price
    }

    fn sort_distance(&self) -> f64 {
        self.distance
    }

    fn max_connections(&self) -> usize {
        Itinerary::max_connections(self)
    }

    fn price_spread(&self) -> (f64, f64) {
        (self.price, self.price)
    }
}

impl ResultItem for DestinationAggregate {
    fn sort_price(&self) -> f64 {
        self.total_price
    }

    fn sort_distance(&self) -> f64 {
        self.total_distance
    }

    fn max_connections(&self) -> usize {
        DestinationAggregate::max_connections(self)
    }

    fn price_spread(&self) -> (f64, f64) {
        DestinationAggregate::price_spread(self)
    }
}

/// Filter, sort and paginate one result list. The input is left untouched so
/// callers can keep using the pre-filter collection (e.g. for summary
/// statistics computed before the view narrows).
pub fn apply<T: ResultItem + Clone>(items: &[T], params: &FilterParams) -> Vec<T> {
    let mut shaped: Vec<T> = items
        .iter()
        .filter(|item| passes_connections(*item, params))
        .filter(|item| passes_price_range(*item, params))
        .cloned()
        .collect();
    sort(&mut shaped, params.sort);
    paginate(shaped, params.page, params.limit)
}

fn passes_connections<T: ResultItem>(item: &T, params: &FilterParams) -> bool {
    match params.max_connections {
        Some(ceiling) => item.max_connections() <= ceiling as usize,
        None => true,
    }
}

/// For aggregates the *entire* price spread must sit inside the requested
/// range: users filter by the operative per-leg price level, not the sum, so
/// one contributing leg outside the bounds rejects the whole row.
fn passes_price_range<T: ResultItem>(item: &T, params: &FilterParams) -> bool {
    let (min, max) = item.price_spread();
    if let Some(from) = params.price_from {
        if min < from {
            return false;
        }
    }
    if let Some(to) = params.price_to {
        if max > to {
            return false;
        }
    }
    true
}

/// Stable ascending sort; ties keep their pre-sort relative order so that
/// pagination stays consistent across identical requests.
pub fn sort<T: ResultItem>(items: &mut [T], key: SortKey) {
    items.sort_by(|a, b| {
        let (a, b) = match key {
            SortKey::Price => (a.sort_price(), b.sort_price()),
            SortKey::Distance => (a.sort_distance(), b.sort_distance()),
        };
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    });
}

/// 1-based page slicing. Out-of-range pages are an empty slice, not an error.
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32) -> Vec<T> {
    let page = page.max(1) as usize;
    let limit = limit as usize;
    items
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect()
}

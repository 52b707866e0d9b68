use indexmap::IndexMap;
use skymeet_core::error::SearchError;
use skymeet_core::models::{DestinationAggregate, Itinerary};

/// Merge per-origin itinerary lists into one row per destination reachable
/// from *every* requested origin.
///
/// Grouping is by destination city name, in first-seen order, which keeps
/// bucket iteration (and therefore pagination) reproducible for a given
/// input. The city/country codes carried on each row come from the first
/// contributing itinerary.
pub fn aggregate(
    per_origin: &[Vec<Itinerary>],
    origins: &[String],
) -> Result<Vec<DestinationAggregate>, SearchError> {
    // A zero-origin request would make the common-destination test vacuously
    // true for every bucket; reject instead of returning everything.
    if origins.is_empty() {
        return Err(SearchError::NoOrigins);
    }

    let mut buckets: IndexMap<&str, Vec<&Itinerary>> = IndexMap::new();
    for itinerary in per_origin.iter().flatten() {
        buckets
            .entry(itinerary.city_to.as_str())
            .or_default()
            .push(itinerary);
    }

    let mut aggregates = Vec::new();
    for (destination, bucket) in buckets {
        if !is_common_destination(&bucket, origins) {
            continue;
        }

        // Defensive re-filter: drop anything whose destination drifted from
        // the bucket key. Impossible by construction, hence the assert.
        let contributing: Vec<&Itinerary> = bucket
            .into_iter()
            .filter(|it| it.city_to == destination)
            .collect();
        debug_assert!(!contributing.is_empty(), "bucket emptied by re-filter");
        let Some(first) = contributing.first() else {
            continue;
        };

        let total_price: f64 = contributing.iter().map(|it| it.price).sum();
        // Price from the provider already covers the full group per origin;
        // distance does not, so it is weighted by that origin's headcount.
        let total_distance: f64 = contributing
            .iter()
            .map(|it| f64::from(it.passengers.total()) * it.distance)
            .sum();

        aggregates.push(DestinationAggregate {
            destination: destination.to_string(),
            city_code_to: first.city_code_to.clone(),
            country_to: first.country_to.clone(),
            country_code_to: first.country_code_to.clone(),
            itineraries: contributing.into_iter().cloned().collect(),
            total_price,
            total_distance,
        });
    }

    Ok(aggregates)
}

/// True if every requested origin contributed at least one itinerary to the
/// bucket. An origin matches on either the city-level or the airport-level
/// code: a metro-area request like "LON" must be satisfied by an itinerary
/// departing "LGW", whose provider record carries cityCodeFrom = "LON".
fn is_common_destination(bucket: &[&Itinerary], origins: &[String]) -> bool {
    origins.iter().all(|origin| {
        bucket
            .iter()
            .any(|it| it.city_code_from == *origin || it.fly_from == *origin)
    })
}

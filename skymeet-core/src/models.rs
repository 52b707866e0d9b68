use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request-side models
// ============================================================================

/// Passenger mix for one origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerCounts {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

impl PassengerCounts {
    /// Saturating on purpose: the API layer bounds each count, but a caller
    /// constructing counts directly must not be able to overflow the
    /// passenger-weighted sums downstream.
    pub fn total(&self) -> u32 {
        self.adults
            .saturating_add(self.children)
            .saturating_add(self.infants)
    }
}

impl Default for PassengerCounts {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

/// One resolved single-origin provider query. Built once by the fan-out step
/// and never modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginRequest {
    /// IATA airport code or metropolitan-area code (e.g. "MAD", "LON").
    pub origin: String,
    pub departure_from: NaiveDate,
    pub departure_to: NaiveDate,
    pub return_from: Option<NaiveDate>,
    pub return_to: Option<NaiveDate>,
    pub passengers: PassengerCounts,
}

// ============================================================================
// Raw provider wire shapes
// ============================================================================
// The provider's JSON is loosely shaped (camelCase codes next to snake_case
// timestamps, booleans encoded as 0/1). These structs absorb that at the
// deserialization boundary; nothing downstream of the normalizer sees them.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSegment {
    #[serde(rename = "flyFrom")]
    pub fly_from: String,
    #[serde(rename = "flyTo")]
    pub fly_to: String,
    #[serde(rename = "cityFrom")]
    pub city_from: String,
    #[serde(rename = "cityTo")]
    pub city_to: String,
    #[serde(rename = "cityCodeFrom")]
    pub city_code_from: String,
    #[serde(rename = "cityCodeTo")]
    pub city_code_to: String,
    /// Zone-suffixed but semantically local wall-clock time.
    pub local_departure: String,
    pub local_arrival: String,
    pub utc_departure: String,
    pub utc_arrival: String,
    /// 0 for outbound legs, 1 for inbound legs.
    #[serde(rename = "return")]
    pub is_return: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCountry {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItinerary {
    pub id: String,
    #[serde(rename = "flyFrom")]
    pub fly_from: String,
    #[serde(rename = "flyTo")]
    pub fly_to: String,
    #[serde(rename = "cityFrom")]
    pub city_from: String,
    #[serde(rename = "cityTo")]
    pub city_to: String,
    #[serde(rename = "cityCodeFrom")]
    pub city_code_from: String,
    #[serde(rename = "cityCodeTo")]
    pub city_code_to: String,
    #[serde(rename = "countryTo", default)]
    pub country_to: RawCountry,
    pub price: f64,
    pub distance: f64,
    pub route: Vec<RawSegment>,
    #[serde(default)]
    pub deep_link: String,
}

// ============================================================================
// Canonical models
// ============================================================================

/// Derived view of one direction (outbound or inbound) of an itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Intermediate stop city names, in flight order. The provider caps a
    /// direction at 3 legs, so this never exceeds 2 entries.
    pub connections: Vec<String>,
    /// First departure, local wall-clock.
    pub departure: NaiveDateTime,
    /// Last arrival, local wall-clock.
    pub arrival: NaiveDateTime,
    /// Total elapsed time of the direction, from UTC instants.
    pub duration_secs: i64,
}

/// One priced, bookable offer from a single origin, produced by the
/// normalizer. Immutable after construction; downstream steps build new
/// aggregate structures instead of editing itineraries in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: String,
    pub fly_from: String,
    pub fly_to: String,
    pub city_from: String,
    pub city_to: String,
    pub city_code_from: String,
    pub city_code_to: String,
    pub country_to: String,
    pub country_code_to: String,
    /// Total price for the full passenger mix of the originating request.
    pub price: f64,
    pub distance: f64,
    /// Passenger mix this itinerary was priced for. Carried so aggregation
    /// can weight distance without reaching back to the request.
    pub passengers: PassengerCounts,
    pub outbound: RouteSummary,
    /// Absent for one-way itineraries.
    pub inbound: Option<RouteSummary>,
    pub deep_link: String,
}

impl Itinerary {
    /// Worst connection count across both directions.
    pub fn max_connections(&self) -> usize {
        let inbound = self.inbound.as_ref().map_or(0, |r| r.connections.len());
        self.outbound.connections.len().max(inbound)
    }
}

/// One row of a multi-origin answer: a destination reachable from every
/// requested origin, with the contributing itinerary per origin and the
/// combined cost of getting everyone there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationAggregate {
    /// Destination city name (the grouping key).
    pub destination: String,
    pub city_code_to: String,
    pub country_to: String,
    pub country_code_to: String,
    pub itineraries: Vec<Itinerary>,
    /// Plain sum of contributing prices; provider prices already cover the
    /// full passenger group per origin.
    pub total_price: f64,
    /// Sum of per-origin distance weighted by that origin's passenger count.
    pub total_distance: f64,
}

impl DestinationAggregate {
    pub fn max_connections(&self) -> usize {
        self.itineraries
            .iter()
            .map(Itinerary::max_connections)
            .max()
            .unwrap_or(0)
    }

    /// Cheapest and priciest contributing leg.
    pub fn price_spread(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for it in &self.itineraries {
            min = min.min(it.price);
            max = max.max(it.price);
        }
        (min, max)
    }
}

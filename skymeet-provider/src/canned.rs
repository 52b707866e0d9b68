use std::collections::HashMap;

use async_trait::async_trait;
use skymeet_core::models::{OriginRequest, RawCountry, RawItinerary, RawSegment};
use skymeet_core::provider::{FlightProvider, ProviderError};

/// In-memory provider with canned per-origin result sets. Backs the API
/// integration tests and local runs without an API key.
#[derive(Default)]
pub struct CannedProvider {
    responses: HashMap<String, Vec<RawItinerary>>,
    failures: HashMap<String, ProviderError>,
}

impl CannedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, origin: &str, records: Vec<RawItinerary>) -> Self {
        self.responses.insert(origin.to_string(), records);
        self
    }

    pub fn failing(mut self, origin: &str, err: ProviderError) -> Self {
        self.failures.insert(origin.to_string(), err);
        self
    }

    /// A small demo dataset: three origins that all reach Ibiza, two of which
    /// also reach Lisbon.
    pub fn sample() -> Self {
        Self::new()
            .with(
                "MAD",
                vec![
                    fixture("MAD", "MAD", "Madrid", "IBZ", "Ibiza", "ES", "Spain", 84.0, 458.0),
                    fixture("MAD", "MAD", "Madrid", "LIS", "Lisbon", "PT", "Portugal", 97.0, 503.0),
                ],
            )
            .with(
                "BOD",
                vec![
                    fixture("BOD", "BOD", "Bordeaux", "IBZ", "Ibiza", "ES", "Spain", 112.0, 702.0),
                    fixture("BOD", "BOD", "Bordeaux", "LIS", "Lisbon", "PT", "Portugal", 88.0, 891.0),
                ],
            )
            .with(
                "BRU",
                vec![fixture(
                    "BRU", "BRU", "Brussels", "IBZ", "Ibiza", "ES", "Spain", 131.0, 1384.0,
                )],
            )
    }
}

#[async_trait]
impl FlightProvider for CannedProvider {
    async fn search(&self, request: &OriginRequest) -> Result<Vec<RawItinerary>, ProviderError> {
        if let Some(err) = self.failures.get(&request.origin) {
            return Err(err.clone());
        }
        Ok(self
            .responses
            .get(&request.origin)
            .cloned()
            .unwrap_or_default())
    }
}

/// Build one direct round-trip raw record in the provider's wire shape.
#[allow(clippy::too_many_arguments)]
pub fn fixture(
    fly_from: &str,
    city_code_from: &str,
    city_from: &str,
    fly_to: &str,
    city_to: &str,
    country_code: &str,
    country_name: &str,
    price: f64,
    distance: f64,
) -> RawItinerary {
    let leg = |from: &str,
               from_city: &str,
               to: &str,
               to_city: &str,
               dep: &str,
               arr: &str,
               ret: u8| RawSegment {
        fly_from: from.to_string(),
        fly_to: to.to_string(),
        city_from: from_city.to_string(),
        city_to: to_city.to_string(),
        city_code_from: from.to_string(),
        city_code_to: to.to_string(),
        local_departure: format!("{dep}.000Z"),
        local_arrival: format!("{arr}.000Z"),
        utc_departure: format!("{dep}.000Z"),
        utc_arrival: format!("{arr}.000Z"),
        is_return: ret,
    };

    RawItinerary {
        id: format!("{fly_from}-{fly_to}-{price}"),
        fly_from: fly_from.to_string(),
        fly_to: fly_to.to_string(),
        city_from: city_from.to_string(),
        city_to: city_to.to_string(),
        city_code_from: city_code_from.to_string(),
        city_code_to: fly_to.to_string(),
        country_to: RawCountry {
            code: country_code.to_string(),
            name: country_name.to_string(),
        },
        price,
        distance,
        route: vec![
            leg(
                fly_from,
                city_from,
                fly_to,
                city_to,
                "2026-06-05T07:00:00",
                "2026-06-05T09:00:00",
                0,
            ),
            leg(
                fly_to,
                city_to,
                fly_from,
                city_from,
                "2026-06-08T18:00:00",
                "2026-06-08T20:00:00",
                1,
            ),
        ],
        deep_link: format!("https://example.test/book/{fly_from}-{fly_to}"),
    }
}

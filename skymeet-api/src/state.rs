use std::sync::Arc;
use std::time::Duration;

use skymeet_core::filters::FilterDefaults;
use skymeet_core::provider::FlightProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn FlightProvider>,
    pub defaults: FilterDefaults,
    pub per_origin_timeout: Duration,
    pub max_origins: usize,
}

impl AppState {
    pub fn new(provider: Arc<dyn FlightProvider>) -> Self {
        Self {
            provider,
            defaults: FilterDefaults::default(),
            per_origin_timeout: Duration::from_secs(15),
            max_origins: 64,
        }
    }
}

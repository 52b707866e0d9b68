use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use skymeet_core::models::{OriginRequest, RawItinerary};
use skymeet_core::provider::{FlightProvider, ProviderError};
use tracing::debug;

/// The provider wraps the record list in a data envelope.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    data: Vec<RawItinerary>,
}

/// HTTP client for the external flight-search API.
pub struct HttpProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl FlightProvider for HttpProvider {
    async fn search(&self, request: &OriginRequest) -> Result<Vec<RawItinerary>, ProviderError> {
        let url = format!("{}/v2/search", self.base_url);
        let query = build_query(request);
        debug!(origin = %request.origin, %url, "calling provider search");

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .query(&query)
            .send()
            .await
            .map_err(|err| ProviderError::Transient(err.to_string()))?;

        let status = response.status();
        if let Some(err) = classify_status(status, &request.origin) {
            return Err(err);
        }

        let envelope: SearchEnvelope = response
            .json()
            .await
            .map_err(|err| ProviderError::Transient(format!("undecodable response body: {err}")))?;
        Ok(envelope.data)
    }
}

/// The search API takes dd/mm/yyyy dates and flat passenger counts per call.
fn build_query(request: &OriginRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("fly_from", request.origin.clone()),
        ("date_from", request.departure_from.format("%d/%m/%Y").to_string()),
        ("date_to", request.departure_to.format("%d/%m/%Y").to_string()),
        ("adults", request.passengers.adults.to_string()),
        ("children", request.passengers.children.to_string()),
        ("infants", request.passengers.infants.to_string()),
        ("curr", "EUR".to_string()),
    ];
    if let Some(from) = request.return_from {
        query.push(("return_from", from.format("%d/%m/%Y").to_string()));
    }
    if let Some(to) = request.return_to {
        query.push(("return_to", to.format("%d/%m/%Y").to_string()));
    }
    query
}

fn classify_status(status: StatusCode, origin: &str) -> Option<ProviderError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::NOT_FOUND => ProviderError::NoRoute {
            origin: origin.to_string(),
        },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::BadRequest(format!("provider returned {status}"))
        }
        _ => ProviderError::Transient(format!("provider returned {status}")),
    })
}

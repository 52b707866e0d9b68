use axum::{extract::Path, Json};
use serde::Serialize;
use skymeet_core::airports;

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct AirportResponse {
    pub code: String,
    pub name: String,
    pub country: Option<String>,
    /// Member airports, for metro-area codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airports: Option<Vec<String>>,
}

/// GET /v1/airports/{code}
/// Resolve an airport or metro-area code to its display name.
pub async fn get_airport(Path(code): Path<String>) -> Result<Json<AirportResponse>, AppError> {
    let info = airports::lookup(&code)
        .ok_or_else(|| AppError::NotFoundError(format!("unknown airport code {code:?}")))?;
    let members = airports::metro_members(&code)
        .map(|codes| codes.iter().map(|c| c.to_string()).collect());
    Ok(Json(AirportResponse {
        code: info.code,
        name: info.name,
        country: info.country,
        airports: members,
    }))
}

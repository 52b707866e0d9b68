use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use skymeet_api::{app, AppState};
use skymeet_core::provider::ProviderError;
use skymeet_provider::CannedProvider;
use tower::ServiceExt;

fn sample_app() -> Router {
    app(AppState::new(Arc::new(CannedProvider::sample())))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_multi_origin_search_returns_common_destinations() {
    // Sample data: MAD and BOD reach Ibiza and Lisbon, BRU only Ibiza.
    let (status, body) = get(
        sample_app(),
        "/v1/search?origin=MAD,BOD,BRU&departure_date=2026-06-05&return_date=2026-06-08",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["shown_count"], 1);

    let row = &body["results"][0];
    assert_eq!(row["destination"], "Ibiza");
    assert_eq!(row["itineraries"].as_array().unwrap().len(), 3);
    assert_eq!(row["total_price"], 84.0 + 112.0 + 131.0);
}

#[tokio::test]
async fn test_single_origin_search_returns_flat_itineraries_sorted_by_price() {
    let (status, body) = get(
        sample_app(),
        "/v1/search?origin=MAD&departure_date=2026-06-05",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["min_price"], 84.0);

    let rows = body["results"].as_array().unwrap();
    assert_eq!(rows[0]["city_to"], "Ibiza"); // 84.0 before 97.0
    assert_eq!(rows[1]["city_to"], "Lisbon");
}

#[tokio::test]
async fn test_filters_narrow_but_totals_see_prefilter_set() {
    let (status, body) = get(
        sample_app(),
        "/v1/search?origin=MAD&departure_date=2026-06-05&price_to=90",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["shown_count"], 1);
    assert_eq!(body["results"][0]["city_to"], "Ibiza");
}

#[tokio::test]
async fn test_missing_dates_are_rejected() {
    let (status, body) = get(sample_app(), "/v1/search?origin=MAD,BOD").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("departure_date"));
}

#[tokio::test]
async fn test_passenger_list_mismatch_is_rejected() {
    let (status, _) = get(
        sample_app(),
        "/v1/search?origin=MAD,BOD&departure_date=2026-06-05&adults=2",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failing_origin_fails_the_whole_request() {
    let provider = CannedProvider::sample().failing(
        "BOD",
        ProviderError::NoRoute {
            origin: "BOD".to_string(),
        },
    );
    let app = app(AppState::new(Arc::new(provider)));

    let (status, body) = get(
        app,
        "/v1/search?origin=MAD,BOD&departure_date=2026-06-05",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("BOD"));
}

#[tokio::test]
async fn test_no_common_destination_is_empty_success() {
    let provider = CannedProvider::sample().with("VIE", vec![]);
    let app = app(AppState::new(Arc::new(provider)));

    let (status, body) = get(
        app,
        "/v1/search?origin=MAD,VIE&departure_date=2026-06-05",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 0);
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_airport_lookup() {
    let (status, body) = get(sample_app(), "/v1/airports/LON").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "London");
    assert!(body["airports"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c.as_str() == Some("LGW")));

    let (status, _) = get(sample_app(), "/v1/airports/ZZZ").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(sample_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

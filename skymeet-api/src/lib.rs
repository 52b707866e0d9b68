use axum::{
    http::Method,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod airports;
pub mod config;
pub mod error;
pub mod health;
pub mod search;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/health", get(health::health))
        .route("/v1/search", get(search::search))
        .route("/v1/airports/{code}", get(airports::get_airport))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

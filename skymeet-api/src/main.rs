use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use skymeet_api::{app, config::Config, AppState};
use skymeet_core::filters::{FilterDefaults, SortKey};
use skymeet_core::provider::FlightProvider;
use skymeet_provider::{CannedProvider, HttpProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skymeet_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting skymeet API on port {}", config.server.port);

    let per_origin_timeout = Duration::from_secs(config.provider.timeout_seconds);
    let provider: Arc<dyn FlightProvider> = if config.provider.api_key.is_empty() {
        tracing::warn!("No provider API key configured, serving canned sample data");
        Arc::new(CannedProvider::sample())
    } else {
        Arc::new(
            HttpProvider::new(&config.provider.base_url, &config.provider.api_key, per_origin_timeout)
                .expect("Failed to build provider client"),
        )
    };

    let app_state = AppState {
        provider,
        defaults: FilterDefaults {
            sort: SortKey::Price,
            page_size: config.search.page_size,
        },
        per_origin_timeout,
        max_origins: config.search.max_origins,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

//! # Sales Dashboard
//!
//! Serves order metrics for the sales and marketing dashboard: headline
//! numbers with previous-period and year-over-year comparisons, a daily TPV
//! series, channel and campaign breakdowns, and the filtered detail rows.
//!
//! ## Architecture
//!
//! - Axum handles HTTP routing and request/response lifecycle
//! - The order sheet is fetched as CSV with reqwest and cached for a TTL
//! - Every request recomputes its report from the cached snapshot

use tracing::info;

use sales_dashboard::cache::SnapshotCache;
use sales_dashboard::config::AppConfig;
use sales_dashboard::source::HttpCsvSource;
use sales_dashboard::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_dashboard=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting sales dashboard");

    let config = AppConfig::from_env()?;
    info!(
        "Order sheet {} cached for {}s, tabs {:?}",
        config.source_url,
        config.cache_ttl.as_secs(),
        config.tabs
    );

    let source = HttpCsvSource::new(config.source_url.clone());
    let cache = SnapshotCache::new(Box::new(source), config.cache_ttl);
    let app = create_app(AppState::new(cache, &config.tabs));

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

// Main entry point - Dependency injection, refresh task and server setup
use anyhow::Context;
use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use station_dashboard::application::dashboard_service::DashboardService;
use station_dashboard::application::history_cache::HistoryCache;
use station_dashboard::application::refresh_loop::RefreshLoop;
use station_dashboard::infrastructure::config::load_station_config;
use station_dashboard::infrastructure::http_station::HttpStationClient;
use station_dashboard::presentation::app_state::AppState;
use station_dashboard::presentation::handlers::{chart_group, health_check, latest_dashboard};
use station_dashboard::presentation::publisher::DashboardPublisher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_station_config()?;

    // Station client (infrastructure layer)
    let station = Arc::new(HttpStationClient::new(&config.station)?);

    // Cache and orchestrator (application layer)
    let history = Arc::new(HistoryCache::new(
        station.clone(),
        config.refresh.history_max_age(),
    ));
    let service = DashboardService::new(
        station,
        history,
        config.refresh.live_capacity,
        config.refresh.history_window_hours,
    );

    // The refresh task publishes each bundle; handlers read the latest one
    let (publisher, dashboards) = DashboardPublisher::channel();
    let refresh = RefreshLoop::new(service, Arc::new(publisher), config.refresh.interval());
    tokio::spawn(refresh.run());

    let state = Arc::new(AppState { dashboards });

    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(latest_dashboard))
        .route("/dashboard/charts/:group", get(chart_group))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!(
        "Starting station-dashboard on {} (station {})",
        addr,
        config.station.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

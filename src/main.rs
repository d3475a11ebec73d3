//! event-board server entry point.
//!
//! Loads the board once, then serves the HTML board and the JSON API.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use event_board::api;
use event_board::app_state::AppState;
use event_board::config::{BoardConfig, LogFormat};
use event_board::domain::ActivityBus;
use event_board::domain::activity_bus::spawn_activity_logger;
use event_board::service::BoardService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = BoardConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(
        addr = %config.listen_addr,
        feed = config.events_feed_url.as_deref().unwrap_or("fixture"),
        cities = config.cities.len(),
        "starting event-board"
    );

    // Build domain and service layers
    let activity = ActivityBus::new(config.activity_bus_capacity);
    let _logger = spawn_activity_logger(&activity);
    let board_service = Arc::new(BoardService::from_config(&config, activity)?);

    // Initial load
    let summary = board_service.refresh_all().await;
    tracing::info!(
        source = summary.events.source.as_str(),
        events = summary.events.count,
        weather_unavailable = summary.weather.unavailable,
        "initial load complete"
    );

    // Build router
    let app = api::build_app(AppState { board_service }, config.request_timeout);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

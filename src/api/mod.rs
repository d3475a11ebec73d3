//! HTTP layer: HTML board routes, the JSON API, DTOs, and router composition.
//!
//! JSON endpoints are mounted under `/api/v1`; the board pages and
//! `/health` live at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, StatusCode, header};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// `Cache-Control` value set on every response.
pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Builds the route tree without middleware.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::board::routes())
        .merge(handlers::system::routes())
        .merge(openapi::routes())
}

/// Builds the complete application with middleware and state.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    build_router()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(NO_CACHE),
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

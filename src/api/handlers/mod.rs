//! Endpoint handlers organized by resource.

pub mod board;
pub mod events;
pub mod system;
pub mod weather;

use axum::Router;

use crate::app_state::AppState;

/// Composes all JSON resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(events::routes())
        .merge(weather::routes())
}

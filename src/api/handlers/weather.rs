//! Weather handler.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::WeatherResponse;
use crate::app_state::AppState;

/// `GET /weather` — the current weather board.
#[utoipa::path(
    get,
    path = "/api/v1/weather",
    tag = "Weather",
    summary = "Current weather",
    description = "One snapshot per configured city. Cities whose fetch failed are marked unavailable.",
    responses(
        (status = 200, description = "Weather board", body = WeatherResponse),
    )
)]
pub async fn get_weather(State(state): State<AppState>) -> Json<WeatherResponse> {
    let snapshot = state.board_service.snapshot().await;
    Json(WeatherResponse {
        weather: (*snapshot.weather).clone(),
        loaded_at: snapshot.weather_loaded_at,
    })
}

/// Weather routes, nested under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/weather", get(get_weather))
}

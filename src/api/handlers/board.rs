//! HTML board handlers: the board page, the detail page, and refresh.

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};

use crate::api::dto::FilterQuery;
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::BoardError;
use crate::render::{BoardView, render_board_page, render_detail_page, render_not_found_page};

/// `GET /` — the board page, filtered by the query string.
pub async fn board_page(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Html<String> {
    let criteria = query.to_criteria();
    let board = state.board_service.filtered(&criteria).await;
    let events = board.events();
    let categories = board.categories();

    let html = render_board_page(&BoardView {
        events: &events,
        source: board.state.source,
        criteria: &criteria,
        categories: &categories,
        cities: state.board_service.cities(),
        weather: &board.state.weather,
    });
    state.board_service.page_viewed(events.len());
    Html(html)
}

/// `GET /events/{id}` — detail page for one event.
pub async fn event_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.board_service.event(&EventId::new(id.as_str())).await {
        Ok(event) => Html(render_detail_page(&event)).into_response(),
        Err(BoardError::EventNotFound(_)) => {
            (StatusCode::NOT_FOUND, Html(render_not_found_page(&id))).into_response()
        }
        Err(other) => other.into_response(),
    }
}

/// `POST /refresh` — reloads events and weather, then returns to the board.
pub async fn refresh(State(state): State<AppState>) -> Redirect {
    let summary = state.board_service.refresh_all().await;
    tracing::info!(
        source = summary.events.source.as_str(),
        events = summary.events.count,
        "board refreshed from page"
    );
    Redirect::to("/")
}

/// HTML routes mounted at the root.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(board_page))
        .route("/events/{id}", get(event_page))
        .route("/refresh", post(refresh))
}

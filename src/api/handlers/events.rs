//! JSON event handlers: list, filter, lookup, detail fragment,
//! recommendations, refresh.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    EventListResponse, FilterQuery, FilteredEventsResponse, RecommendationsResponse,
};
use crate::app_state::AppState;
use crate::domain::{EventId, EventRecord, EventSource};
use crate::error::{BoardError, ErrorResponse};
use crate::render::render_detail;
use crate::service::RefreshSummary;

/// `GET /events` — the full current sequence.
///
/// # Errors
///
/// Returns [`BoardError::DataUnavailable`] when neither the feed nor the
/// fixture could supply events.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns the currently loaded events in display order, with their source.",
    responses(
        (status = 200, description = "Current events", body = EventListResponse),
        (status = 503, description = "No event source available", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<EventListResponse>, BoardError> {
    let snapshot = state.board_service.snapshot().await;
    if snapshot.source == EventSource::Exhausted {
        return Err(BoardError::DataUnavailable(
            "event feed failed and fixture fallback is disabled".to_string(),
        ));
    }

    let events = snapshot.events.to_vec();
    Ok(Json(EventListResponse {
        count: events.len(),
        events,
        source: snapshot.source,
        loaded_at: snapshot.events_loaded_at,
    }))
}

/// `GET /events/filter` — events matching the query's criteria.
#[utoipa::path(
    get,
    path = "/api/v1/events/filter",
    tag = "Events",
    summary = "Filter events",
    description = "Applies the board's filter controls. Unknown values are ignored.",
    params(FilterQuery),
    responses(
        (status = 200, description = "Matching events", body = FilteredEventsResponse),
    )
)]
pub async fn filter_events(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<FilteredEventsResponse> {
    let criteria = query.to_criteria();
    let board = state.board_service.filtered(&criteria).await;
    let events: Vec<EventRecord> = board.events().into_iter().cloned().collect();
    Json(FilteredEventsResponse {
        count: events.len(),
        events,
        filters: criteria,
    })
}

/// `GET /events/{id}` — one event.
///
/// # Errors
///
/// Returns [`BoardError::EventNotFound`] for an unknown identifier.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get event",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "The event", body = EventRecord),
        (status = 404, description = "Unknown event", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EventRecord>, BoardError> {
    let event = state.board_service.event(&EventId::new(id)).await?;
    Ok(Json(event))
}

/// `GET /events/{id}/detail` — the detail view as an HTML fragment.
///
/// # Errors
///
/// Returns [`BoardError::EventNotFound`] for an unknown identifier.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/detail",
    tag = "Events",
    summary = "Event detail fragment",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Detail markup", content_type = "text/html", body = String),
        (status = 404, description = "Unknown event", body = ErrorResponse),
    )
)]
pub async fn event_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, BoardError> {
    let event = state.board_service.event(&EventId::new(id)).await?;
    Ok(Html(render_detail(&event)))
}

/// `GET /recommendations` — weather-aware recommendations.
#[utoipa::path(
    get,
    path = "/api/v1/recommendations",
    tag = "Events",
    summary = "Recommended events",
    description = "Scores matching events against each event's city weather and returns the best ten.",
    params(FilterQuery),
    responses(
        (status = 200, description = "Recommendations, best first", body = RecommendationsResponse),
    )
)]
pub async fn recommendations(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<RecommendationsResponse> {
    let recommendations = state
        .board_service
        .recommendations(&query.to_criteria())
        .await;
    Json(RecommendationsResponse {
        count: recommendations.len(),
        recommendations,
    })
}

/// `POST /refresh` — reloads events and weather.
#[utoipa::path(
    post,
    path = "/api/v1/refresh",
    tag = "Events",
    summary = "Refresh board",
    description = "Reloads events and weather concurrently. Upstream failures are absorbed; see `source`.",
    responses(
        (status = 200, description = "Refresh result", body = RefreshSummary),
    )
)]
pub async fn refresh(State(state): State<AppState>) -> Json<RefreshSummary> {
    Json(state.board_service.refresh_all().await)
}

/// Event routes, nested under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/filter", get(filter_events))
        .route("/events/{id}", get(get_event))
        .route("/events/{id}/detail", get(event_detail))
        .route("/recommendations", get(recommendations))
        .route("/refresh", post(refresh))
}

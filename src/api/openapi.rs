//! OpenAPI document and Swagger UI.

use axum::Router;
use utoipa::OpenApi;

use crate::api::dto::{
    EventListResponse, FilteredEventsResponse, RecommendationsResponse, WeatherResponse,
};
use crate::api::handlers::{events, system, weather};
use crate::app_state::AppState;
use crate::domain::{
    EventId, EventRecord, EventSource, FilterCriteria, LocationType, Recommendation,
    WeatherBoard, WeatherSnapshot,
};
use crate::error::{ErrorBody, ErrorResponse};
use crate::service::{EventsRefresh, RefreshSummary, WeatherRefresh};

/// OpenAPI description of the JSON API.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "event-board API",
        description = "Community event board with weather-aware recommendations"
    ),
    paths(
        system::health_handler,
        events::list_events,
        events::filter_events,
        events::get_event,
        events::event_detail,
        events::recommendations,
        events::refresh,
        weather::get_weather,
    ),
    components(schemas(
        EventId,
        EventRecord,
        EventSource,
        FilterCriteria,
        LocationType,
        WeatherSnapshot,
        WeatherBoard,
        EventListResponse,
        FilteredEventsResponse,
        Recommendation,
        RecommendationsResponse,
        WeatherResponse,
        EventsRefresh,
        WeatherRefresh,
        RefreshSummary,
        system::HealthResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Events", description = "Event listing, filtering and detail"),
        (name = "Weather", description = "Per-city weather"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

/// Routes serving the OpenAPI document and, with the `swagger-ui` feature,
/// the Swagger UI.
#[cfg(feature = "swagger-ui")]
pub fn routes() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}

/// Routes serving the OpenAPI document.
#[cfg(not(feature = "swagger-ui"))]
pub fn routes() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;

    Router::new().route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}

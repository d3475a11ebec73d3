//! Response bodies for the event, weather and refresh endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{EventRecord, EventSource, FilterCriteria, Recommendation, WeatherBoard};

/// Response for `GET /api/v1/events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Events in display order.
    pub events: Vec<EventRecord>,
    /// Number of events.
    pub count: usize,
    /// Where the events came from.
    pub source: EventSource,
    /// When the events were loaded.
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Response for `GET /api/v1/events/filter`.
#[derive(Debug, Serialize, ToSchema)]
pub struct FilteredEventsResponse {
    /// Matching events in display order.
    pub events: Vec<EventRecord>,
    /// Number of matching events.
    pub count: usize,
    /// The criteria that were applied.
    pub filters: FilterCriteria,
}

/// Response for `GET /api/v1/recommendations`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationsResponse {
    /// Recommendations, best first.
    pub recommendations: Vec<Recommendation>,
    /// Number of recommendations.
    pub count: usize,
}

/// Response for `GET /api/v1/weather`.
#[derive(Debug, Serialize, ToSchema)]
pub struct WeatherResponse {
    /// One snapshot per city, in display order.
    pub weather: WeatherBoard,
    /// When the board was loaded.
    pub loaded_at: Option<DateTime<Utc>>,
}

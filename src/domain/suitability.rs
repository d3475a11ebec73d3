//! Weather suitability scoring and recommendations.
//!
//! Scores combine the event's own attributes (free, child friendly,
//! parking, daytime start) with how well indoor/outdoor and the rain policy
//! fit the current weather of the event's city.

use serde::Serialize;
use utoipa::ToSchema;

use super::{EventRecord, FilterCriteria, WeatherBoard, WeatherCondition, WeatherSnapshot};

/// Minimum score for an event to be recommended.
pub const RECOMMENDATION_THRESHOLD: f64 = 0.4;

/// Maximum number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 10;

const BASE_SCORE: f64 = 0.5;
const RAIN_OK: &str = "雨でも開催";
const LIGHT_RAIN_OK: &str = "小雨決行";

/// A recommended event with its score and the reason it was picked.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Recommendation {
    /// The event.
    pub event: EventRecord,
    /// Weather-adjusted score in `0.0..=1.0`.
    pub score: f64,
    /// Human-readable reason.
    pub reason: String,
    /// Weather used for scoring, when any was available.
    pub weather: Option<WeatherSnapshot>,
}

/// Score from the event's attributes alone.
#[must_use]
pub fn base_score(event: &EventRecord) -> f64 {
    let mut score = BASE_SCORE;
    if event.is_free {
        score += 0.1;
    }
    if event.child_friendly {
        score += 0.1;
    }
    if event.has_parking {
        score += 0.05;
    }
    if event.start_hour().is_some_and(|h| (9..=17).contains(&h)) {
        score += 0.1;
    }
    score.min(1.0)
}

/// Score adjusted for the given weather condition.
#[must_use]
pub fn weather_score(event: &EventRecord, condition: WeatherCondition) -> f64 {
    let adjustment = match (event.is_indoor, condition) {
        (true, WeatherCondition::Rainy) => 0.3,
        (true, WeatherCondition::Clear) => 0.1,
        (false, WeatherCondition::Rainy) => match event.rain_cancellation.as_deref() {
            Some(RAIN_OK) => 0.2,
            Some(LIGHT_RAIN_OK) => 0.1,
            _ => -0.4,
        },
        (false, WeatherCondition::Clear) => 0.3,
        (_, WeatherCondition::Cloudy) => 0.0,
    };
    (base_score(event) + adjustment).clamp(0.0, 1.0)
}

/// Reason text shown with a recommendation.
#[must_use]
pub fn recommendation_reason(event: &EventRecord, condition: Option<WeatherCondition>) -> String {
    let reason = match condition {
        Some(WeatherCondition::Rainy) if event.is_indoor => "雨の日なので屋内イベントがおすすめ",
        Some(WeatherCondition::Clear) if !event.is_indoor => "晴れの日なので屋外イベントがおすすめ",
        _ if event.is_free => "無料で参加できます",
        _ if event.child_friendly => "お子様連れでも安心",
        _ if event.has_parking => "駐車場完備",
        _ => "天候に適したイベントです",
    };
    reason.to_string()
}

/// Filters, scores and ranks events against the current weather.
///
/// Each event is scored with the weather of its `source_city` when that
/// city is on the board and available, otherwise with the first available
/// snapshot, otherwise with [`base_score`]. Ties keep input order.
#[must_use]
pub fn recommend(
    events: &[EventRecord],
    weather: &WeatherBoard,
    criteria: &FilterCriteria,
) -> Vec<Recommendation> {
    let fallback = weather.first_available();

    let mut ranked: Vec<Recommendation> = criteria
        .apply(events)
        .into_iter()
        .map(|event| {
            let snapshot = event
                .source_city
                .as_deref()
                .and_then(|city| weather.get(city))
                .filter(|s| s.available)
                .or(fallback);
            let condition = snapshot.map(WeatherSnapshot::classification);
            let score = condition.map_or_else(|| base_score(event), |c| weather_score(event, c));
            Recommendation {
                event: event.clone(),
                score,
                reason: recommendation_reason(event, condition),
                weather: snapshot.cloned(),
            }
        })
        .filter(|r| r.score > RECOMMENDATION_THRESHOLD)
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(MAX_RECOMMENDATIONS);
    ranked
}

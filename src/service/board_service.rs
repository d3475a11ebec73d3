//! Board service: runs loads, commits them to the store, answers queries,
//! and reports activity.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::BoardConfig;
use crate::domain::suitability::recommend;
use crate::domain::{
    ActivityBus, BoardActivity, BoardState, BoardStore, EventId, EventRecord, EventSource,
    FilterCriteria, Recommendation,
};
use crate::error::{BoardError, FeedError};
use crate::feed::{EventLoader, WeatherLoader, build_client};

/// Result of one event refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct EventsRefresh {
    /// Where the loaded events came from.
    pub source: EventSource,
    /// Number of events loaded.
    pub count: usize,
    /// `false` when a newer load had already committed.
    pub committed: bool,
}

/// Result of one weather refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct WeatherRefresh {
    /// Cities on the loaded board.
    pub cities: usize,
    /// Cities whose fetch failed.
    pub unavailable: usize,
    /// `false` when a newer load had already committed.
    pub committed: bool,
}

/// Result of a combined refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RefreshSummary {
    /// Event refresh result.
    pub events: EventsRefresh,
    /// Weather refresh result.
    pub weather: WeatherRefresh,
}

/// A state snapshot together with the filter that was run against it.
#[derive(Debug, Clone)]
pub struct FilteredBoard {
    /// The snapshot the filter ran against.
    pub state: BoardState,
    /// The criteria that were applied.
    pub criteria: FilterCriteria,
    matched: usize,
}

impl FilteredBoard {
    /// Matching events, in display order.
    #[must_use]
    pub fn events(&self) -> Vec<&EventRecord> {
        self.criteria.apply(self.state.events.iter())
    }

    /// Number of matching events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matched
    }

    /// Returns `true` if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }

    /// Distinct non-empty categories of the whole sequence, first seen first.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for event in self.state.events.iter() {
            let category = event.category.as_str();
            if !category.is_empty() && !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }
}

/// Top-level controller for the board.
///
/// Loads are never run while holding the store lock: a load draws a ticket,
/// awaits its loader, then commits. Overlapping loads therefore race, and
/// the ticket decides which result survives.
#[derive(Debug)]
pub struct BoardService {
    store: Arc<BoardStore>,
    event_loader: EventLoader,
    weather_loader: WeatherLoader,
    activity: ActivityBus,
}

impl BoardService {
    /// Creates a service from its parts.
    #[must_use]
    pub fn new(
        store: Arc<BoardStore>,
        event_loader: EventLoader,
        weather_loader: WeatherLoader,
        activity: ActivityBus,
    ) -> Self {
        Self {
            store,
            event_loader,
            weather_loader,
            activity,
        }
    }

    /// Builds the loaders and an empty store from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] if the outbound HTTP client cannot be built.
    pub fn from_config(config: &BoardConfig, activity: ActivityBus) -> Result<Self, FeedError> {
        let client = build_client(config.http_client_timeout)?;
        let event_loader = EventLoader::new(
            client.clone(),
            config.events_feed_url.clone(),
            config.fixture_fallback_enabled,
        );
        let weather_loader = WeatherLoader::new(
            client,
            config.weather_api_url.clone(),
            config.weather_api_key.clone(),
            config.cities.clone(),
        );
        Ok(Self::new(
            Arc::new(BoardStore::new()),
            event_loader,
            weather_loader,
            activity,
        ))
    }

    /// Configured weather cities, used as the city filter options.
    #[must_use]
    pub fn cities(&self) -> &[String] {
        self.weather_loader.cities()
    }

    /// Current state snapshot.
    pub async fn snapshot(&self) -> BoardState {
        self.store.snapshot().await
    }

    /// Reloads the event sequence.
    pub async fn refresh_events(&self) -> EventsRefresh {
        let ticket = self.store.begin_events_load();
        let outcome = self.event_loader.load().await;
        let count = outcome.events.len();
        let source = outcome.source;
        let committed = self
            .store
            .commit_events(ticket, outcome.events, source)
            .await;

        tracing::info!(
            ticket = ticket.sequence(),
            source = source.as_str(),
            count,
            committed,
            "events refreshed"
        );
        let _ = self.activity.publish(BoardActivity::EventsRefreshed {
            source,
            count,
            committed,
            timestamp: Utc::now(),
        });

        EventsRefresh {
            source,
            count,
            committed,
        }
    }

    /// Reloads the weather board.
    pub async fn refresh_weather(&self) -> WeatherRefresh {
        let ticket = self.store.begin_weather_load();
        let board = self.weather_loader.load().await;
        let cities = board.len();
        let unavailable = board.iter().filter(|s| !s.available).count();
        let committed = self.store.commit_weather(ticket, board).await;

        let _ = self.activity.publish(BoardActivity::WeatherRefreshed {
            cities,
            unavailable,
            committed,
            timestamp: Utc::now(),
        });

        WeatherRefresh {
            cities,
            unavailable,
            committed,
        }
    }

    /// Reloads events and weather concurrently.
    pub async fn refresh_all(&self) -> RefreshSummary {
        let (events, weather) = tokio::join!(self.refresh_events(), self.refresh_weather());
        RefreshSummary { events, weather }
    }

    /// Applies `criteria` to the current sequence.
    pub async fn filtered(&self, criteria: &FilterCriteria) -> FilteredBoard {
        let state = self.store.snapshot().await;
        let matched = criteria.apply(state.events.iter()).len();

        if !criteria.is_vacuous() {
            let _ = self.activity.publish(BoardActivity::FilterApplied {
                criteria: criteria.clone(),
                matched,
                timestamp: Utc::now(),
            });
        }

        FilteredBoard {
            state,
            criteria: criteria.clone(),
            matched,
        }
    }

    /// Looks up one event in the current sequence.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EventNotFound`] for an unknown identifier.
    pub async fn event(&self, id: &EventId) -> Result<EventRecord, BoardError> {
        let state = self.store.snapshot().await;
        let found = state.event(id).cloned();

        let _ = self.activity.publish(BoardActivity::DetailViewed {
            event_id: id.clone(),
            found: found.is_some(),
            timestamp: Utc::now(),
        });

        found.ok_or_else(|| BoardError::EventNotFound(id.to_string()))
    }

    /// Weather-aware recommendations for the events matching `criteria`.
    pub async fn recommendations(&self, criteria: &FilterCriteria) -> Vec<Recommendation> {
        let state = self.store.snapshot().await;
        recommend(&state.events, &state.weather, criteria)
    }

    /// Reports a rendered board page.
    pub fn page_viewed(&self, shown: usize) {
        let _ = self.activity.publish(BoardActivity::PageViewed {
            shown,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::fixture;

    fn offline_service() -> (BoardService, ActivityBus) {
        let bus = ActivityBus::new(64);
        let config = BoardConfig {
            weather_api_key: None,
            cities: vec!["守谷市".to_string(), "つくば市".to_string()],
            ..BoardConfig::default()
        };
        let Ok(service) = BoardService::from_config(&config, bus.clone()) else {
            panic!("client should build");
        };
        (service, bus)
    }

    #[tokio::test]
    async fn refresh_all_loads_fixture_and_weather() {
        let (service, _bus) = offline_service();
        let summary = service.refresh_all().await;

        assert_eq!(summary.events.source, EventSource::Fixture);
        assert_eq!(summary.events.count, fixture::len());
        assert!(summary.events.committed);
        assert_eq!(summary.weather.cities, 2);
        assert_eq!(summary.weather.unavailable, 2);

        let state = service.snapshot().await;
        assert_eq!(state.events.len(), fixture::len());
        assert_eq!(state.weather.len(), 2);
    }

    #[tokio::test]
    async fn filtered_keeps_order_and_reports_activity() {
        let (service, bus) = offline_service();
        service.refresh_events().await;
        let mut rx = bus.subscribe();

        let criteria = FilterCriteria::new().free_only(true);
        let board = service.filtered(&criteria).await;
        assert_eq!(board.len(), 7);
        assert!(board.events().iter().all(|e| e.is_free));

        let Ok(BoardActivity::FilterApplied { matched, .. }) = rx.recv().await else {
            panic!("expected filter activity");
        };
        assert_eq!(matched, 7);
    }

    #[tokio::test]
    async fn filtered_matches_criteria_applied_to_snapshot() {
        let (service, _bus) = offline_service();
        service.refresh_events().await;

        let criteria = FilterCriteria::new().child_friendly(true).with_city("つくば市");
        let board = service.filtered(&criteria).await;
        let snapshot = service.snapshot().await;
        let expected = criteria.apply(snapshot.events.iter());

        assert_eq!(board.len(), expected.len());
        let ids: Vec<&str> = board.events().iter().map(|e| e.id.as_str()).collect();
        let expected_ids: Vec<&str> = expected.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, expected_ids);
        assert!(!board.is_empty());
    }

    #[tokio::test]
    async fn vacuous_filter_returns_everything() {
        let (service, _bus) = offline_service();
        service.refresh_events().await;
        let board = service.filtered(&FilterCriteria::default()).await;
        assert_eq!(board.len(), fixture::len());
        assert!(!board.categories().is_empty());
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let (service, _bus) = offline_service();
        service.refresh_events().await;

        let result = service.event(&EventId::from("missing")).await;
        assert!(matches!(result, Err(BoardError::EventNotFound(_))));

        let Ok(event) = service.event(&EventId::from("fx-01")).await else {
            panic!("fixture event should exist");
        };
        assert_eq!(event.id.as_str(), "fx-01");
    }

    #[tokio::test]
    async fn overlapping_refreshes_both_complete() {
        let (service, _bus) = offline_service();
        let (a, b) = tokio::join!(service.refresh_events(), service.refresh_events());
        assert!(a.committed || b.committed);
        assert_eq!(service.snapshot().await.events.len(), fixture::len());
    }
}

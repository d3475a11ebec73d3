//! Application state for the board: the current event sequence and the
//! current weather board.
//!
//! [`BoardStore`] owns both slots. Each slot is replaced wholesale by a load
//! and never mutated in place. Loads draw a monotonic ticket before they
//! start; a commit carrying a ticket older than the last committed one is
//! discarded, so a slow stale response cannot overwrite a newer result.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::{EventId, EventRecord, WeatherBoard};

/// Where the current event sequence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// Nothing has been loaded yet.
    Pending,
    /// The remote feed.
    Remote,
    /// The embedded fixture.
    Fixture,
    /// The remote feed failed and the fixture fallback is disabled.
    Exhausted,
}

impl EventSource {
    /// Stable lowercase name, used in logs and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Remote => "remote",
            Self::Fixture => "fixture",
            Self::Exhausted => "exhausted",
        }
    }
}

/// Ticket identifying one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    /// Sequence number of the ticket.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Immutable view of the board at one point in time.
#[derive(Debug, Clone)]
pub struct BoardState {
    /// Current event sequence, in display order.
    pub events: Arc<[EventRecord]>,
    /// Where the events came from.
    pub source: EventSource,
    /// When the events were committed.
    pub events_loaded_at: Option<DateTime<Utc>>,
    /// Ticket sequence of the committed events.
    pub events_generation: u64,
    /// Current weather board.
    pub weather: Arc<WeatherBoard>,
    /// When the weather was committed.
    pub weather_loaded_at: Option<DateTime<Utc>>,
    /// Ticket sequence of the committed weather.
    pub weather_generation: u64,
}

impl BoardState {
    /// Looks up an event by identifier.
    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.id == *id)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            events: Arc::from(Vec::new()),
            source: EventSource::Pending,
            events_loaded_at: None,
            events_generation: 0,
            weather: Arc::new(WeatherBoard::default()),
            weather_loaded_at: None,
            weather_generation: 0,
        }
    }
}

/// Owner of the single board state.
#[derive(Debug, Default)]
pub struct BoardStore {
    state: RwLock<BoardState>,
    next_events_ticket: AtomicU64,
    next_weather_ticket: AtomicU64,
}

impl BoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a cheap copy of the current state.
    pub async fn snapshot(&self) -> BoardState {
        self.state.read().await.clone()
    }

    /// Draws a ticket for a new event load.
    pub fn begin_events_load(&self) -> LoadTicket {
        LoadTicket(self.next_events_ticket.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Draws a ticket for a new weather load.
    pub fn begin_weather_load(&self) -> LoadTicket {
        LoadTicket(self.next_weather_ticket.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Replaces the event sequence if `ticket` is newer than the committed
    /// one. Returns `true` if the commit was applied.
    pub async fn commit_events(
        &self,
        ticket: LoadTicket,
        events: Vec<EventRecord>,
        source: EventSource,
    ) -> bool {
        let mut state = self.state.write().await;
        if ticket.0 <= state.events_generation {
            tracing::debug!(
                ticket = ticket.0,
                committed = state.events_generation,
                "discarding stale event load"
            );
            return false;
        }
        state.events = Arc::from(events);
        state.source = source;
        state.events_loaded_at = Some(Utc::now());
        state.events_generation = ticket.0;
        true
    }

    /// Replaces the weather board if `ticket` is newer than the committed
    /// one. Returns `true` if the commit was applied.
    pub async fn commit_weather(&self, ticket: LoadTicket, weather: WeatherBoard) -> bool {
        let mut state = self.state.write().await;
        if ticket.0 <= state.weather_generation {
            tracing::debug!(
                ticket = ticket.0,
                committed = state.weather_generation,
                "discarding stale weather load"
            );
            return false;
        }
        state.weather = Arc::new(weather);
        state.weather_loaded_at = Some(Utc::now());
        state.weather_generation = ticket.0;
        true
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{WeatherSnapshot, fixture};

    #[tokio::test]
    async fn starts_pending_and_empty() {
        let store = BoardStore::new();
        let state = store.snapshot().await;
        assert_eq!(state.source, EventSource::Pending);
        assert!(state.events.is_empty());
        assert!(state.weather.is_empty());
    }

    #[tokio::test]
    async fn commit_replaces_events() {
        let store = BoardStore::new();
        let ticket = store.begin_events_load();
        assert!(
            store
                .commit_events(ticket, fixture::events(), EventSource::Fixture)
                .await
        );
        let state = store.snapshot().await;
        assert_eq!(state.events.len(), fixture::len());
        assert_eq!(state.source, EventSource::Fixture);
        assert!(state.events_loaded_at.is_some());
        assert!(state.event(&EventId::from("fx-04")).is_some());
        assert!(state.event(&EventId::from("missing")).is_none());
    }

    #[tokio::test]
    async fn stale_event_commit_is_discarded() {
        let store = BoardStore::new();
        let older = store.begin_events_load();
        let newer = store.begin_events_load();
        assert!(older < newer);

        assert!(
            store
                .commit_events(newer, fixture::events(), EventSource::Remote)
                .await
        );
        assert!(
            !store
                .commit_events(older, Vec::new(), EventSource::Fixture)
                .await
        );

        let state = store.snapshot().await;
        assert_eq!(state.source, EventSource::Remote);
        assert_eq!(state.events.len(), fixture::len());
        assert_eq!(state.events_generation, newer.sequence());
    }

    #[tokio::test]
    async fn stale_weather_commit_is_discarded() {
        let store = BoardStore::new();
        let older = store.begin_weather_load();
        let newer = store.begin_weather_load();

        let fresh = WeatherBoard::from_snapshots([WeatherSnapshot::unavailable("守谷市")]);
        assert!(store.commit_weather(newer, fresh.clone()).await);
        assert!(!store.commit_weather(older, WeatherBoard::default()).await);

        assert_eq!(*store.snapshot().await.weather, fresh);
    }

    #[tokio::test]
    async fn snapshots_are_isolated_from_later_commits() {
        let store = BoardStore::new();
        let before = store.snapshot().await;
        let ticket = store.begin_events_load();
        store
            .commit_events(ticket, fixture::events(), EventSource::Fixture)
            .await;
        assert!(before.events.is_empty());
    }
}

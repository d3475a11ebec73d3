//! Data loader for the event sequence.
//!
//! One `GET` per load, no retry. Whatever goes wrong upstream, the caller
//! gets a [`LoadOutcome`]: remote events, fixture events, or (only when the
//! fixture fallback is disabled) an exhausted, empty outcome.

use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::{EventRecord, EventSource, RawEventRecord, fixture};
use crate::error::FeedError;

/// Result of one load attempt.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// The event sequence, in display order.
    pub events: Vec<EventRecord>,
    /// Where the events came from.
    pub source: EventSource,
    /// Why the remote feed was not used, if it was not.
    pub failure: Option<String>,
}

/// Wire shape of the feed document.
#[derive(Debug, Deserialize)]
struct EventFeedDocument {
    #[serde(default)]
    events: Option<Vec<serde_json::Value>>,
}

/// Loads events from the remote feed with fixture fallback.
#[derive(Debug, Clone)]
pub struct EventLoader {
    client: reqwest::Client,
    feed_url: Option<String>,
    fixture_fallback: bool,
}

impl EventLoader {
    /// Creates a loader. `feed_url == None` serves the fixture directly.
    #[must_use]
    pub fn new(client: reqwest::Client, feed_url: Option<String>, fixture_fallback: bool) -> Self {
        Self {
            client,
            feed_url,
            fixture_fallback,
        }
    }

    /// Performs one load. Never fails.
    pub async fn load(&self) -> LoadOutcome {
        match self.fetch_remote().await {
            Ok(events) => {
                tracing::info!(count = events.len(), "loaded events from remote feed");
                LoadOutcome {
                    events,
                    source: EventSource::Remote,
                    failure: None,
                }
            }
            Err(err) => self.fallback(&err),
        }
    }

    fn fallback(&self, err: &FeedError) -> LoadOutcome {
        if !self.fixture_fallback {
            tracing::error!(error = %err, "event feed failed and fixture fallback is disabled");
            return LoadOutcome {
                events: Vec::new(),
                source: EventSource::Exhausted,
                failure: Some(err.to_string()),
            };
        }

        match err {
            FeedError::NotConfigured(_) => {
                tracing::info!("no event feed configured, serving fixture events");
            }
            other => {
                tracing::warn!(error = %other, "event feed unavailable, serving fixture events");
            }
        }
        LoadOutcome {
            events: fixture::events(),
            source: EventSource::Fixture,
            failure: Some(err.to_string()),
        }
    }

    async fn fetch_remote(&self) -> Result<Vec<EventRecord>, FeedError> {
        let url = self
            .feed_url
            .as_deref()
            .ok_or(FeedError::NotConfigured("events feed"))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let document: EventFeedDocument = response
            .json()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))?;
        let raw = document.events.ok_or(FeedError::Empty("events"))?;
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let events = normalise(raw);
        if events.is_empty() {
            return Err(FeedError::Empty("valid events"));
        }
        Ok(events)
    }
}

/// Converts feed entries into records, preserving order.
///
/// Entries that fail to decode, carry an invalid date, or repeat an
/// identifier already seen are dropped.
#[must_use]
pub fn normalise(raw: Vec<serde_json::Value>) -> Vec<EventRecord> {
    let mut seen = HashSet::new();
    let mut events = Vec::with_capacity(raw.len());

    for (position, value) in raw.into_iter().enumerate() {
        let raw_record: RawEventRecord = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(position, error = %e, "dropping undecodable feed entry");
                continue;
            }
        };
        let record = match raw_record.into_record(position) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(position, error = %e, "dropping feed entry");
                continue;
            }
        };
        if !seen.insert(record.id.clone()) {
            tracing::warn!(position, id = %record.id, "dropping duplicate event id");
            continue;
        }
        events.push(record);
    }

    events
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::net::SocketAddr;

    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use serde_json::json;

    use super::*;

    async fn serve(router: Router) -> SocketAddr {
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind stub feed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("stub feed address");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        addr
    }

    async fn stub_feed(status: StatusCode, body: serde_json::Value) -> String {
        let router = Router::new().route(
            "/events",
            get(move || {
                let body = body.clone();
                async move { (status, axum::Json(body)) }
            }),
        );
        format!("http://{}/events", serve(router).await)
    }

    async fn unreachable_url() -> String {
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind probe");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("probe address");
        };
        drop(listener);
        format!("http://{addr}/events")
    }

    fn loader(url: Option<String>, fallback: bool) -> EventLoader {
        EventLoader::new(reqwest::Client::new(), url, fallback)
    }

    #[tokio::test]
    async fn remote_events_keep_feed_order() {
        let url = stub_feed(
            StatusCode::OK,
            json!({"events": [
                {"id": 2, "title": "b", "date": "2025-09-02", "is_free": true},
                {"id": 1, "title": "a", "date": "2025-09-01"}
            ]}),
        )
        .await;

        let outcome = loader(Some(url), true).load().await;
        assert_eq!(outcome.source, EventSource::Remote);
        assert!(outcome.failure.is_none());
        let ids: Vec<_> = outcome.events.iter().map(|e| e.id.to_string()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[tokio::test]
    async fn server_error_falls_back_to_fixture() {
        let url = stub_feed(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})).await;
        let outcome = loader(Some(url), true).load().await;
        assert_eq!(outcome.source, EventSource::Fixture);
        assert_eq!(outcome.events.len(), fixture::len());
        assert!(outcome.failure.is_some_and(|f| f.contains("500")));
    }

    #[tokio::test]
    async fn unreachable_feed_falls_back_to_fixture() {
        let outcome = loader(Some(unreachable_url().await), true).load().await;
        assert_eq!(outcome.source, EventSource::Fixture);
        assert_eq!(outcome.events.len(), fixture::len());
    }

    #[tokio::test]
    async fn missing_events_field_falls_back_to_fixture() {
        let url = stub_feed(StatusCode::OK, json!({"items": []})).await;
        let outcome = loader(Some(url), true).load().await;
        assert_eq!(outcome.source, EventSource::Fixture);
    }

    #[tokio::test]
    async fn explicit_empty_list_is_a_valid_answer() {
        let url = stub_feed(StatusCode::OK, json!({"events": []})).await;
        let outcome = loader(Some(url), true).load().await;
        assert_eq!(outcome.source, EventSource::Remote);
        assert!(outcome.events.is_empty());
    }

    #[tokio::test]
    async fn all_invalid_entries_fall_back_to_fixture() {
        let url = stub_feed(
            StatusCode::OK,
            json!({"events": [{"id": 1, "date": "someday"}, {"id": 2}]}),
        )
        .await;
        let outcome = loader(Some(url), true).load().await;
        assert_eq!(outcome.source, EventSource::Fixture);
    }

    #[tokio::test]
    async fn unconfigured_feed_serves_fixture() {
        let outcome = loader(None, true).load().await;
        assert_eq!(outcome.source, EventSource::Fixture);
        assert_eq!(outcome.events.len(), fixture::len());
    }

    #[tokio::test]
    async fn disabled_fallback_exhausts() {
        let outcome = loader(Some(unreachable_url().await), false).load().await;
        assert_eq!(outcome.source, EventSource::Exhausted);
        assert!(outcome.events.is_empty());
        assert!(outcome.failure.is_some());
    }

    #[test]
    fn normalise_drops_invalid_and_duplicate_entries() {
        let events = normalise(vec![
            json!({"id": 1, "title": "first", "date": "2025-09-01"}),
            json!({"id": 2, "title": "bad date", "date": "2025-13-40"}),
            json!({"id": 1, "title": "duplicate", "date": "2025-09-03"}),
            json!({"id": 3, "title": 42, "date": "2025-09-04"}),
            json!({"id": 4, "title": "last", "date": "2025-09-05"}),
        ]);
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["first", "last"]);
    }
}

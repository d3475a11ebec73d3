//! Board activity reported to the analytics side channel.
//!
//! Every user-triggered command and every completed load publishes a
//! [`BoardActivity`] through the [`super::ActivityBus`]. Sinks subscribe to
//! the bus; nothing on the request path waits for them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{EventId, EventSource, FilterCriteria};

/// Something that happened on the board.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "activity", rename_all = "snake_case")]
pub enum BoardActivity {
    /// The board page was rendered.
    PageViewed {
        /// Number of events shown.
        shown: usize,
        /// Render timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Filter criteria were applied.
    FilterApplied {
        /// The criteria.
        criteria: FilterCriteria,
        /// Number of events that matched.
        matched: usize,
        /// Timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The detail view of one event was requested.
    DetailViewed {
        /// Requested identifier.
        event_id: EventId,
        /// Whether the event exists.
        found: bool,
        /// Timestamp.
        timestamp: DateTime<Utc>,
    },

    /// An event load finished.
    EventsRefreshed {
        /// Where the events came from.
        source: EventSource,
        /// Number of events loaded.
        count: usize,
        /// Whether the result was committed (not stale).
        committed: bool,
        /// Timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A weather load finished.
    WeatherRefreshed {
        /// Cities on the board.
        cities: usize,
        /// Cities whose fetch failed.
        unavailable: usize,
        /// Whether the result was committed (not stale).
        committed: bool,
        /// Timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl BoardActivity {
    /// Returns the activity kind as a static string slice.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PageViewed { .. } => "page_viewed",
            Self::FilterApplied { .. } => "filter_applied",
            Self::DetailViewed { .. } => "detail_viewed",
            Self::EventsRefreshed { .. } => "events_refreshed",
            Self::WeatherRefreshed { .. } => "weather_refreshed",
        }
    }

    /// Returns when the activity happened.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::PageViewed { timestamp, .. }
            | Self::FilterApplied { timestamp, .. }
            | Self::DetailViewed { timestamp, .. }
            | Self::EventsRefreshed { timestamp, .. }
            | Self::WeatherRefreshed { timestamp, .. } => *timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_activity_tag() {
        let activity = BoardActivity::FilterApplied {
            criteria: FilterCriteria::new().free_only(true),
            matched: 7,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&activity).unwrap_or_default();
        assert!(json.contains("\"activity\":\"filter_applied\""));
        assert!(json.contains("\"free_only\":true"));
        assert_eq!(activity.kind(), "filter_applied");
    }

    #[test]
    fn detail_kind() {
        let activity = BoardActivity::DetailViewed {
            event_id: EventId::from("fx-01"),
            found: true,
            timestamp: Utc::now(),
        };
        assert_eq!(activity.kind(), "detail_viewed");
        assert!(activity.timestamp() <= Utc::now());
    }
}

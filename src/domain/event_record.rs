//! Event records: the wire shape of a feed entry and its normalised form.
//!
//! [`RawEventRecord`] mirrors whatever the remote feed sends (every field
//! optional, booleans possibly encoded as `0`/`1`). [`RawEventRecord::into_record`]
//! turns it into an [`EventRecord`], which always carries a valid
//! [`NaiveDate`] and defaulted flags. Records are immutable once loaded.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Placeholder shown when an event has no location.
pub const LOCATION_PLACEHOLDER: &str = "場所未定";

/// Placeholder shown when an event has no category.
pub const CATEGORY_PLACEHOLDER: &str = "カテゴリ未定";

/// Placeholder shown when an event has no description.
pub const DESCRIPTION_PLACEHOLDER: &str = "詳細情報はありません";

/// Placeholder title for records the feed sent without one.
pub const TITLE_PLACEHOLDER: &str = "タイトル未定";

/// Score assigned to records that carry no suitability score.
pub const DEFAULT_SUITABILITY: f64 = 0.5;

/// Identifier of an event, unique within the currently loaded sequence.
///
/// Feeds send either numeric or textual identifiers; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates an identifier from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single activity shown on the board.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EventRecord {
    /// Unique identifier within the loaded sequence.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Optional start time (free text, usually `HH:MM`).
    pub time: Option<String>,
    /// Optional venue or address.
    pub location: Option<String>,
    /// Optional long description.
    pub description: Option<String>,
    /// Category label from an open set (e.g. `"地域"`, `"教育"`).
    pub category: String,
    /// Whether attendance is free.
    pub is_free: bool,
    /// Whether parking is available.
    pub has_parking: bool,
    /// Whether the event welcomes small children.
    pub child_friendly: bool,
    /// Whether the event takes place indoors.
    pub is_indoor: bool,
    /// Whether the event depends on the weather, when known.
    pub weather_dependent: Option<bool>,
    /// Rain policy note (e.g. `"小雨決行"`).
    pub rain_cancellation: Option<String>,
    /// Link to the original announcement.
    pub source_url: Option<String>,
    /// Municipality the record was gathered from.
    pub source_city: Option<String>,
    /// Relevance score in `0.0..=1.0`.
    pub suitability_score: f64,
}

impl EventRecord {
    /// Location text, or [`LOCATION_PLACEHOLDER`] when absent.
    #[must_use]
    pub fn location_label(&self) -> &str {
        self.location.as_deref().unwrap_or(LOCATION_PLACEHOLDER)
    }

    /// Category text, or [`CATEGORY_PLACEHOLDER`] when blank.
    #[must_use]
    pub fn category_label(&self) -> &str {
        if self.category.is_empty() {
            CATEGORY_PLACEHOLDER
        } else {
            &self.category
        }
    }

    /// Description text, or [`DESCRIPTION_PLACEHOLDER`] when absent.
    #[must_use]
    pub fn description_label(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or(DESCRIPTION_PLACEHOLDER)
    }

    /// Start hour parsed from [`EventRecord::time`], if it looks like `HH:MM`.
    #[must_use]
    pub fn start_hour(&self) -> Option<u32> {
        self.time
            .as_deref()
            .and_then(|t| t.split(':').next())
            .and_then(|h| h.trim().parse().ok())
    }
}

/// Reasons a raw feed entry cannot become an [`EventRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The entry has no date at all.
    #[error("event {0} has no date")]
    MissingDate(String),
    /// The date text is not a calendar date.
    #[error("event {id} has an invalid date: {value:?}")]
    InvalidDate {
        /// Identifier of the offending entry.
        id: String,
        /// The date text as received.
        value: String,
    },
}

/// An identifier as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Numeric identifier (database row ids).
    Number(i64),
    /// Textual identifier.
    Text(String),
}

/// A feed entry before normalisation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEventRecord {
    /// Identifier, numeric or textual.
    pub id: Option<RawId>,
    /// Title.
    pub title: Option<String>,
    /// Date text (`YYYY-MM-DD` or RFC 3339).
    pub date: Option<String>,
    /// Start time text.
    pub time: Option<String>,
    /// Venue or address.
    pub location: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Category label.
    pub category: Option<String>,
    /// Free flag.
    #[serde(deserialize_with = "lenient_bool")]
    pub is_free: Option<bool>,
    /// Parking flag.
    #[serde(deserialize_with = "lenient_bool")]
    pub has_parking: Option<bool>,
    /// Child-friendly flag.
    #[serde(deserialize_with = "lenient_bool")]
    pub child_friendly: Option<bool>,
    /// Indoor flag.
    #[serde(deserialize_with = "lenient_bool")]
    pub is_indoor: Option<bool>,
    /// Weather-dependence flag.
    #[serde(deserialize_with = "lenient_bool")]
    pub weather_dependent: Option<bool>,
    /// Rain policy note.
    pub rain_cancellation: Option<String>,
    /// Source link.
    pub source_url: Option<String>,
    /// Source municipality.
    pub source_city: Option<String>,
    /// Relevance score.
    pub suitability_score: Option<f64>,
}

impl RawEventRecord {
    /// Normalises the entry. `position` is used to derive an identifier
    /// when the feed omitted one.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the date is missing or does not parse.
    pub fn into_record(self, position: usize) -> Result<EventRecord, RecordError> {
        let id = match self.id {
            Some(RawId::Number(n)) => EventId::new(n.to_string()),
            Some(RawId::Text(s)) if !s.trim().is_empty() => EventId::new(s.trim()),
            _ => EventId::new(format!("auto-{position}")),
        };

        let date_text = non_blank(self.date)
            .ok_or_else(|| RecordError::MissingDate(id.to_string()))?;
        let date = parse_event_date(&date_text).ok_or_else(|| RecordError::InvalidDate {
            id: id.to_string(),
            value: date_text.clone(),
        })?;

        let suitability_score = self
            .suitability_score
            .filter(|s| s.is_finite())
            .map_or(DEFAULT_SUITABILITY, |s| s.clamp(0.0, 1.0));

        Ok(EventRecord {
            id,
            title: non_blank(self.title).unwrap_or_else(|| TITLE_PLACEHOLDER.to_string()),
            date,
            time: non_blank(self.time),
            location: non_blank(self.location),
            description: non_blank(self.description),
            category: non_blank(self.category).unwrap_or_default(),
            is_free: self.is_free.unwrap_or(false),
            has_parking: self.has_parking.unwrap_or(false),
            child_friendly: self.child_friendly.unwrap_or(false),
            is_indoor: self.is_indoor.unwrap_or(false),
            weather_dependent: self.weather_dependent,
            rain_cancellation: non_blank(self.rain_cancellation),
            source_url: non_blank(self.source_url),
            source_city: non_blank(self.source_city),
            suitability_score,
        })
    }
}

/// Parses `YYYY-MM-DD`, falling back to the date part of an RFC 3339
/// timestamp.
#[must_use]
pub fn parse_event_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Accepts `true`/`false`, `0`/`1` and their string forms. Anything else is
/// treated as absent.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
        Float(f64),
    }

    let flag = Option::<Flag>::deserialize(deserializer)?;
    Ok(flag.and_then(|f| match f {
        Flag::Bool(b) => Some(b),
        Flag::Int(i) => Some(i != 0),
        Flag::Float(x) => Some(x != 0.0),
        Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
    }))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn raw(json: serde_json::Value) -> RawEventRecord {
        let Ok(raw) = serde_json::from_value(json) else {
            panic!("raw record should deserialize");
        };
        raw
    }

    #[test]
    fn numeric_and_text_ids_are_normalised() {
        let Ok(a) = raw(serde_json::json!({"id": 7, "date": "2025-08-07"})).into_record(0) else {
            panic!("valid record");
        };
        let Ok(b) = raw(serde_json::json!({"id": " ev-1 ", "date": "2025-08-07"})).into_record(1)
        else {
            panic!("valid record");
        };
        assert_eq!(a.id.as_str(), "7");
        assert_eq!(b.id.as_str(), "ev-1");
    }

    #[test]
    fn missing_id_uses_position() {
        let Ok(rec) = raw(serde_json::json!({"date": "2025-08-07"})).into_record(3) else {
            panic!("valid record");
        };
        assert_eq!(rec.id.as_str(), "auto-3");
    }

    #[test]
    fn flags_default_to_false_and_accept_integers() {
        let Ok(rec) = raw(serde_json::json!({
            "id": 1,
            "date": "2025-08-07",
            "is_free": 1,
            "has_parking": "true",
            "child_friendly": 0
        }))
        .into_record(0) else {
            panic!("valid record");
        };
        assert!(rec.is_free);
        assert!(rec.has_parking);
        assert!(!rec.child_friendly);
        assert!(!rec.is_indoor);
        assert_eq!(rec.weather_dependent, None);
    }

    #[test]
    fn score_defaults_and_clamps() {
        let Ok(a) = raw(serde_json::json!({"id": 1, "date": "2025-08-07"})).into_record(0) else {
            panic!("valid record");
        };
        let Ok(b) = raw(serde_json::json!({"id": 2, "date": "2025-08-07", "suitability_score": 1.7}))
            .into_record(1)
        else {
            panic!("valid record");
        };
        assert!((a.suitability_score - DEFAULT_SUITABILITY).abs() < f64::EPSILON);
        assert!((b.suitability_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_date_is_rejected() {
        let result = raw(serde_json::json!({"id": 1, "date": "来週の土曜"})).into_record(0);
        assert!(matches!(result, Err(RecordError::InvalidDate { .. })));

        let result = raw(serde_json::json!({"id": 1})).into_record(0);
        assert!(matches!(result, Err(RecordError::MissingDate(_))));
    }

    #[test]
    fn rfc3339_dates_keep_their_date_part() {
        assert_eq!(
            parse_event_date("2025-08-07T18:00:00+09:00"),
            NaiveDate::from_ymd_opt(2025, 8, 7)
        );
    }

    #[test]
    fn blank_text_becomes_placeholder() {
        let Ok(rec) = raw(serde_json::json!({
            "id": 1,
            "date": "2025-08-07",
            "location": "   ",
            "category": "",
            "rain_cancellation": ""
        }))
        .into_record(0) else {
            panic!("valid record");
        };
        assert_eq!(rec.location, None);
        assert_eq!(rec.location_label(), LOCATION_PLACEHOLDER);
        assert_eq!(rec.category_label(), CATEGORY_PLACEHOLDER);
        assert_eq!(rec.description_label(), DESCRIPTION_PLACEHOLDER);
        assert_eq!(rec.rain_cancellation, None);
        assert_eq!(rec.title, TITLE_PLACEHOLDER);
    }

    #[test]
    fn start_hour_parses_clock_time() {
        let Ok(rec) = raw(serde_json::json!({"id": 1, "date": "2025-08-07", "time": "13:30"}))
            .into_record(0)
        else {
            panic!("valid record");
        };
        assert_eq!(rec.start_hour(), Some(13));
    }
}

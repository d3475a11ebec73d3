//! Per-city weather snapshots and condition classification.

use serde::Serialize;
use utoipa::ToSchema;

/// Condition text shown for a city whose fetch failed.
pub const UNAVAILABLE_CONDITION: &str = "取得できません";

const RAINY_KEYWORDS: [&str; 10] = [
    "雨", "雪", "rain", "snow", "shower", "storm", "drizzle", "thunder", "sleet", "雷",
];
const CLOUDY_KEYWORDS: [&str; 7] = ["曇", "くもり", "cloud", "overcast", "fog", "mist", "霧"];

/// Coarse weather classification used for icons and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    /// Rain, snow, storms.
    Rainy,
    /// Cloud, fog.
    Cloudy,
    /// Everything else.
    Clear,
}

impl WeatherCondition {
    /// Classifies free condition text by keyword (case-insensitive).
    /// Rainy keywords win over cloudy ones.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if RAINY_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Self::Rainy
        } else if CLOUDY_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Self::Cloudy
        } else {
            Self::Clear
        }
    }

    /// Font Awesome icon class.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Rainy => "fas fa-cloud-rain",
            Self::Cloudy => "fas fa-cloud",
            Self::Clear => "fas fa-sun",
        }
    }

    /// Bootstrap text colour class.
    #[must_use]
    pub const fn color_class(self) -> &'static str {
        match self {
            Self::Rainy => "text-info",
            Self::Cloudy => "text-secondary",
            Self::Clear => "text-warning",
        }
    }
}

/// Current conditions for one city.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeatherSnapshot {
    /// City name as configured.
    pub city: String,
    /// Temperature in °C.
    pub temperature_c: f64,
    /// Condition text from the provider.
    pub condition: String,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Chance of rain in percent.
    pub rain_probability: f64,
    /// Provider icon URL.
    pub icon_url: Option<String>,
    /// `false` for the sentinel produced by a failed fetch.
    pub available: bool,
}

impl WeatherSnapshot {
    /// Sentinel for a city whose fetch failed.
    #[must_use]
    pub fn unavailable(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            temperature_c: 0.0,
            condition: UNAVAILABLE_CONDITION.to_string(),
            humidity: 0.0,
            rain_probability: 0.0,
            icon_url: None,
            available: false,
        }
    }

    /// Classification of [`WeatherSnapshot::condition`].
    #[must_use]
    pub fn classification(&self) -> WeatherCondition {
        WeatherCondition::classify(&self.condition)
    }
}

/// Snapshots for every configured city, in configuration order.
///
/// Replaced wholesale on each refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct WeatherBoard {
    snapshots: Vec<WeatherSnapshot>,
}

impl WeatherBoard {
    /// Builds a board from snapshots; a later snapshot for an already-present
    /// city is ignored so each city appears once.
    #[must_use]
    pub fn from_snapshots(snapshots: impl IntoIterator<Item = WeatherSnapshot>) -> Self {
        let mut board = Self::default();
        for snapshot in snapshots {
            if board.get(&snapshot.city).is_none() {
                board.snapshots.push(snapshot);
            }
        }
        board
    }

    /// Looks up a city.
    #[must_use]
    pub fn get(&self, city: &str) -> Option<&WeatherSnapshot> {
        self.snapshots.iter().find(|s| s.city == city)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &WeatherSnapshot> {
        self.snapshots.iter()
    }

    /// First snapshot that is not the unavailable sentinel.
    #[must_use]
    pub fn first_available(&self) -> Option<&WeatherSnapshot> {
        self.snapshots.iter().find(|s| s.available)
    }

    /// Number of cities on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` if the board has no cities yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(city: &str, condition: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            city: city.to_string(),
            temperature_c: 24.0,
            condition: condition.to_string(),
            humidity: 60.0,
            rain_probability: 10.0,
            icon_url: None,
            available: true,
        }
    }

    #[test]
    fn classify_keywords() {
        assert_eq!(WeatherCondition::classify("小雨"), WeatherCondition::Rainy);
        assert_eq!(WeatherCondition::classify("Light snow"), WeatherCondition::Rainy);
        assert_eq!(WeatherCondition::classify("Patchy rain nearby"), WeatherCondition::Rainy);
        assert_eq!(WeatherCondition::classify("曇り"), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::classify("Overcast"), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::classify("晴れ"), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::classify(""), WeatherCondition::Clear);
    }

    #[test]
    fn rain_wins_over_cloud() {
        assert_eq!(WeatherCondition::classify("曇り時々雨"), WeatherCondition::Rainy);
    }

    #[test]
    fn icons_follow_classification() {
        assert_eq!(WeatherCondition::Rainy.icon_class(), "fas fa-cloud-rain");
        assert_eq!(WeatherCondition::Cloudy.icon_class(), "fas fa-cloud");
        assert_eq!(WeatherCondition::Clear.icon_class(), "fas fa-sun");
    }

    #[test]
    fn board_keeps_insertion_order_and_unique_cities() {
        let board = WeatherBoard::from_snapshots([
            snapshot("守谷市", "晴れ"),
            snapshot("つくば市", "曇り"),
            snapshot("守谷市", "雨"),
        ]);
        let cities: Vec<_> = board.iter().map(|s| s.city.as_str()).collect();
        assert_eq!(cities, ["守谷市", "つくば市"]);
        assert_eq!(board.get("守谷市").map(|s| s.condition.as_str()), Some("晴れ"));
    }

    #[test]
    fn first_available_skips_sentinels() {
        let board = WeatherBoard::from_snapshots([
            WeatherSnapshot::unavailable("取手市"),
            snapshot("古河市", "晴れ"),
        ]);
        assert_eq!(board.first_available().map(|s| s.city.as_str()), Some("古河市"));
        assert!(!board.is_empty());
        assert_eq!(board.len(), 2);
    }
}

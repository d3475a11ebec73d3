//! Weather loader: one concurrent provider request per configured city.
//!
//! Every city is fetched independently; a city whose fetch fails yields
//! [`WeatherSnapshot::unavailable`] and never affects the other cities.

use futures_util::future::join_all;
use serde::Deserialize;

use crate::domain::{WeatherBoard, WeatherSnapshot};
use crate::error::FeedError;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
    #[serde(default)]
    forecast: Option<Forecast>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
    humidity: f64,
    condition: ConditionText,
}

#[derive(Debug, Deserialize)]
struct ConditionText {
    text: String,
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    #[serde(default)]
    forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    day: DaySummary,
}

#[derive(Debug, Deserialize)]
struct DaySummary {
    #[serde(default)]
    daily_chance_of_rain: f64,
}

/// Fetches current conditions for a fixed list of cities.
#[derive(Debug, Clone)]
pub struct WeatherLoader {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    cities: Vec<String>,
}

impl WeatherLoader {
    /// Creates a loader for `cities`, queried against `base_url`.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        cities: Vec<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            cities,
        }
    }

    /// Configured cities, in display order.
    #[must_use]
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Fetches every city concurrently. Never fails; the result has exactly
    /// one snapshot per configured city, in configuration order.
    pub async fn load(&self) -> WeatherBoard {
        let Some(key) = self.api_key.as_deref() else {
            tracing::warn!(
                cities = self.cities.len(),
                "no weather API key configured, marking all cities unavailable"
            );
            return WeatherBoard::from_snapshots(
                self.cities.iter().map(WeatherSnapshot::unavailable),
            );
        };

        let fetches = self.cities.iter().map(|city| async move {
            match self.fetch_city(key, city).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!(city = %city, error = %e, "weather fetch failed");
                    WeatherSnapshot::unavailable(city.as_str())
                }
            }
        });
        let board = WeatherBoard::from_snapshots(join_all(fetches).await);

        let unavailable = board.iter().filter(|s| !s.available).count();
        tracing::info!(cities = board.len(), unavailable, "weather refreshed");
        board
    }

    async fn fetch_city(&self, key: &str, city: &str) -> Result<WeatherSnapshot, FeedError> {
        let url = format!("{}/forecast.json", self.base_url);
        let query = format!("{city},Japan");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", key),
                ("q", query.as_str()),
                ("days", "1"),
                ("lang", "ja"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))?;
        Ok(snapshot_from_response(city, body))
    }
}

fn snapshot_from_response(city: &str, body: ForecastResponse) -> WeatherSnapshot {
    let rain_probability = body
        .forecast
        .and_then(|f| f.forecastday.into_iter().next())
        .map_or(0.0, |d| d.day.daily_chance_of_rain);

    let icon_url = body.current.condition.icon.map(|icon| {
        if icon.starts_with("//") {
            format!("https:{icon}")
        } else {
            icon
        }
    });

    WeatherSnapshot {
        city: city.to_string(),
        temperature_c: body.current.temp_c,
        condition: body.current.condition.text,
        humidity: body.current.humidity,
        rain_probability,
        icon_url,
        available: true,
    }
}

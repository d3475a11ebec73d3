//! Board configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`); every key has a default so the board starts with no
//! configuration at all, serving fixture events.

use std::net::SocketAddr;
use std::time::Duration;

/// Municipalities covered by the board, in display order.
pub const DEFAULT_CITIES: [&str; 8] = [
    "つくばみらい市",
    "つくば市",
    "守谷市",
    "常総市",
    "取手市",
    "龍ケ崎市",
    "古河市",
    "坂東市",
];

/// Default weather provider base URL.
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.weatherapi.com/v1";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Top-level board configuration.
///
/// Loaded once at startup via [`BoardConfig::from_env`].
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Remote event feed returning `{ "events": [...] }`. `None` serves the
    /// fixture directly.
    pub events_feed_url: Option<String>,

    /// Whether a failed remote load falls back to the fixture.
    pub fixture_fallback_enabled: bool,

    /// Weather provider base URL.
    pub weather_api_url: String,

    /// Weather provider API key. `None` marks every city unavailable.
    pub weather_api_key: Option<String>,

    /// Cities shown on the weather panel and in the city filter.
    pub cities: Vec<String>,

    /// Timeout for outbound requests. `None` leaves the transport default.
    pub http_client_timeout: Option<Duration>,

    /// Timeout for inbound requests.
    pub request_timeout: Duration,

    /// Capacity of the activity broadcast channel.
    pub activity_bus_capacity: usize,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            events_feed_url: None,
            fixture_fallback_enabled: true,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            weather_api_key: None,
            cities: DEFAULT_CITIES.iter().map(|c| (*c).to_string()).collect(),
            http_client_timeout: None,
            request_timeout: Duration::from_secs(30),
            activity_bus_capacity: 1024,
            log_format: LogFormat::Pretty,
        }
    }
}

impl BoardConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file and
    /// falls back to [`BoardConfig::default`] values for unset keys.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as a
    /// [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr: SocketAddr = match std::env::var("LISTEN_ADDR") {
            Ok(addr) => addr.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let cities = parse_list(std::env::var("WEATHER_CITIES").ok().as_deref())
            .unwrap_or(defaults.cities);

        let http_client_timeout = match parse_env::<u64>("HTTP_CLIENT_TIMEOUT_SECS", 0) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            events_feed_url: env_non_empty("EVENTS_FEED_URL"),
            fixture_fallback_enabled: parse_env_bool(
                "FIXTURE_FALLBACK_ENABLED",
                defaults.fixture_fallback_enabled,
            ),
            weather_api_url: env_non_empty("WEATHER_API_URL").unwrap_or(defaults.weather_api_url),
            weather_api_key: env_non_empty("WEATHERAPI_KEY"),
            cities,
            http_client_timeout,
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30)),
            activity_bus_capacity: parse_env(
                "ACTIVITY_BUS_CAPACITY",
                defaults.activity_bus_capacity,
            ),
            log_format,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    parse_bool(std::env::var(key).ok().as_deref()).unwrap_or(default)
}

fn parse_bool(value: Option<&str>) -> Option<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        _ => None,
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Splits a comma-separated list, dropping blanks. `None` if nothing remains.
fn parse_list(value: Option<&str>) -> Option<Vec<String>> {
    let items: Vec<String> = value?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() { None } else { Some(items) }
}

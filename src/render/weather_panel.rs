//! Weather panel: one block per city.

use super::escape::escape_html;
use crate::domain::{WeatherBoard, WeatherSnapshot};

/// Text shown before the first weather load completes.
pub const PENDING_TEXT: &str = "天気情報を取得中...";

const MISSING_VALUE: &str = "--";

fn render_city(snapshot: &WeatherSnapshot) -> String {
    let city = escape_html(&snapshot.city);
    if !snapshot.available {
        return format!(
            r#"<div class="weather-city unavailable" data-city="{city}">
  <div class="weather-icon"><i class="fas fa-question-circle fa-2x text-muted"></i></div>
  <div class="weather-details">
    <div class="weather-name">{city}</div>
    <div class="weather-main">{condition}</div>
    <div class="weather-temp">{MISSING_VALUE}°C</div>
    <div class="weather-humidity">湿度: {MISSING_VALUE}%</div>
    <div class="weather-rain">降水確率: {MISSING_VALUE}%</div>
  </div>
</div>
"#,
            condition = escape_html(&snapshot.condition),
        );
    }

    let classification = snapshot.classification();
    format!(
        r#"<div class="weather-city" data-city="{city}">
  <div class="weather-icon"><i class="{icon} fa-2x {color}"></i></div>
  <div class="weather-details">
    <div class="weather-name">{city}</div>
    <div class="weather-main">{condition}</div>
    <div class="weather-temp">{temp:.1}°C</div>
    <div class="weather-humidity">湿度: {humidity:.0}%</div>
    <div class="weather-rain">降水確率: {rain:.0}%</div>
  </div>
</div>
"#,
        icon = classification.icon_class(),
        color = classification.color_class(),
        condition = escape_html(&snapshot.condition),
        temp = snapshot.temperature_c,
        humidity = snapshot.humidity.round(),
        rain = snapshot.rain_probability.round(),
    )
}

/// Renders the panel. An empty board renders the pending placeholder.
#[must_use]
pub fn render(board: &WeatherBoard) -> String {
    if board.is_empty() {
        return format!(
            r#"<div class="weather-panel pending">
  <div class="weather-details">
    <div class="weather-main">{PENDING_TEXT}</div>
    <div class="weather-temp">{MISSING_VALUE}°C</div>
    <div class="weather-humidity">湿度: {MISSING_VALUE}%</div>
    <div class="weather-rain">降水確率: {MISSING_VALUE}%</div>
  </div>
</div>
"#
        );
    }

    let cities: String = board.iter().map(render_city).collect();
    format!("<div class=\"weather-panel\">\n{cities}</div>\n")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn clear(city: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            city: city.to_string(),
            temperature_c: 28.3,
            condition: "晴れ".to_string(),
            humidity: 55.0,
            rain_probability: 10.0,
            icon_url: None,
            available: true,
        }
    }

    #[test]
    fn empty_board_is_pending() {
        let html = render(&WeatherBoard::default());
        assert!(html.contains(PENDING_TEXT));
        assert!(!html.contains("data-city"));
    }

    #[test]
    fn cities_render_in_board_order() {
        let board = WeatherBoard::from_snapshots([clear("守谷市"), clear("古河市")]);
        let html = render(&board);
        let (Some(first), Some(second)) = (html.find("守谷市"), html.find("古河市")) else {
            panic!("both cities rendered");
        };
        assert!(first < second);
        assert!(html.contains("28.3°C"));
        assert!(html.contains("fas fa-sun"));
    }

    #[test]
    fn unavailable_city_shows_placeholders() {
        let board = WeatherBoard::from_snapshots([WeatherSnapshot::unavailable("取手市")]);
        let html = render(&board);
        assert!(html.contains("取得できません"));
        assert!(html.contains("--°C"));
        assert!(!html.contains(PENDING_TEXT));
    }

    #[test]
    fn condition_text_is_escaped() {
        let mut snapshot = clear("守谷市");
        snapshot.condition = "<script>".to_string();
        let html = render(&WeatherBoard::from_snapshots([snapshot]));
        assert!(html.contains("&lt;script&gt;"));
    }
}

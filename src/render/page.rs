//! Full HTML documents: the board page, the detail page, and the 404 page.

use super::card::{format_count, render_detail, render_event_list};
use super::escape::escape_html;
use super::weather_panel;
use crate::domain::{EventRecord, EventSource, FilterCriteria, LocationType, WeatherBoard};

/// Banner shown when no event source could be used.
pub const UNAVAILABLE_BANNER: &str = "イベント情報を取得できませんでした。時間をおいて再度お試しください。";

/// Everything the board page displays.
#[derive(Debug)]
pub struct BoardView<'a> {
    /// Events after filtering, in display order.
    pub events: &'a [&'a EventRecord],
    /// Source of the loaded sequence.
    pub source: EventSource,
    /// Criteria the form reflects.
    pub criteria: &'a FilterCriteria,
    /// Category options, in first-seen order.
    pub categories: &'a [&'a str],
    /// City options.
    pub cities: &'a [String],
    /// Current weather board.
    pub weather: &'a WeatherBoard,
}

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css">
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css">
</head>
<body>
<nav class="navbar navbar-dark bg-primary mb-4">
  <div class="container"><a class="navbar-brand" href="/"><i class="fas fa-calendar-alt me-2"></i>地域イベント情報</a></div>
</nav>
<main class="container">
{body}</main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn select_options<'a>(
    options: impl Iterator<Item = &'a str>,
    selected: Option<&str>,
    any_label: &str,
) -> String {
    let mut html = format!(r#"<option value="">{any_label}</option>"#);
    for option in options {
        let escaped = escape_html(option);
        let marker = if selected == Some(option) { " selected" } else { "" };
        html.push_str(&format!(r#"<option value="{escaped}"{marker}>{escaped}</option>"#));
    }
    html
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    let marker = if checked { " checked" } else { "" };
    format!(
        r#"<div class="form-check form-check-inline">
    <input class="form-check-input" type="checkbox" id="{name}" name="{name}" value="true"{marker}>
    <label class="form-check-label" for="{name}">{label}</label>
  </div>"#
    )
}

fn render_filter_form(view: &BoardView<'_>) -> String {
    let criteria = view.criteria;
    let categories = select_options(
        view.categories.iter().copied(),
        criteria.category.as_deref(),
        "すべてのカテゴリ",
    );
    let cities = select_options(
        view.cities.iter().map(String::as_str),
        criteria.city.as_deref(),
        "すべての市",
    );

    let location = [
        (LocationType::Any, "屋内・屋外"),
        (LocationType::Indoor, "屋内のみ"),
        (LocationType::Outdoor, "屋外のみ"),
    ]
    .iter()
    .map(|(kind, label)| {
        let marker = if *kind == criteria.location_type { " selected" } else { "" };
        format!(r#"<option value="{}"{marker}>{label}</option>"#, kind.as_form_value())
    })
    .collect::<String>();

    format!(
        r#"<form class="filter-form card card-body mb-3" method="get" action="/">
  <div class="row g-2">
    <div class="col-md-4"><select class="form-select" name="category">{categories}</select></div>
    <div class="col-md-4"><select class="form-select" name="city">{cities}</select></div>
    <div class="col-md-4"><select class="form-select" name="location">{location}</select></div>
  </div>
  <div class="mt-2">
  {free}
  {child}
  {parking}
  <button class="btn btn-primary btn-sm" type="submit"><i class="fas fa-filter me-1"></i>絞り込み</button>
  </div>
</form>
"#,
        free = checkbox("free_only", "無料のみ", criteria.free_only),
        child = checkbox("child_friendly", "子連れOK", criteria.child_friendly_required),
        parking = checkbox("parking_required", "駐車場あり", criteria.parking_required),
    )
}

/// The board: filter form, weather panel, count, and the event list.
#[must_use]
pub fn render_board_page(view: &BoardView<'_>) -> String {
    let banner = if view.source == EventSource::Exhausted {
        format!(r#"<div class="alert alert-danger" role="alert">{UNAVAILABLE_BANNER}</div>"#)
    } else {
        String::new()
    };

    let body = format!(
        r#"{banner}
<div class="row">
  <div class="col-lg-8">
    {form}
    <div class="d-flex justify-content-between align-items-center mb-2">
      <h5 class="mb-0">イベント一覧 <span id="event-count" class="badge bg-secondary">{count}</span></h5>
      <form method="post" action="/refresh"><button class="btn btn-outline-primary btn-sm" type="submit"><i class="fas fa-sync-alt me-1"></i>更新</button></form>
    </div>
    <div id="events-container">
{events}    </div>
  </div>
  <div class="col-lg-4">
    <h5><i class="fas fa-cloud-sun me-2"></i>天気</h5>
{weather}  </div>
</div>
"#,
        form = render_filter_form(view),
        count = format_count(view.events.len()),
        events = render_event_list(view.events),
        weather = weather_panel::render(view.weather),
    );
    document("地域イベント情報", &body)
}

/// Detail page for one event.
#[must_use]
pub fn render_detail_page(event: &EventRecord) -> String {
    let body = format!(
        "{}<p class=\"mt-3\"><a href=\"/\">&larr; 一覧に戻る</a></p>\n",
        render_detail(event)
    );
    document(&event.title, &body)
}

/// Page for an unknown event identifier.
#[must_use]
pub fn render_not_found_page(id: &str) -> String {
    let body = format!(
        r#"<div class="empty-state">
  <h5>イベントが見つかりません</h5>
  <p>ID: {}</p>
  <p><a href="/">&larr; 一覧に戻る</a></p>
</div>
"#,
        escape_html(id)
    );
    document("イベントが見つかりません", &body)
}

//! Card renderer: summary cards, the detail view, and the event list.
//!
//! Field derivations ([`city_badge`], [`truncate_description`],
//! [`event_tags`], [`format_date`], [`score_percent`]) are pure and tested on
//! their own; the `render_*` functions only assemble markup from them. Every
//! free-text field passes through [`escape_html`] before it is embedded.

use std::borrow::Cow;

use chrono::{Datelike, NaiveDate, Weekday};

use super::escape::escape_html;
use crate::domain::EventRecord;

/// Maximum number of description characters shown on a summary card.
pub const DESCRIPTION_EXCERPT_CHARS: usize = 150;

/// Heading of the empty-list placeholder.
pub const EMPTY_LIST_HEADING: &str = "イベントが見つかりません";

const MUNICIPAL_SUFFIX: char = '市';

/// One badge derived from the record's flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTag<'a> {
    /// CSS modifier class.
    pub class: &'static str,
    /// Visible label (unescaped).
    pub label: Cow<'a, str>,
}

impl<'a> EventTag<'a> {
    const fn fixed(class: &'static str, label: &'static str) -> Self {
        Self {
            class,
            label: Cow::Borrowed(label),
        }
    }
}

/// Formats a date in Japanese long form with weekday, e.g. `2025年8月7日木曜日`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    let weekday = match date.weekday() {
        Weekday::Mon => "月曜日",
        Weekday::Tue => "火曜日",
        Weekday::Wed => "水曜日",
        Weekday::Thu => "木曜日",
        Weekday::Fri => "金曜日",
        Weekday::Sat => "土曜日",
        Weekday::Sun => "日曜日",
    };
    format!("{}年{}月{}日{weekday}", date.year(), date.month(), date.day())
}

/// Rounded percentage of a `0.0..=1.0` score, halves rounded up.
#[must_use]
pub fn score_percent(score: f64) -> String {
    format!("{:.0}", (score * 100.0).round())
}

/// The location prefix up to and including the first `市`, if any.
#[must_use]
pub fn city_badge(location: &str) -> Option<&str> {
    let end = location.find(MUNICIPAL_SUFFIX)? + MUNICIPAL_SUFFIX.len_utf8();
    location.get(..end)
}

/// First [`DESCRIPTION_EXCERPT_CHARS`] characters, with `...` appended when
/// anything was cut.
#[must_use]
pub fn truncate_description(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(DESCRIPTION_EXCERPT_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}...", text.get(..cut).unwrap_or(text))),
        None => Cow::Borrowed(text),
    }
}

/// Badges derived from the record's flags, in display order.
#[must_use]
pub fn event_tags(event: &EventRecord) -> Vec<EventTag<'_>> {
    let mut tags = Vec::with_capacity(6);
    tags.push(if event.is_indoor {
        EventTag::fixed("tag-indoor", "屋内")
    } else {
        EventTag::fixed("tag-outdoor", "屋外")
    });
    if event.is_free {
        tags.push(EventTag::fixed("tag-free", "無料"));
    }
    if event.child_friendly {
        tags.push(EventTag::fixed("tag-child-friendly", "子連れOK"));
    }
    if event.has_parking {
        tags.push(EventTag::fixed("tag-parking", "駐車場"));
    }
    if event.weather_dependent == Some(true) {
        tags.push(EventTag::fixed("tag-weather-dependent", "天候依存"));
    }
    if let Some(note) = event.rain_cancellation.as_deref() {
        tags.push(EventTag {
            class: "tag-weather-dependent",
            label: Cow::Borrowed(note),
        });
    }
    tags
}

fn date_line(event: &EventRecord) -> String {
    match event.time.as_deref() {
        Some(time) => format!("{} ({})", format_date(event.date), escape_html(time)),
        None => format_date(event.date),
    }
}

fn detail_href(event: &EventRecord) -> String {
    format!("/events/{}", escape_html(&urlencoding::encode(event.id.as_str())))
}

/// Summary card for the event list.
#[must_use]
pub fn render_summary(event: &EventRecord) -> String {
    let badge = event
        .location
        .as_deref()
        .and_then(city_badge)
        .map(|city| format!(r#"<span class="badge bg-info ms-2">{}</span>"#, escape_html(city)))
        .unwrap_or_default();

    let description = event
        .description
        .as_deref()
        .map(|d| {
            format!(
                r#"<div class="event-description">{}</div>"#,
                escape_html(&truncate_description(d))
            )
        })
        .unwrap_or_default();

    let tags: String = event_tags(event)
        .iter()
        .map(|t| format!(r#"<span class="event-tag {}">{}</span>"#, t.class, escape_html(&t.label)))
        .collect();

    format!(
        r#"<div class="card event-card" data-event-id="{id}">
  <div class="card-body position-relative">
    <div class="suitability-score">適合度: {score}%</div>
    <h5 class="event-title"><a href="{href}">{title}</a></h5>
    <div class="event-date"><i class="fas fa-calendar me-1"></i>{date}</div>
    <div class="event-location"><i class="fas fa-map-marker-alt me-1"></i>{location}{badge}</div>
    {description}
    <div class="event-tags">{tags}</div>
  </div>
</div>
"#,
        id = escape_html(event.id.as_str()),
        score = score_percent(event.suitability_score),
        href = detail_href(event),
        title = escape_html(&event.title),
        date = date_line(event),
        location = escape_html(event.location_label()),
    )
}

fn is_web_link(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Detail view of one event.
#[must_use]
pub fn render_detail(event: &EventRecord) -> String {
    let mut features = Vec::with_capacity(4);
    features.push(if event.is_indoor {
        r#"<li><i class="fas fa-home text-primary me-1"></i>屋内イベント</li>"#
    } else {
        r#"<li><i class="fas fa-tree text-success me-1"></i>屋外イベント</li>"#
    });
    features.push(if event.is_free {
        r#"<li><i class="fas fa-gift text-danger me-1"></i>無料</li>"#
    } else {
        r#"<li><i class="fas fa-yen-sign text-warning me-1"></i>有料</li>"#
    });
    if event.child_friendly {
        features.push(r#"<li><i class="fas fa-baby text-warning me-1"></i>子連れOK</li>"#);
    }
    if event.has_parking {
        features.push(r#"<li><i class="fas fa-car text-info me-1"></i>駐車場あり</li>"#);
    }

    let rain_note = event
        .rain_cancellation
        .as_deref()
        .map(|note| format!(r#"<p class="rain-policy">雨天時: {}</p>"#, escape_html(note)))
        .unwrap_or_default();

    let source_link = event
        .source_url
        .as_deref()
        .filter(|url| is_web_link(url))
        .map(|url| {
            format!(
                r#"<a class="btn btn-outline-primary" href="{}" target="_blank" rel="noopener noreferrer">詳細を見る</a>"#,
                escape_html(url)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="event-detail" data-event-id="{id}">
  <h4 class="event-title">{title}</h4>
  <div class="row">
    <div class="col-md-6">
      <h6><i class="fas fa-calendar me-2"></i>日時</h6>
      <p>{date}</p>
      <h6><i class="fas fa-map-marker-alt me-2"></i>場所</h6>
      <p>{location}</p>
      <h6><i class="fas fa-tag me-2"></i>カテゴリ</h6>
      <p>{category}</p>
    </div>
    <div class="col-md-6">
      <h6><i class="fas fa-info-circle me-2"></i>詳細</h6>
      <p>{description}</p>
      <h6><i class="fas fa-star me-2"></i>特徴</h6>
      <ul class="list-unstyled">{features}</ul>
      {rain_note}
    </div>
  </div>
  {source_link}
</div>
"#,
        id = escape_html(event.id.as_str()),
        title = escape_html(&event.title),
        date = date_line(event),
        location = escape_html(event.location_label()),
        category = escape_html(event.category_label()),
        description = escape_html(event.description_label()),
        features = features.concat(),
    )
}

/// Count label, e.g. `12件`.
#[must_use]
pub fn format_count(count: usize) -> String {
    format!("{count}件")
}

/// The cards for `events`, or the empty placeholder.
#[must_use]
pub fn render_event_list(events: &[&EventRecord]) -> String {
    if events.is_empty() {
        return format!(
            r#"<div class="empty-state">
  <i class="fas fa-calendar-times"></i>
  <h5>{EMPTY_LIST_HEADING}</h5>
  <p>現在、おすすめのイベントはありません。</p>
</div>
"#
        );
    }
    events.iter().map(|event| render_summary(event)).collect()
}

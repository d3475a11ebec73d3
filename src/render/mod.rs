//! Server-side HTML rendering.
//!
//! Renderers are pure functions from domain values to markup. They never
//! touch application state; handlers pass them a snapshot.

pub mod card;
pub mod escape;
pub mod page;
pub mod weather_panel;

pub use card::{
    city_badge, event_tags, format_count, format_date, render_detail, render_event_list,
    render_summary, truncate_description,
};
pub use escape::escape_html;
pub use page::{BoardView, render_board_page, render_detail_page, render_not_found_page};

//! # event-board
//!
//! Community event board for a group of neighbouring municipalities: a list
//! of local events with filters, per-city weather, and weather-aware
//! recommendations, served as server-rendered HTML plus a JSON API.
//!
//! Events are loaded from a remote feed and fall back to an embedded fixture
//! when the feed is unavailable. Weather is fetched per city, concurrently;
//! a failing city is shown as unavailable without affecting the others.
//!
//! ## Architecture
//!
//! ```text
//! Browser / API clients
//!     │
//!     ├── HTML board + JSON handlers (api/)
//!     ├── Renderers (render/)
//!     │
//!     ├── BoardService (service/)
//!     ├── ActivityBus → analytics sinks (domain/)
//!     │
//!     ├── BoardStore: events + weather, ticketed commits (domain/)
//!     ├── Filter engine, suitability scoring (domain/)
//!     │
//!     └── EventLoader / WeatherLoader → remote feed, weather provider (feed/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod render;
pub mod service;

//! Service layer: business logic orchestration.
//!
//! [`BoardService`] runs the loaders, commits their results to the
//! [`crate::domain::BoardStore`], and reports activity through the
//! [`crate::domain::ActivityBus`].

pub mod board_service;

pub use board_service::{BoardService, EventsRefresh, FilteredBoard, RefreshSummary, WeatherRefresh};

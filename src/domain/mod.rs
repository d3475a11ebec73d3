//! Domain layer: event records, filtering, weather, scoring and board state.
//!
//! Everything here is free of I/O apart from the activity bus, so the
//! filter and scoring pipeline can be tested without a network or a
//! rendering surface.

pub mod activity;
pub mod activity_bus;
pub mod board_state;
pub mod event_record;
pub mod filter;
pub mod fixture;
pub mod suitability;
pub mod weather;

pub use activity::BoardActivity;
pub use activity_bus::ActivityBus;
pub use board_state::{BoardState, BoardStore, EventSource, LoadTicket};
pub use event_record::{EventId, EventRecord, RawEventRecord};
pub use filter::{FilterCriteria, LocationType};
pub use suitability::Recommendation;
pub use weather::{WeatherBoard, WeatherCondition, WeatherSnapshot};

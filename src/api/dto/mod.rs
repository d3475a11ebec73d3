//! Data Transfer Objects for query parsing and JSON responses.

pub mod event_dto;
pub mod filter_dto;

pub use event_dto::*;
pub use filter_dto::*;

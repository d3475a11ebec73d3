//! Upstream feeds: the remote event feed and the weather provider.
//!
//! Both loaders absorb every upstream failure. The event loader falls back
//! to the embedded fixture; the weather loader degrades a failing city to an
//! unavailable snapshot.

pub mod event_loader;
pub mod weather_loader;

use std::time::Duration;

pub use event_loader::{EventLoader, LoadOutcome};
pub use weather_loader::WeatherLoader;

use crate::error::FeedError;

/// Builds the shared outbound HTTP client.
///
/// # Errors
///
/// Returns [`FeedError::Transport`] if the TLS backend cannot be
/// initialised.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, FeedError> {
    let mut builder =
        reqwest::Client::builder().user_agent(concat!("event-board/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

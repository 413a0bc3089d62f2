//! Event subscriber trait.

use async_trait::async_trait;

use crate::events::Event;

/// Receives every lifecycle event, in publish order, from the run's fan-out
/// listener.
///
/// Handlers run in the listener task: keep them fast or hand the event off
/// to a channel, a slow subscriber delays delivery to the ones after it.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    async fn on_event(&self, event: &Event);
}

//! # Lifecycle events emitted by the supervisor.
//!
//! [`EventKind`] classifies the externally observable transitions of a run;
//! [`Event`] carries the metadata (component name, error text, timestamps).
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically, so consumers can order events correctly even when they are
//! delivered through async channels.
//!
//! ## Example
//! ```
//! use compvisor::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::RunFailed)
//!     .with_component("storage")
//!     .with_error("connection refused");
//!
//! assert_eq!(ev.kind, EventKind::RunFailed);
//! assert_eq!(ev.component.as_deref(), Some("storage"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Per-component transitions ===
    /// The component's `run` is about to be entered (parents are ready).
    Starting,
    /// The component signaled readiness.
    Ready,
    /// The component failed its readiness probe or timed out starting.
    ProbeFailed,
    /// The component's `run` returned cleanly.
    Closed,
    /// The component stopped as part of a cascade shutdown.
    Cascade,
    /// The component's `run` returned an error.
    RunFailed,

    // === Run-wide transitions ===
    /// An OS termination signal was received.
    ShutdownRequested,
    /// The lifecycle began shutting components down.
    Stopping,
    /// Every supervision task has returned.
    Stopped,
}

/// Lifecycle event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp (may go backwards, use for logging only).
    pub at: SystemTime,
    /// The kind of event.
    pub kind: EventKind,
    /// Display name of the component, if the event concerns one.
    pub component: Option<String>,
    /// Error message, if the event represents a failure.
    pub error: Option<String>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            component: None,
            error: None,
        }
    }

    /// Attaches a component display name.
    pub fn with_component(mut self, name: impl Into<String>) -> Self {
        self.component = Some(name.into());
        self
    }

    /// Attaches an error message.
    pub fn with_error(mut self, msg: impl Into<String>) -> Self {
        self.error = Some(msg.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::now(EventKind::Starting);
        let b = Event::now(EventKind::Ready);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn builders_attach_metadata() {
        let ev = Event::now(EventKind::ProbeFailed)
            .with_component("cache")
            .with_error("boom");
        assert_eq!(ev.component.as_deref(), Some("cache"));
        assert_eq!(ev.error.as_deref(), Some("boom"));
    }
}

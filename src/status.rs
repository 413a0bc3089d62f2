//! # Coarse externally observable lifecycle state.
//!
//! [`LifecycleStatus`] moves through `Idle → Running → Ready → Stopping →
//! Stopped`, with `Ready` skipped when a failure lands before all components
//! signal readiness.
//!
//! ## Rules
//! - `Ready` is only reachable from `Running`.
//! - `Stopping` is only reachable from `Running` or `Ready`.
//! - Invalid transitions are silently ignored, so concurrent signalers may
//!   race without corrupting the sequence.
//! - Observed values form a non-decreasing sequence in the derived order.
//!
//! The cell is backed by a [`tokio::sync::watch`] channel: writers serialize
//! inside `send_if_modified`, readers never block, and [`StatusCell::watch`]
//! hands out the subscribable change notification.

use tokio::sync::watch;

/// Current state of the lifecycle supervisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleStatus {
    /// No run in progress.
    Idle,
    /// Components are starting up.
    Running,
    /// All components signaled readiness.
    Ready,
    /// Components are shutting down.
    Stopping,
    /// All supervision tasks have returned.
    Stopped,
}

impl LifecycleStatus {
    /// Short lowercase name, suitable for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStatus::Idle => "idle",
            LifecycleStatus::Running => "running",
            LifecycleStatus::Ready => "ready",
            LifecycleStatus::Stopping => "stopping",
            LifecycleStatus::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, watchable status holder.
#[derive(Clone)]
pub(crate) struct StatusCell {
    tx: watch::Sender<LifecycleStatus>,
}

impl StatusCell {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(LifecycleStatus::Idle);
        Self { tx }
    }

    /// Attempts the transition to `next`. Returns `true` if the status
    /// changed, `false` if the transition was rejected or a no-op.
    pub(crate) fn advance(&self, next: LifecycleStatus) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == next || !allowed(*current, next) {
                return false;
            }
            *current = next;
            true
        })
    }

    pub(crate) fn get(&self) -> LifecycleStatus {
        *self.tx.borrow()
    }

    pub(crate) fn watch(&self) -> watch::Receiver<LifecycleStatus> {
        self.tx.subscribe()
    }
}

/// Transition table. `Idle → Running` and `Stopping → Stopped` carry no
/// precondition beyond not regressing; the rest are gated explicitly.
fn allowed(from: LifecycleStatus, to: LifecycleStatus) -> bool {
    match to {
        LifecycleStatus::Ready => from == LifecycleStatus::Running,
        LifecycleStatus::Stopping => {
            from == LifecycleStatus::Running || from == LifecycleStatus::Ready
        }
        _ => to > from,
    }
}

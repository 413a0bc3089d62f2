//! # Causal cancellation scope.
//!
//! [`Scope`] is a [`CancellationToken`] paired with a write-once cause slot.
//! Plain cancellation is not enough for the engine: it must distinguish an
//! orderly stop from a cascade and from a specific component failure, so
//! every cancellation carries a cause.
//!
//! ## Rules
//! - [`Scope::close`] records a cause and cancels; the **first cause wins**,
//!   later closes are no-ops.
//! - A `None` cause is the well-known "canceled without error" signal: it
//!   reads as *ready* on probe scopes and *orderly stop* on run scopes.
//! - The cause is stored before the token is canceled, so any task woken by
//!   [`Scope::closed`] observes the final cause.

use std::sync::{Arc, OnceLock};

use tokio_util::sync::CancellationToken;

use crate::error::LifecycleError;

/// Cancellable scope carrying a write-once cancellation cause.
///
/// Cheap to clone; all clones share the same token and cause slot.
#[derive(Clone)]
pub struct Scope {
    inner: Arc<Inner>,
}

struct Inner {
    token: CancellationToken,
    cause: OnceLock<Option<LifecycleError>>,
}

impl Scope {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                token: CancellationToken::new(),
                cause: OnceLock::new(),
            }),
        }
    }

    /// Closes the scope with the given cause. Returns `true` if this call
    /// recorded the cause, `false` if the scope was already closed.
    pub(crate) fn close(&self, cause: Option<LifecycleError>) -> bool {
        let first = self.inner.cause.set(cause).is_ok();
        if first {
            self.inner.token.cancel();
        }
        first
    }

    /// Completes when the scope is closed.
    pub async fn cancelled(&self) {
        self.inner.token.cancelled().await;
    }

    /// Returns `true` once the scope has been closed.
    pub fn is_cancelled(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    /// Waits for the scope to close and returns its failure cause, `None`
    /// meaning the scope was canceled without error.
    pub async fn closed(&self) -> Option<LifecycleError> {
        self.cancelled().await;
        self.cause()
    }

    /// Returns the recorded failure cause, if any. `None` both while the
    /// scope is open and after an orderly close; pair with
    /// [`Scope::is_cancelled`] when the distinction matters.
    pub fn cause(&self) -> Option<LifecycleError> {
        self.inner.cause.get().cloned().flatten()
    }
}

/// One-shot broadcast barrier releasing every supervision task at once.
///
/// All per-component state records must exist before any task may look at
/// another component's scopes; the gate opens once, after allocation.
#[derive(Clone)]
pub(crate) struct StartGate {
    token: CancellationToken,
}

impl StartGate {
    pub(crate) fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    pub(crate) fn open(&self) {
        self.token.cancel();
    }

    pub(crate) async fn released(&self) {
        self.token.cancelled().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_cause_wins() {
        let scope = Scope::new();
        assert!(scope.close(Some(LifecycleError::UnexpectedClose)));
        assert!(!scope.close(Some(LifecycleError::CascadeClose)));
        assert_eq!(scope.cause(), Some(LifecycleError::UnexpectedClose));
    }

    #[tokio::test]
    async fn orderly_close_reads_as_no_failure() {
        let scope = Scope::new();
        assert!(scope.close(None));
        assert!(scope.is_cancelled());
        assert_eq!(scope.closed().await, None);
        // A later failure does not overwrite the orderly close.
        assert!(!scope.close(Some(LifecycleError::CascadeClose)));
        assert_eq!(scope.cause(), None);
    }

    #[tokio::test]
    async fn waiters_observe_the_cause() {
        let scope = Scope::new();
        let waiter = {
            let scope = scope.clone();
            tokio::spawn(async move { scope.closed().await })
        };
        scope.close(Some(LifecycleError::failure("boom")));
        let cause = waiter.await.unwrap();
        assert_eq!(cause, Some(LifecycleError::failure("boom")));
    }

    #[tokio::test]
    async fn gate_releases_all_waiters() {
        let gate = StartGate::new();
        let mut handles = Vec::new();
        for _ in 0..4 {
            let gate = gate.clone();
            handles.push(tokio::spawn(async move { gate.released().await }));
        }
        gate.open();
        for h in handles {
            h.await.unwrap();
        }
    }
}

//! # Component contract and handle types.
//!
//! A [`Component`] is a long-running unit of execution exposing a single
//! [`run`](Component::run) operation. The shared handle type is
//! [`ComponentRef`], an `Arc<dyn Component>`; handle identity is the `Arc`
//! allocation address, captured as [`ComponentId`].
//!
//! ## Run contract
//! - `run` MAY consume its [`ReadySignal`] at most once (the type enforces
//!   this: both [`ReadySignal::ready`] and [`ReadySignal::fail`] take `self`).
//! - `run` MUST block until its [`Scope`] is canceled or a fatal internal
//!   condition occurs, then return.
//! - Returning `Ok(())` while the scope was never canceled is treated as an
//!   unexpected close and tears the whole lifecycle down.
//!
//! # Example
//! ```
//! use async_trait::async_trait;
//! use compvisor::{Component, LifecycleError, ReadySignal, Scope};
//!
//! struct Heartbeat;
//!
//! #[async_trait]
//! impl Component for Heartbeat {
//!     fn name(&self) -> &str {
//!         "heartbeat"
//!     }
//!
//!     async fn run(&self, scope: Scope, ready: ReadySignal) -> Result<(), LifecycleError> {
//!         ready.ready();
//!         scope.cancelled().await;
//!         Ok(())
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::Scope;
use crate::error::LifecycleError;

/// Shared handle to a component object.
///
/// Two handles denote the same component iff they point at the same
/// allocation; see [`ComponentId`].
pub type ComponentRef = Arc<dyn Component>;

/// A long-running, supervised unit of execution.
#[async_trait]
pub trait Component: Send + Sync + 'static {
    /// Returns a stable, human-readable display name used in logs and the
    /// exported dependency graph.
    fn name(&self) -> &str;

    /// Returns the handles of other registered components this one depends
    /// on. Handles pointing at unregistered values and the component itself
    /// are ignored by the engine.
    fn dependencies(&self) -> Vec<ComponentRef> {
        Vec::new()
    }

    /// Executes the component until its scope is canceled or a fatal
    /// internal condition occurs.
    ///
    /// Consume `ready` once readiness is established; drop it (or call
    /// [`ReadySignal::fail`]) to report a readiness failure or let the start
    /// timeout fire.
    async fn run(&self, scope: Scope, ready: ReadySignal) -> Result<(), LifecycleError>;
}

/// Opaque component identity, comparable and hashable.
///
/// Derived from the `Arc` data-pointer address, which is stable for as long
/// as any handle is alive. The registration table holds a handle for every
/// registered component, so ids are stable across a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Returns the identity of the given handle.
    pub fn of(component: &ComponentRef) -> Self {
        ComponentId(Arc::as_ptr(component) as *const () as usize)
    }
}

/// One-shot readiness probe handed to [`Component::run`].
///
/// Consuming the signal closes the component's probe scope; the consuming
/// methods make "at most once" a compile-time property.
pub struct ReadySignal {
    probe: Scope,
}

impl ReadySignal {
    pub(crate) fn new(probe: Scope) -> Self {
        Self { probe }
    }

    /// Reports the component ready to serve.
    pub fn ready(self) {
        self.probe.close(None);
    }

    /// Reports a fatal readiness failure; the lifecycle will cascade down.
    pub fn fail(self, cause: LifecycleError) {
        self.probe.close(Some(cause));
    }
}

//! # ComponentActor: single-component supervision task.
//!
//! One actor per component, spawned into the runner `JoinSet`. Its life has
//! four phases:
//!
//! ```text
//! 1. gate      wait for the one-shot start barrier
//! 2. barrier   await every parent's probe scope; abort on the first failure
//! 3. run       invoke Component::run(run_scope, ready_signal)
//! 4. post-run  record the lifecycle cause, publish the terminal event,
//!              close the teardown scope with the run result
//! ```
//!
//! A child watcher runs alongside phases 2-4 and enforces
//! child-stopped-before-parent ordering: the run scope is not canceled by the
//! lifecycle until every child's teardown scope has fired, but a failing
//! child cancels the parent immediately with the child's own error.
//!
//! ## Rules
//! - The teardown scope fires exactly once, after `run` returns, carrying
//!   the run result as cause.
//! - `Ok(())` from `run` records `UnexpectedClose` on the lifecycle scope;
//!   during an ordered shutdown the scope is already closed and the record
//!   is a no-op.
//! - The actor's return value is the component's run result (or the parent
//!   failure that prevented the run); the facade keeps the first error in
//!   completion order as the run verdict.

use std::sync::Arc;

use crate::components::{ComponentRef, ReadySignal};
use crate::core::scope::{Scope, StartGate};
use crate::core::state::ComponentState;
use crate::error::LifecycleError;
use crate::events::{Bus, Event, EventKind};

pub(crate) struct ComponentActor {
    pub(crate) component: ComponentRef,
    pub(crate) state: Arc<ComponentState>,
    pub(crate) parents: Vec<Arc<ComponentState>>,
    pub(crate) children: Vec<Arc<ComponentState>>,
    pub(crate) lifecycle: Scope,
    pub(crate) gate: StartGate,
    pub(crate) bus: Bus,
}

impl ComponentActor {
    pub(crate) async fn run(self) -> Result<(), LifecycleError> {
        let watcher = tokio::spawn(watch_children(
            self.children.clone(),
            self.lifecycle.clone(),
            self.state.run.clone(),
        ));

        self.gate.released().await;

        if let Some(err) = self.await_parents().await {
            self.state.probe.close(Some(err.clone()));
            self.state.run.close(Some(err.clone()));
            self.state.teardown.close(Some(err.clone()));
            let _ = watcher.await;
            return Err(err);
        }

        self.bus
            .publish(Event::now(EventKind::Starting).with_component(&self.state.name));

        let ready = ReadySignal::new(self.state.probe.clone());
        let result = self
            .component
            .run(self.state.run.clone(), ready)
            .await;

        match &result {
            Ok(()) => {
                // Unexpected only if nothing recorded a cause yet.
                self.lifecycle.close(Some(LifecycleError::UnexpectedClose));
                self.bus
                    .publish(Event::now(EventKind::Closed).with_component(&self.state.name));
            }
            Err(err) if *err == LifecycleError::CascadeClose => {
                self.lifecycle.close(Some(err.clone()));
                self.bus
                    .publish(Event::now(EventKind::Cascade).with_component(&self.state.name));
            }
            Err(err) => {
                self.lifecycle.close(Some(err.clone()));
                self.bus.publish(
                    Event::now(EventKind::RunFailed)
                        .with_component(&self.state.name)
                        .with_error(err.to_string()),
                );
            }
        }

        self.state
            .teardown
            .close(result.as_ref().err().cloned());
        let _ = watcher.await;
        result
    }

    /// Phase 2: readiness of every parent, aborting on the first failure.
    /// A parent's probe closed without error means ready; a propagated
    /// orderly cancellation reads the same way and lets the component enter
    /// `run` to observe its already-canceled scope.
    async fn await_parents(&self) -> Option<LifecycleError> {
        for parent in &self.parents {
            if let Some(err) = parent.probe.closed().await {
                return Some(err);
            }
        }
        None
    }
}

/// Child-stopped-before-parent ordering.
///
/// Waits for each child's teardown scope; a failing child cancels this
/// component's run scope with the child's error right away. Once all
/// children stopped (or after the failure), the lifecycle's own cause is
/// propagated. The task always terminates: the lifecycle scope is closed by
/// the end of every run.
async fn watch_children(children: Vec<Arc<ComponentState>>, lifecycle: Scope, run: Scope) {
    for child in &children {
        if let Some(err) = child.teardown.closed().await {
            run.close(Some(err));
            break;
        }
    }

    let cause = lifecycle.closed().await;
    run.close(cause);
}

//! # Lifecycle: the public facade.
//!
//! Owns the registration table, the status cell, and the subscriber list;
//! [`Lifecycle::run`] wires a single run together:
//!
//! ```text
//! run(parent_token, on_ready)
//!   ├─ build dependency graph (cycle policy applied)      → abort on reject
//!   ├─ export DOT file (optional)
//!   ├─ allocate one ComponentState per component
//!   ├─ spawn: fan-out listener, cancel watcher, stopping watcher
//!   ├─ spawn one ComponentActor + one probe waiter per component
//!   ├─ status → Running, open the start gate
//!   ├─ drain actors (first error in completion order = verdict)
//!   └─ status → Stopped, publish Stopped, join every helper task
//! ```
//!
//! ## Rules
//! - The registration table and graph are immutable once the run starts.
//! - The readiness callback fires exactly once.
//! - `run` returns the first non-orderly error observed anywhere; `Ok(())`
//!   only when shutdown was ordered and no component returned an error.
//! - After `run` returns no supervision task, probe waiter, or child
//!   watcher remains runnable.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::components::{Component, ComponentId, ComponentRef, ReadySignal, Registry};
use crate::config::Config;
use crate::core::actor::ComponentActor;
use crate::core::probe::{aggregate_readiness, probe_waiter};
use crate::core::scope::{Scope, StartGate};
use crate::core::signal::wait_for_shutdown_signal;
use crate::core::state::ComponentState;
use crate::error::LifecycleError;
use crate::events::{Bus, Event, EventKind};
use crate::graph::{DepGraph, Graph, write_graph_file};
use crate::status::{LifecycleStatus, StatusCell};
use crate::subscribers::Subscribe;

/// Supervises registered components: brings them up in dependency order,
/// watches them run, cascades failures, and tears them down children-first.
pub struct Lifecycle {
    cfg: Config,
    registry: Registry,
    status: StatusCell,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl Lifecycle {
    /// Creates an empty lifecycle with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            registry: Registry::new(),
            status: StatusCell::new(),
            subscribers: Vec::new(),
        }
    }

    /// Adds an event subscriber. Subscribers receive every run event through
    /// a fan-out listener, in publish order.
    pub fn subscribe(&mut self, subscriber: Arc<dyn Subscribe>) {
        self.subscribers.push(subscriber);
    }

    /// Registers a component.
    pub fn register(&mut self, component: ComponentRef) {
        self.registry.register(component, &[]);
    }

    /// Registers a component with explicitly declared parents, for cases the
    /// component cannot (or should not) report through
    /// [`Component::dependencies`]. Parents are registered transitively;
    /// duplicate registrations merge.
    pub fn register_with(&mut self, component: ComponentRef, implicit_parents: &[ComponentRef]) {
        self.registry.register(component, implicit_parents);
    }

    /// Current coarse lifecycle state.
    pub fn status(&self) -> LifecycleStatus {
        self.status.get()
    }

    /// Subscribable status change notification.
    pub fn watch_status(&self) -> watch::Receiver<LifecycleStatus> {
        self.status.watch()
    }

    /// Snapshot of parent relations for inspection, keyed by handle
    /// identity. Cycle policy is not applied here; the map reflects the
    /// declared and implicit edges as registered.
    pub fn dependencies(&self) -> HashMap<ComponentId, Vec<ComponentRef>> {
        let mut deps = HashMap::with_capacity(self.registry.len());
        for (id, reg) in self.registry.iter() {
            let mut parents = Vec::new();
            let mut seen = std::collections::HashSet::new();
            for dep in reg.component.dependencies() {
                let dep_id = ComponentId::of(&dep);
                if dep_id != id && self.registry.contains(dep_id) && seen.insert(dep_id) {
                    parents.push(dep);
                }
            }
            for (candidate, creg) in self.registry.iter() {
                if reg.implicit.contains(&candidate) && candidate != id && seen.insert(candidate) {
                    parents.push(creg.component.clone());
                }
            }
            deps.insert(id, parents);
        }
        deps
    }

    /// Builds the exportable dependency graph, applying the configured cycle
    /// policy.
    pub fn build_graph(&self) -> Result<Graph, LifecycleError> {
        let graph = DepGraph::build(&self.registry, self.cfg.cycles)?;
        Ok(Graph::snapshot(&self.registry, &graph))
    }

    /// Starts supervision and blocks until every supervision task has
    /// returned.
    ///
    /// Cancellation of `parent` orders a graceful shutdown. `on_ready` is
    /// invoked exactly once with `None` when all components became ready, or
    /// with the first readiness failure. The return value is the first
    /// non-orderly error observed anywhere; `Ok(())` means shutdown was
    /// ordered and every component stopped cleanly.
    pub async fn run(
        &self,
        parent: CancellationToken,
        on_ready: impl FnOnce(Option<LifecycleError>) + Send + 'static,
    ) -> Result<(), LifecycleError> {
        let graph = DepGraph::build(&self.registry, self.cfg.cycles)?;
        if let Some(path) = &self.cfg.graph_file {
            write_graph_file(path, &Graph::snapshot(&self.registry, &graph))?;
        }

        let bus = Bus::new(self.cfg.bus_capacity);
        let listener = self.spawn_fanout(&bus);

        let lifecycle = Scope::new();
        let canceler = tokio::spawn(cancel_watcher(
            parent,
            lifecycle.clone(),
            bus.clone(),
            self.cfg.shutdown_signal,
        ));

        // Every state record must exist before the gate opens.
        let mut states: HashMap<ComponentId, Arc<ComponentState>> = HashMap::new();
        for (id, reg) in self.registry.iter() {
            states.insert(id, Arc::new(ComponentState::new(reg.name.clone())));
        }

        let gate = StartGate::new();
        let mut runner: JoinSet<Result<(), LifecycleError>> = JoinSet::new();
        let mut prober: JoinSet<Result<(), LifecycleError>> = JoinSet::new();

        for (id, reg) in self.registry.iter() {
            let state = states[&id].clone();
            let parents = graph
                .parents_of(id)
                .iter()
                .map(|p| states[p].clone())
                .collect();
            let children = graph
                .children_of(id)
                .iter()
                .map(|c| states[c].clone())
                .collect();

            runner.spawn(
                ComponentActor {
                    component: reg.component.clone(),
                    state: state.clone(),
                    parents,
                    children,
                    lifecycle: lifecycle.clone(),
                    gate: gate.clone(),
                    bus: bus.clone(),
                }
                .run(),
            );
            prober.spawn(probe_waiter(
                state,
                lifecycle.clone(),
                self.cfg.start_timeout,
                bus.clone(),
            ));
        }

        let stopping = tokio::spawn(stopping_watcher(
            lifecycle.clone(),
            bus.clone(),
            self.status.clone(),
        ));
        let aggregator = tokio::spawn(aggregate_readiness(
            prober,
            self.status.clone(),
            on_ready,
        ));

        self.status.advance(LifecycleStatus::Running);
        gate.open();

        // First error in completion order becomes the run verdict.
        let mut first_err: Option<LifecycleError> = None;
        while let Some(joined) = runner.join_next().await {
            let result = match joined {
                Ok(result) => result,
                Err(err) => {
                    let err = LifecycleError::failure(err.to_string());
                    lifecycle.close(Some(err.clone()));
                    Err(err)
                }
            };
            if let Err(err) = result {
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }

        // Settle the scope for runs with no components (or none that ever
        // recorded a cause) so the helper tasks can finish.
        lifecycle.close(None);

        let _ = aggregator.await;
        let _ = stopping.await;
        let _ = canceler.await;

        let verdict = first_err.or_else(|| lifecycle.cause());
        let mut stopped = Event::now(EventKind::Stopped);
        if let Some(err) = &verdict {
            stopped = stopped.with_error(err.to_string());
        }
        bus.publish(stopped);
        self.status.advance(LifecycleStatus::Stopped);

        drop(bus);
        let _ = listener.await;

        match verdict {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Spawns the fan-out listener delivering every event to every
    /// subscriber, in publish order. Runs until the per-run bus is dropped.
    fn spawn_fanout(&self, bus: &Bus) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        let subs = self.subscribers.clone();

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => {
                        for sub in &subs {
                            sub.on_event(&ev).await;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
        })
    }
}

/// Feeds parent cancellation (and optionally OS signals) into the lifecycle
/// scope as an orderly close. Terminates once the lifecycle scope settles.
async fn cancel_watcher(parent: CancellationToken, lifecycle: Scope, bus: Bus, signals: bool) {
    let signal = async {
        if signals {
            match wait_for_shutdown_signal().await {
                Ok(()) => {}
                // Signal registration failed: fall back to parent-only.
                Err(_) => std::future::pending().await,
            }
        } else {
            std::future::pending().await
        }
    };

    tokio::select! {
        _ = parent.cancelled() => {
            lifecycle.close(None);
        }
        _ = signal => {
            bus.publish(Event::now(EventKind::ShutdownRequested));
            lifecycle.close(None);
        }
        _ = lifecycle.cancelled() => {}
    }
}

/// Publishes the run-wide stopping transition once the lifecycle scope
/// settles.
async fn stopping_watcher(lifecycle: Scope, bus: Bus, status: StatusCell) {
    let cause = lifecycle.closed().await;
    let mut ev = Event::now(EventKind::Stopping);
    if let Some(err) = &cause {
        ev = ev.with_error(err.to_string());
    }
    bus.publish(ev);
    status.advance(LifecycleStatus::Stopping);
}

/// A fully-registered lifecycle is itself a component: readiness and
/// cancellation bridge through the scope/probe contract, so lifecycles nest.
#[async_trait]
impl Component for Lifecycle {
    fn name(&self) -> &str {
        "lifecycle"
    }

    async fn run(&self, scope: Scope, ready: ReadySignal) -> Result<(), LifecycleError> {
        let parent = CancellationToken::new();
        let bridge = {
            let scope = scope.clone();
            let parent = parent.clone();
            tokio::spawn(async move {
                scope.cancelled().await;
                parent.cancel();
            })
        };

        let result = Lifecycle::run(self, parent, move |verdict| match verdict {
            None => ready.ready(),
            Some(err) => ready.fail(err),
        })
        .await;

        bridge.abort();
        result
    }
}

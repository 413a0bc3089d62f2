//! Runtime core: orchestration and supervision.
//!
//! The only public API re-exported from here is [`Lifecycle`] and the
//! [`Scope`] handed to components; everything else is an internal building
//! block the facade wires together.
//!
//! ## Files & responsibilities
//! - **lifecycle.rs**: public facade; builds the graph, allocates state
//!   records, spawns actors/waiters/watchers, drives status and the final
//!   verdict.
//! - **actor.rs**: per-component supervision task (gate → parent barrier →
//!   run → post-run) plus the child watcher enforcing
//!   child-stopped-before-parent teardown.
//! - **probe.rs**: per-component probe waiter under the start deadline and
//!   the readiness aggregator delivering the single verdict.
//! - **scope.rs**: causal cancellation scope (token + write-once cause) and
//!   the one-shot start gate.
//! - **state.rs**: the probe/run/teardown scope record per component.
//! - **signal.rs**: OS signal handling, wired in when configured.
//!
//! ## Wiring (module-level flow)
//! ```text
//! Lifecycle::run(parent, on_ready)
//!   ├─ DepGraph::build ──► parents/children adjacency (cycle policy)
//!   ├─ ComponentState per component (probe/run/teardown scopes)
//!   ├─ per component: ComponentActor + probe_waiter + child watcher
//!   ├─ cancel_watcher:  parent token / OS signal ──► lifecycle scope
//!   ├─ stopping_watcher: lifecycle scope ──► Stopping event + status
//!   └─ aggregate_readiness: all waiters ──► status Ready / on_ready(err)
//!
//! ComponentActor::run
//!   gate ─► parents' probe scopes ─► Component::run ─► teardown scope
//!             │ first failure: abort,        │ result recorded as the
//!             │ propagate into own scopes    │ lifecycle cause (first wins)
//!
//! watch_children (per component)
//!   child teardown failure ──► run scope (child's error, immediately)
//!   all children stopped    ──► run scope (lifecycle's cause)
//! ```

mod actor;
mod lifecycle;
mod probe;
mod scope;
mod signal;
mod state;

pub use lifecycle::Lifecycle;
pub use scope::Scope;

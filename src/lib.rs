//! # compvisor
//!
//! **Compvisor** is a lifecycle supervisor for long-running, interdependent
//! in-process components (services, clients, listeners, servers).
//!
//! Given a set of registered components and their dependency relationships,
//! it concurrently brings them to a ready state in dependency order,
//! supervises their execution, propagates failures, and performs ordered
//! graceful shutdown: parents become ready before children start, children
//! stop before parents are canceled.
//!
//! ## Features
//!
//! | Area             | Description                                                        | Key types / traits                        |
//! |------------------|--------------------------------------------------------------------|-------------------------------------------|
//! | **Components**   | Define supervised units as types, closures, or wrapped delegates.  | [`Component`], [`ComponentFn`], [`Adapter`] |
//! | **Supervision**  | Register components, run them, observe status.                     | [`Lifecycle`], [`LifecycleStatus`]         |
//! | **Readiness**    | One-shot readiness probe per component under a start deadline.     | [`ReadySignal`], [`Config::start_timeout`] |
//! | **Cancellation** | Causal scopes: every cancellation carries a cause.                 | [`Scope`], [`LifecycleError`]              |
//! | **Graph**        | Dependency adjacency, cycle policy, DOT export.                    | [`Graph`], [`CyclePolicy`]                 |
//! | **Observability**| Typed event stream fanned out to subscribers.                      | [`Event`], [`Subscribe`], [`MetricsSubscriber`] |
//!
//! ## Optional features
//! - `logging` *(default)*: exports [`LogSubscriber`], a `tracing`-backed
//!   renderer for the event stream.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use compvisor::{ComponentFn, Config, Lifecycle, LifecycleError, LogSubscriber, ReadySignal, Scope};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = ComponentFn::arc("storage", |scope: Scope, ready: ReadySignal| async move {
//!         // open connections...
//!         ready.ready();
//!         scope.cancelled().await;
//!         Ok::<_, LifecycleError>(())
//!     });
//!
//!     let api = ComponentFn::arc("api", |scope: Scope, ready: ReadySignal| async move {
//!         ready.ready();
//!         scope.cancelled().await;
//!         Ok::<_, LifecycleError>(())
//!     });
//!
//!     let mut lc = Lifecycle::new(Config::default());
//!     lc.subscribe(Arc::new(LogSubscriber));
//!     lc.register(storage.clone());
//!     // api starts after storage is ready; storage stops after api stopped.
//!     lc.register_with(api, &[storage]);
//!
//!     let shutdown = CancellationToken::new();
//!     lc.run(shutdown, |verdict| {
//!         if verdict.is_none() {
//!             println!("all components ready");
//!         }
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```
//!
//! ---

mod components;
mod config;
mod core;
mod error;
mod events;
mod graph;
mod status;
mod subscribers;

// ---- Public re-exports ----

pub use components::{Adapter, Component, ComponentFn, ComponentId, ComponentRef, ReadySignal};
pub use config::{Config, CyclePolicy};
pub use core::{Lifecycle, Scope};
pub use error::LifecycleError;
pub use events::{Event, EventKind};
pub use graph::{Graph, GraphEdge, GraphNode};
pub use status::LifecycleStatus;
pub use subscribers::{MetricsSubscriber, Subscribe};

// Optional: tracing-backed log subscriber.
// Enable with: `--features logging` (on by default).
#[cfg(feature = "logging")]
pub use subscribers::LogSubscriber;

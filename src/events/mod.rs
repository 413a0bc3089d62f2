//! Runtime events published by the lifecycle engine.
//!
//! Producers (publish to [`Bus`]):
//! - **supervision task** → `Starting`, `Closed`, `Cascade`, `RunFailed`
//! - **probe waiter**     → `Ready`, `ProbeFailed`
//! - **lifecycle run**    → `ShutdownRequested`, `Stopping`, `Stopped`
//!
//! Consumers: the per-run fan-out listener, which forwards every event to the
//! registered [`Subscribe`](crate::Subscribe) implementations.

mod bus;
mod event;

pub(crate) use bus::Bus;
pub use event::{Event, EventKind};

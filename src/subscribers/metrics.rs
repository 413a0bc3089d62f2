//! # In-memory lifecycle metrics.
//!
//! [`MetricsSubscriber`] tracks, per component:
//! - how long it took to become ready (`Starting` → `Ready`),
//! - how long it ran (`Starting` → terminal event),
//! - error counts keyed by error text.
//!
//! Readings are eventually consistent with the event stream; query them
//! after `run` returns for stable values.
//!
//! # Example
//! ```
//! use compvisor::MetricsSubscriber;
//!
//! let metrics = MetricsSubscriber::new();
//! // lifecycle.subscribe(metrics.clone());
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

#[derive(Default)]
struct MetricsInner {
    started: HashMap<String, Instant>,
    ready: HashMap<String, Duration>,
    run: HashMap<String, Duration>,
    errors: HashMap<String, HashMap<String, u64>>,
}

/// Collects per-component timing and error counts from the event stream.
#[derive(Default)]
pub struct MetricsSubscriber {
    inner: RwLock<MetricsInner>,
}

impl MetricsSubscriber {
    /// Creates a shared collector, ready to pass to
    /// [`Lifecycle::subscribe`](crate::Lifecycle::subscribe).
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Time from run entry to readiness, if the component became ready.
    pub async fn ready_duration(&self, component: &str) -> Option<Duration> {
        self.inner.read().await.ready.get(component).copied()
    }

    /// Time from run entry to the terminal event, if the component stopped.
    pub async fn run_duration(&self, component: &str) -> Option<Duration> {
        self.inner.read().await.run.get(component).copied()
    }

    /// Number of failures recorded for the component with the given error
    /// text.
    pub async fn error_count(&self, component: &str, error: &str) -> u64 {
        self.inner
            .read()
            .await
            .errors
            .get(component)
            .and_then(|by_err| by_err.get(error))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl Subscribe for MetricsSubscriber {
    async fn on_event(&self, e: &Event) {
        let Some(name) = e.component.as_deref() else {
            return;
        };
        let mut inner = self.inner.write().await;

        match e.kind {
            EventKind::Starting => {
                inner.started.insert(name.to_string(), Instant::now());
            }
            EventKind::Ready => {
                if let Some(t0) = inner.started.get(name).copied() {
                    inner.ready.insert(name.to_string(), t0.elapsed());
                }
            }
            EventKind::Closed | EventKind::Cascade | EventKind::RunFailed => {
                if let Some(t0) = inner.started.get(name).copied() {
                    inner.run.insert(name.to_string(), t0.elapsed());
                }
                if e.kind == EventKind::RunFailed {
                    record_error(&mut inner, name, e.error.as_deref());
                }
            }
            EventKind::ProbeFailed => {
                record_error(&mut inner, name, e.error.as_deref());
            }
            _ => {}
        }
    }
}

fn record_error(inner: &mut MetricsInner, component: &str, error: Option<&str>) {
    let error = error.unwrap_or("unknown").to_string();
    *inner
        .errors
        .entry(component.to_string())
        .or_default()
        .entry(error)
        .or_insert(0) += 1;
}

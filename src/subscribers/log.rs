//! # Logging subscriber.
//!
//! [`LogSubscriber`] renders lifecycle events through [`tracing`], one line
//! per component transition:
//!
//! ```text
//! Component storage [READY]
//! Component api [CLOSE]
//! Component cache [CASCADE]
//! Component storage [ERROR] component failure: disk gone
//! Component api [PROB ERROR]: startup deadline exceeded after 60s
//! All components are stopping: component failure: disk gone
//! All components are stopped
//! ```

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Renders lifecycle events as `tracing` log lines.
///
/// Enabled via the default-on `logging` feature.
pub struct LogSubscriber;

#[async_trait]
impl Subscribe for LogSubscriber {
    async fn on_event(&self, e: &Event) {
        let name = e.component.as_deref().unwrap_or("?");
        let err = e.error.as_deref().unwrap_or("");
        match e.kind {
            EventKind::Starting => debug!("Component {name} starting"),
            EventKind::Ready => info!("Component {name} [READY]"),
            EventKind::ProbeFailed => error!("Component {name} [PROB ERROR]: {err}"),
            EventKind::Closed => info!("Component {name} [CLOSE]"),
            EventKind::Cascade => info!("Component {name} [CASCADE]"),
            EventKind::RunFailed => error!("Component {name} [ERROR] {err}"),
            EventKind::ShutdownRequested => info!("Shutdown signal received"),
            EventKind::Stopping => match &e.error {
                Some(err) => error!("All components are stopping: {err}"),
                None => info!("All components are stopping"),
            },
            EventKind::Stopped => match &e.error {
                Some(err) => error!("All components are stopped: {err}"),
                None => info!("All components are stopped"),
            },
        }
    }
}

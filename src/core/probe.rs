//! # Probe waiter and readiness aggregation.
//!
//! One probe waiter per component awaits the probe scope under the shared
//! start deadline. Outcomes:
//!
//! - probe closed without failure → component reported ready;
//! - probe closed with failure → component reported failed, lifecycle
//!   canceled with `CascadeClose`;
//! - deadline elapsed → component reported failed with the start-timeout
//!   cause, which also becomes the lifecycle cause.
//!
//! The aggregator drains every waiter and surfaces a single verdict, exactly
//! once, through the caller-supplied callback: `None` when every component
//! became ready, otherwise the first failure in completion order.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time;

use crate::core::Scope;
use crate::core::state::ComponentState;
use crate::error::LifecycleError;
use crate::events::{Bus, Event, EventKind};
use crate::status::{LifecycleStatus, StatusCell};

/// Awaits one component's probe scope under the start deadline.
pub(crate) async fn probe_waiter(
    state: Arc<ComponentState>,
    lifecycle: Scope,
    start_timeout: Duration,
    bus: Bus,
) -> Result<(), LifecycleError> {
    let outcome = tokio::select! {
        cause = state.probe.closed() => cause,
        cause = lifecycle.closed() => {
            // Propagate the lifecycle cause into the probe; if the component
            // signaled first, the recorded cause wins.
            state.probe.close(cause);
            state.probe.cause()
        }
        _ = time::sleep(start_timeout) => {
            state.probe.close(Some(LifecycleError::StartTimeout {
                timeout: start_timeout,
            }));
            state.probe.cause()
        }
    };

    match outcome {
        None => {
            bus.publish(Event::now(EventKind::Ready).with_component(&state.name));
            Ok(())
        }
        Some(err) => {
            bus.publish(
                Event::now(EventKind::ProbeFailed)
                    .with_component(&state.name)
                    .with_error(err.to_string()),
            );
            // A start timeout is specific enough to become the lifecycle
            // cause itself; other probe failures cascade.
            let escalation = match &err {
                LifecycleError::StartTimeout { .. } => err.clone(),
                _ => LifecycleError::CascadeClose,
            };
            lifecycle.close(Some(escalation));
            Err(err)
        }
    }
}

/// Drains every probe waiter, advances the status machine on success, and
/// delivers the verdict exactly once.
pub(crate) async fn aggregate_readiness(
    mut prober: JoinSet<Result<(), LifecycleError>>,
    status: StatusCell,
    on_ready: impl FnOnce(Option<LifecycleError>) + Send + 'static,
) {
    let mut verdict: Option<LifecycleError> = None;

    while let Some(joined) = prober.join_next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(err) => Err(LifecycleError::failure(err.to_string())),
        };
        if let Err(err) = outcome {
            if verdict.is_none() {
                verdict = Some(err);
            }
        }
    }

    if verdict.is_none() {
        status.advance(LifecycleStatus::Ready);
    }
    on_ready(verdict);
}

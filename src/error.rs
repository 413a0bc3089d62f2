//! # Error types used by the lifecycle runtime and components.
//!
//! A single enum [`LifecycleError`] covers both failures raised by the
//! orchestration itself (circular dependencies, startup deadlines, cascade
//! shutdown) and failures reported by individual components.
//!
//! The type is `Clone` because one cause fans out to many scopes: the first
//! error observed anywhere becomes the lifecycle's cancellation cause and is
//! pushed into every still-running component.

use std::time::Duration;

use thiserror::Error;

/// Errors recognized by the lifecycle engine.
///
/// `UnexpectedClose` and `CascadeClose` are the well-known sentinel kinds:
/// the former marks a component whose `run` returned cleanly while the
/// lifecycle was not shutting down, the latter marks components stopped
/// because something else failed.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// A component's `run` returned without error while the lifecycle was
    /// not being canceled.
    #[error("unexpected close component")]
    UnexpectedClose,

    /// A component was closed as part of a cascade shutdown initiated by
    /// another component's failure.
    #[error("cascade close component")]
    CascadeClose,

    /// A component did not signal readiness within the configured start
    /// timeout.
    #[error("startup deadline exceeded after {timeout:?}")]
    StartTimeout {
        /// The configured per-component start timeout.
        timeout: Duration,
    },

    /// Two registered components depend on each other (directly or through
    /// intermediaries) and the cycle policy is set to reject.
    #[error("circular dependency detected {a} <-> {b}")]
    CircularDependency {
        /// Display name of the traversal root that reached itself.
        a: String,
        /// Display name of the cycle-closing node.
        b: String,
    },

    /// Writing the dependency graph to the configured file failed.
    #[error("failed to export dependency graph: {reason}")]
    GraphExport {
        /// Underlying I/O error, stringified.
        reason: String,
    },

    /// A failure reported by a component, either through its readiness
    /// signal or as the return value of `run`.
    #[error("component failure: {reason}")]
    Failure {
        /// Component-supplied description.
        reason: String,
    },
}

impl LifecycleError {
    /// Convenience constructor for component-supplied failures.
    pub fn failure(reason: impl Into<String>) -> Self {
        LifecycleError::Failure {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            LifecycleError::UnexpectedClose => "unexpected_close",
            LifecycleError::CascadeClose => "cascade_close",
            LifecycleError::StartTimeout { .. } => "start_timeout",
            LifecycleError::CircularDependency { .. } => "circular_dependency",
            LifecycleError::GraphExport { .. } => "graph_export",
            LifecycleError::Failure { .. } => "component_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_reason_in_display() {
        let err = LifecycleError::failure("boom");
        assert_eq!(err.to_string(), "component failure: boom");
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(
            LifecycleError::UnexpectedClose.as_label(),
            "unexpected_close"
        );
        assert_eq!(LifecycleError::CascadeClose.as_label(), "cascade_close");
        assert_eq!(
            LifecycleError::StartTimeout {
                timeout: Duration::from_secs(1)
            }
            .as_label(),
            "start_timeout"
        );
    }
}

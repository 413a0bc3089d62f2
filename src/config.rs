//! # Global runtime configuration.
//!
//! [`Config`] defines the supervisor's behavior: per-component start timeout,
//! circular-dependency policy, OS signal handling, event bus capacity, and
//! the optional dependency-graph export file.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use compvisor::{Config, CyclePolicy};
//!
//! let mut cfg = Config::default();
//! cfg.start_timeout = Duration::from_secs(5);
//! cfg.cycles = CyclePolicy::Elide;
//!
//! assert_eq!(cfg.start_timeout, Duration::from_secs(5));
//! ```

use std::path::PathBuf;
use std::time::Duration;

/// Policy applied when the dependency graph contains a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Abort the run with a fatal diagnostic naming both endpoints of one
    /// discovered back-edge.
    #[default]
    Reject,
    /// Drop the cycle-closing node's parent edges and continue. Best-effort
    /// degradation: the elided node starts as if it had no parents.
    Elide,
}

/// Global configuration for the lifecycle supervisor.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time between the start of a run and a component's readiness
    /// signal before the component is reported failed.
    pub start_timeout: Duration,
    /// How to treat circular dependencies discovered at graph build time.
    pub cycles: CyclePolicy,
    /// Cancel the lifecycle on SIGINT/SIGTERM. Off by default: the lifecycle
    /// only stops when the parent token is canceled.
    pub shutdown_signal: bool,
    /// Capacity of the internal event bus channel.
    pub bus_capacity: usize,
    /// When set, the dependency graph is written to this file in DOT format
    /// at run start.
    pub graph_file: Option<PathBuf>,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `start_timeout = 60s`
    /// - `cycles = CyclePolicy::Reject`
    /// - `shutdown_signal = false`
    /// - `bus_capacity = 1024`
    /// - `graph_file = None`
    fn default() -> Self {
        Self {
            start_timeout: Duration::from_secs(60),
            cycles: CyclePolicy::default(),
            shutdown_signal: false,
            bus_capacity: 1024,
            graph_file: None,
        }
    }
}

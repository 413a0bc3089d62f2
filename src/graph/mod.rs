//! Dependency graph: adjacency construction, cycle handling, DOT export.
//!
//! Built once per run from the registration table. Each component's declared
//! references (filtered to registered handles, excluding the component
//! itself) are unioned with its implicit parents; `children` is the inverse
//! of `parents`.
//!
//! ## Rules
//! - Construction is deterministic: components are processed in registration
//!   order and adjacency lists preserve that order, so repeated builds on an
//!   unchanged registry yield identical maps.
//! - Cycles are found by bounded BFS from every root through `parents`. A
//!   per-root visited set keeps the traversal finite even on cycles that do
//!   not pass through the current root.
//! - [`CyclePolicy::Reject`] aborts with a diagnostic naming both endpoints;
//!   [`CyclePolicy::Elide`] drops the cycle-closing node's parent edges and
//!   continues.

mod build;
mod dot;

pub(crate) use build::DepGraph;
pub use dot::{Graph, GraphEdge, GraphNode};
pub(crate) use dot::write_graph_file;

//! Graph snapshot and Graphviz DOT rendering.

use std::fmt::Write as _;
use std::path::Path;

use crate::components::Registry;
use crate::error::LifecycleError;
use crate::graph::DepGraph;

/// A node in the exported dependency graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    /// Component display name.
    pub id: String,
}

/// A directed edge `from` (parent) to `to` (child).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// Complete dependency graph snapshot: one node per component, one edge per
/// `(parent -> child)` pair.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub(crate) fn snapshot(registry: &Registry, graph: &DepGraph) -> Self {
        let mut nodes = Vec::with_capacity(registry.len());
        let mut edges = Vec::new();

        for (id, reg) in registry.iter() {
            nodes.push(GraphNode {
                id: reg.name.clone(),
            });
            for parent in graph.parents_of(id) {
                edges.push(GraphEdge {
                    from: registry.name_of(*parent).to_string(),
                    to: reg.name.clone(),
                });
            }
        }

        Self { nodes, edges }
    }

    /// Renders the graph in Graphviz DOT format.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        out.push_str("digraph G {\n");
        out.push_str("  rankdir=TB;\n\n");

        for node in &self.nodes {
            let _ = writeln!(out, "  {:?} [label={:?}, shape=box];", node.id, node.id);
        }

        out.push('\n');

        for edge in &self.edges {
            let _ = writeln!(out, "  {:?} -> {:?};", edge.from, edge.to);
        }

        out.push_str("}\n");
        out
    }
}

/// Writes the graph to `path` in DOT format.
pub(crate) fn write_graph_file(path: &Path, graph: &Graph) -> Result<(), LifecycleError> {
    std::fs::write(path, graph.to_dot()).map_err(|err| LifecycleError::GraphExport {
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentFn, ComponentRef, ReadySignal};
    use crate::config::CyclePolicy;
    use crate::core::Scope;

    fn noop(name: &'static str) -> ComponentRef {
        ComponentFn::arc(name, |_s: Scope, _r: ReadySignal| async { Ok(()) })
    }

    fn chain_registry() -> (Registry, ComponentRef, ComponentRef) {
        let mut reg = Registry::new();
        let a = noop("a");
        let b = noop("b");
        reg.register(a.clone(), &[]);
        reg.register(b.clone(), &[a.clone()]);
        (reg, a, b)
    }

    #[test]
    fn snapshot_has_one_node_per_component_and_one_edge_per_dependency() {
        let (reg, _a, _b) = chain_registry();
        let dep = DepGraph::build(&reg, CyclePolicy::Reject).unwrap();
        let graph = Graph::snapshot(&reg, &dep);

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(
            graph.edges,
            vec![GraphEdge {
                from: "a".to_string(),
                to: "b".to_string()
            }]
        );
    }

    #[test]
    fn dot_output_contains_nodes_and_edges() {
        let (reg, _a, _b) = chain_registry();
        let dep = DepGraph::build(&reg, CyclePolicy::Reject).unwrap();
        let dot = Graph::snapshot(&reg, &dep).to_dot();

        assert!(dot.starts_with("digraph G {"));
        assert!(dot.contains("rankdir=TB;"));
        assert!(dot.contains("\"a\" [label=\"a\", shape=box];"));
        assert!(dot.contains("\"b\" [label=\"b\", shape=box];"));
        assert!(dot.contains("\"a\" -> \"b\";"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn graph_file_is_written() {
        let (reg, _a, _b) = chain_registry();
        let dep = DepGraph::build(&reg, CyclePolicy::Reject).unwrap();
        let graph = Graph::snapshot(&reg, &dep);

        let dir = std::env::temp_dir().join("compvisor-dot-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("graph.dot");
        write_graph_file(&path, &graph).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"a\" -> \"b\";"));
        std::fs::remove_file(&path).ok();
    }
}

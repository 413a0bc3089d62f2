//! Adjacency construction and cycle detection.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::components::{ComponentId, Registry};
use crate::config::CyclePolicy;
use crate::error::LifecycleError;

/// Immutable parent/child adjacency, derived once at run start.
#[derive(Debug)]
pub(crate) struct DepGraph {
    parents: HashMap<ComponentId, Vec<ComponentId>>,
    children: HashMap<ComponentId, Vec<ComponentId>>,
}

impl DepGraph {
    /// Builds the adjacency maps from the registration table.
    ///
    /// Declared references are filtered to registered handles and
    /// deduplicated; self-references are dropped. Implicit parents are
    /// merged in. The cycle pass then applies `policy`.
    pub(crate) fn build(registry: &Registry, policy: CyclePolicy) -> Result<Self, LifecycleError> {
        let mut parents: HashMap<ComponentId, Vec<ComponentId>> = HashMap::new();

        for (id, reg) in registry.iter() {
            let mut seen: HashSet<ComponentId> = HashSet::new();
            let mut list: Vec<ComponentId> = Vec::new();

            for dep in reg.component.dependencies() {
                let dep_id = ComponentId::of(&dep);
                if dep_id != id && registry.contains(dep_id) && seen.insert(dep_id) {
                    list.push(dep_id);
                }
            }
            // Implicit parents in registration order, after declared refs.
            for (candidate, _) in registry.iter() {
                if reg.implicit.contains(&candidate) && candidate != id && seen.insert(candidate) {
                    list.push(candidate);
                }
            }

            parents.insert(id, list);
        }

        resolve_cycles(&mut parents, registry, policy)?;

        let mut children: HashMap<ComponentId, Vec<ComponentId>> = HashMap::new();
        for (id, _) in registry.iter() {
            children.entry(id).or_default();
        }
        for (child, _) in registry.iter() {
            let Some(ps) = parents.get(&child) else {
                continue;
            };
            for parent in ps {
                children.entry(*parent).or_default().push(child);
            }
        }

        Ok(Self { parents, children })
    }

    /// Parents of `id`, in deterministic order. Elided nodes report none.
    pub(crate) fn parents_of(&self, id: ComponentId) -> &[ComponentId] {
        self.parents.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Children of `id`, in deterministic order.
    pub(crate) fn children_of(&self, id: ComponentId) -> &[ComponentId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// BFS from every root through `parents`. Reaching the root again means a
/// cycle: reject aborts naming both endpoints, elide removes the
/// cycle-closing node's parent entry and continues. Which endpoint gets
/// elided depends on traversal order and is deliberately unspecified.
fn resolve_cycles(
    parents: &mut HashMap<ComponentId, Vec<ComponentId>>,
    registry: &Registry,
    policy: CyclePolicy,
) -> Result<(), LifecycleError> {
    for (root, _) in registry.iter() {
        let mut queue: VecDeque<ComponentId> = VecDeque::from([root]);
        let mut visited: HashSet<ComponentId> = HashSet::from([root]);

        while let Some(node) = queue.pop_front() {
            let node_parents = match parents.get(&node) {
                Some(ps) => ps.clone(),
                None => continue,
            };

            if node_parents.contains(&root) {
                match policy {
                    CyclePolicy::Reject => {
                        return Err(LifecycleError::CircularDependency {
                            a: registry.name_of(root).to_string(),
                            b: registry.name_of(node).to_string(),
                        });
                    }
                    CyclePolicy::Elide => {
                        parents.remove(&node);
                        continue;
                    }
                }
            }

            for parent in node_parents {
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentFn, ComponentRef, ReadySignal};
    use crate::core::Scope;

    fn noop(name: &'static str) -> ComponentRef {
        ComponentFn::arc(name, |_s: Scope, _r: ReadySignal| async { Ok(()) })
    }

    fn dependent(name: &'static str, deps: Vec<ComponentRef>) -> ComponentRef {
        std::sync::Arc::new(
            ComponentFn::new(name, |_s: Scope, _r: ReadySignal| async { Ok(()) })
                .with_dependencies(deps),
        )
    }

    #[test]
    fn declared_and_implicit_parents_merge() {
        let mut reg = Registry::new();
        let a = noop("a");
        let b = dependent("b", vec![a.clone()]);
        let c = noop("c");
        reg.register(a.clone(), &[]);
        reg.register(b.clone(), &[c.clone()]);

        let graph = DepGraph::build(&reg, CyclePolicy::Reject).unwrap();
        let parents = graph.parents_of(ComponentId::of(&b));
        assert_eq!(parents.len(), 2);
        assert!(parents.contains(&ComponentId::of(&a)));
        assert!(parents.contains(&ComponentId::of(&c)));
    }

    #[test]
    fn unregistered_and_self_references_are_ignored() {
        let mut reg = Registry::new();
        let stranger = noop("stranger");
        let a = noop("a");
        let b = dependent("b", vec![a.clone(), stranger.clone()]);
        reg.register(a.clone(), &[]);
        reg.register(b.clone(), &[]);

        let graph = DepGraph::build(&reg, CyclePolicy::Reject).unwrap();
        assert_eq!(graph.parents_of(ComponentId::of(&b)), &[ComponentId::of(&a)]);
    }

    #[test]
    fn children_invert_parents() {
        let mut reg = Registry::new();
        let a = noop("a");
        let b = dependent("b", vec![a.clone()]);
        let c = dependent("c", vec![b.clone()]);
        reg.register(a.clone(), &[]);
        reg.register(b.clone(), &[]);
        reg.register(c.clone(), &[]);

        let graph = DepGraph::build(&reg, CyclePolicy::Reject).unwrap();
        assert_eq!(graph.children_of(ComponentId::of(&a)), &[ComponentId::of(&b)]);
        assert_eq!(graph.children_of(ComponentId::of(&b)), &[ComponentId::of(&c)]);
        assert!(graph.children_of(ComponentId::of(&c)).is_empty());
    }

    #[test]
    fn reject_names_both_endpoints() {
        let mut reg = Registry::new();
        let a = noop("alpha");
        let b = dependent("beta", vec![a.clone()]);
        reg.register(a.clone(), &[b.clone()]);
        reg.register(b.clone(), &[]);

        let err = DepGraph::build(&reg, CyclePolicy::Reject).unwrap_err();
        match err {
            LifecycleError::CircularDependency { a, b } => {
                assert!(["alpha", "beta"].contains(&a.as_str()));
                assert!(["alpha", "beta"].contains(&b.as_str()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn elide_breaks_the_cycle() {
        let mut reg = Registry::new();
        let a = noop("a");
        let b = dependent("b", vec![a.clone()]);
        reg.register(a.clone(), &[b.clone()]);
        reg.register(b.clone(), &[]);

        let graph = DepGraph::build(&reg, CyclePolicy::Elide).unwrap();
        // Exactly one endpoint lost its parents; the other kept them.
        let a_parents = graph.parents_of(ComponentId::of(&a)).len();
        let b_parents = graph.parents_of(ComponentId::of(&b)).len();
        assert_eq!(a_parents.min(b_parents), 0);
        assert_eq!(a_parents.max(b_parents), 1);
    }

    #[test]
    fn elide_terminates_on_cycles_away_from_the_root() {
        let mut reg = Registry::new();
        let b = noop("b");
        let c = dependent("c", vec![b.clone()]);
        // a depends on the b<->c cycle without being part of it.
        let a = dependent("a", vec![b.clone()]);
        reg.register(a.clone(), &[]);
        reg.register(b.clone(), &[c.clone()]);
        reg.register(c.clone(), &[]);

        let graph = DepGraph::build(&reg, CyclePolicy::Elide).unwrap();
        assert_eq!(graph.parents_of(ComponentId::of(&a)), &[ComponentId::of(&b)]);
    }

    #[test]
    fn construction_is_idempotent() {
        let mut reg = Registry::new();
        let a = noop("a");
        let b = dependent("b", vec![a.clone()]);
        let c = dependent("c", vec![a.clone(), b.clone()]);
        reg.register(a.clone(), &[]);
        reg.register(b.clone(), &[]);
        reg.register(c.clone(), &[]);

        let first = DepGraph::build(&reg, CyclePolicy::Reject).unwrap();
        let second = DepGraph::build(&reg, CyclePolicy::Reject).unwrap();
        for (id, _) in reg.iter() {
            assert_eq!(first.parents_of(id), second.parents_of(id));
            assert_eq!(first.children_of(id), second.children_of(id));
        }
    }
}

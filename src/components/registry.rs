//! # Registration table.
//!
//! Maps [`ComponentId`] (the handle's allocation address) to the registered
//! handle, its display name, and its explicitly declared implicit parents.
//! Insertion-only prior to a run; never mutated once supervision starts.
//!
//! ## Rules
//! - Duplicate registrations merge implicit parents instead of failing.
//! - Implicit parents are registered transitively.
//! - Iteration follows registration order, which keeps graph construction
//!   and DOT export deterministic.

use std::collections::{HashMap, HashSet};

use crate::components::{ComponentId, ComponentRef};

/// Per-component registration record.
pub(crate) struct Registration {
    pub(crate) component: ComponentRef,
    pub(crate) name: String,
    pub(crate) implicit: HashSet<ComponentId>,
}

/// Insertion-ordered component registration table.
#[derive(Default)]
pub(crate) struct Registry {
    entries: HashMap<ComponentId, Registration>,
    order: Vec<ComponentId>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers `component`, merging `implicit_parents` into any existing
    /// entry. Parents are registered transitively.
    pub(crate) fn register(&mut self, component: ComponentRef, implicit_parents: &[ComponentRef]) {
        let id = ComponentId::of(&component);
        if !self.entries.contains_key(&id) {
            self.entries.insert(
                id,
                Registration {
                    name: component.name().to_string(),
                    component,
                    implicit: HashSet::new(),
                },
            );
            self.order.push(id);
        }

        for parent in implicit_parents {
            self.register(parent.clone(), &[]);
            let parent_id = ComponentId::of(parent);
            if let Some(entry) = self.entries.get_mut(&id) {
                entry.implicit.insert(parent_id);
            }
        }
    }

    pub(crate) fn contains(&self, id: ComponentId) -> bool {
        self.entries.contains_key(&id)
    }

    pub(crate) fn get(&self, id: ComponentId) -> Option<&Registration> {
        self.entries.get(&id)
    }

    /// Display name for a registered id; falls back to a placeholder so log
    /// paths never panic.
    pub(crate) fn name_of(&self, id: ComponentId) -> &str {
        self.entries.get(&id).map(|r| r.name.as_str()).unwrap_or("?")
    }

    /// Iterates entries in registration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (ComponentId, &Registration)> {
        self.order
            .iter()
            .filter_map(move |id| self.entries.get(id).map(|reg| (*id, reg)))
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }
}

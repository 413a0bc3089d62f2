//! # Per-component runtime state.
//!
//! One [`ComponentState`] is allocated per component at run start, before the
//! start gate opens, and lives until the supervision task exits. Exactly one
//! supervision task and one probe waiter observe each record.
//!
//! The three scopes and their cause conventions:
//! - `probe`: `None` = ready; `Some` = readiness failure, start timeout, or
//!   propagated lifecycle cancellation.
//! - `run`: `None` = orderly teardown; `Some` = child failure or cascade.
//! - `teardown`: closed exactly once when `run` returns, carrying its result.

use crate::core::Scope;

pub(crate) struct ComponentState {
    /// Display name used in events and log output.
    pub(crate) name: String,
    pub(crate) probe: Scope,
    pub(crate) run: Scope,
    pub(crate) teardown: Scope,
}

impl ComponentState {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            probe: Scope::new(),
            run: Scope::new(),
            teardown: Scope::new(),
        }
    }
}

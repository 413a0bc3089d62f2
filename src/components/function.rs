//! # Function-backed component implementation.
//!
//! [`ComponentFn`] wraps a closure `FnMut(Scope, ReadySignal) -> Future` so a
//! component can be defined without a dedicated type. The closure is guarded
//! by a [`Mutex`] to allow calling `run(&self, ...)` even though the closure
//! is `FnMut`; the lock is held only while the future is created, never while
//! it executes.
//!
//! Use [`ComponentFn::arc`] for a one-liner that returns a [`ComponentRef`].
//!
//! # Example
//! ```
//! use compvisor::{ComponentFn, ComponentRef, LifecycleError, ReadySignal, Scope};
//!
//! let worker: ComponentRef = ComponentFn::arc("worker", |scope: Scope, ready: ReadySignal| async move {
//!     ready.ready();
//!     scope.cancelled().await;
//!     Ok::<_, LifecycleError>(())
//! });
//!
//! assert_eq!(worker.name(), "worker");
//! ```

use std::{borrow::Cow, future::Future, sync::Arc, sync::Mutex};

use async_trait::async_trait;

use crate::components::{Component, ComponentRef, ReadySignal};
use crate::core::Scope;
use crate::error::LifecycleError;

/// Closure-backed [`Component`].
pub struct ComponentFn<Fnc, Fut>
where
    Fnc: FnMut(Scope, ReadySignal) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), LifecycleError>> + Send + 'static,
{
    /// Stable display name.
    name: Cow<'static, str>,
    /// Declared parent handles, reported through [`Component::dependencies`].
    deps: Vec<ComponentRef>,
    /// Underlying function (guarded to allow `FnMut` behind `&self`).
    func: Mutex<Fnc>,
}

impl<Fnc, Fut> ComponentFn<Fnc, Fut>
where
    Fnc: FnMut(Scope, ReadySignal) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), LifecycleError>> + Send + 'static,
{
    /// Creates a new function-backed component.
    pub fn new(name: impl Into<Cow<'static, str>>, func: Fnc) -> Self {
        Self {
            name: name.into(),
            deps: Vec::new(),
            func: Mutex::new(func),
        }
    }

    /// Declares the components this one depends on.
    pub fn with_dependencies(mut self, deps: Vec<ComponentRef>) -> Self {
        self.deps = deps;
        self
    }

    /// Creates the component and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, func: Fnc) -> ComponentRef {
        Arc::new(Self::new(name, func))
    }
}

#[async_trait]
impl<Fnc, Fut> Component for ComponentFn<Fnc, Fut>
where
    Fnc: FnMut(Scope, ReadySignal) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), LifecycleError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> Vec<ComponentRef> {
        self.deps.clone()
    }

    async fn run(&self, scope: Scope, ready: ReadySignal) -> Result<(), LifecycleError> {
        let fut = {
            let mut f = self
                .func
                .lock()
                .map_err(|_| LifecycleError::failure("component closure mutex poisoned"))?;
            (f)(scope, ready)
        };
        fut.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn runs_the_closure() {
        let comp = ComponentFn::new("demo", |_scope: Scope, ready: ReadySignal| async move {
            ready.ready();
            Ok(())
        });
        assert_eq!(comp.name(), "demo");

        let probe = Scope::new();
        let res = comp
            .run(Scope::new(), ReadySignal::new(probe.clone()))
            .await;
        assert!(res.is_ok());
        assert_eq!(probe.closed().await, None);
    }

    #[test]
    fn declared_dependencies_are_reported() {
        let dep = ComponentFn::arc("dep", |_s: Scope, _r: ReadySignal| async { Ok(()) });
        let comp = ComponentFn::new("comp", |_s: Scope, _r: ReadySignal| async { Ok(()) })
            .with_dependencies(vec![dep.clone()]);
        let deps = comp.dependencies();
        assert_eq!(deps.len(), 1);
        assert!(Arc::ptr_eq(&deps[0], &dep));
    }
}

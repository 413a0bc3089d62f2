//! # Generic adapter wrapping third-party types.
//!
//! [`Adapter`] turns a value that knows nothing about the lifecycle (an HTTP
//! server, a database pool, a queue consumer) into a [`Component`] by pairing
//! it with a run closure. The delegate stays accessible through
//! [`Adapter::delegate`], so other components can hold it and declare the
//! adapter as a dependency.
//!
//! # Example
//! ```
//! use compvisor::{Adapter, ComponentRef, LifecycleError, ReadySignal, Scope};
//!
//! struct Server { addr: String }
//!
//! let adapter: ComponentRef = Adapter::new(
//!     Server { addr: "127.0.0.1:8080".into() },
//!     |srv, scope: Scope, ready: ReadySignal| async move {
//!         let _ = &srv.addr; // bind, serve...
//!         ready.ready();
//!         scope.cancelled().await;
//!         Ok::<_, LifecycleError>(())
//!     },
//! )
//! .named("http-server")
//! .into_ref();
//!
//! assert_eq!(adapter.name(), "http-server");
//! ```

use std::{borrow::Cow, future::Future, sync::Arc, sync::Mutex};

use async_trait::async_trait;

use crate::components::{Component, ComponentRef, ReadySignal};
use crate::core::Scope;
use crate::error::LifecycleError;

/// Wraps a delegate value and a run closure as a [`Component`].
///
/// The display name defaults to the delegate's type name; override it with
/// [`Adapter::named`] when registering several adapters of the same type.
pub struct Adapter<T, Fnc, Fut>
where
    T: Send + Sync + 'static,
    Fnc: FnMut(Arc<T>, Scope, ReadySignal) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), LifecycleError>> + Send + 'static,
{
    name: Cow<'static, str>,
    delegate: Arc<T>,
    deps: Vec<ComponentRef>,
    func: Mutex<Fnc>,
}

impl<T, Fnc, Fut> Adapter<T, Fnc, Fut>
where
    T: Send + Sync + 'static,
    Fnc: FnMut(Arc<T>, Scope, ReadySignal) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), LifecycleError>> + Send + 'static,
{
    /// Wraps `delegate` with the given run closure.
    pub fn new(delegate: T, func: Fnc) -> Self {
        Self {
            name: Cow::Borrowed(std::any::type_name::<T>()),
            delegate: Arc::new(delegate),
            deps: Vec::new(),
            func: Mutex::new(func),
        }
    }

    /// Overrides the display name.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Declares the components this adapter depends on.
    pub fn with_dependencies(mut self, deps: Vec<ComponentRef>) -> Self {
        self.deps = deps;
        self
    }

    /// Returns the wrapped delegate.
    pub fn delegate(&self) -> &Arc<T> {
        &self.delegate
    }

    /// Converts the adapter into a shared component handle.
    pub fn into_ref(self) -> ComponentRef {
        Arc::new(self)
    }
}

#[async_trait]
impl<T, Fnc, Fut> Component for Adapter<T, Fnc, Fut>
where
    T: Send + Sync + 'static,
    Fnc: FnMut(Arc<T>, Scope, ReadySignal) -> Fut + Send + 'static,
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
                .map_err(|_| LifecycleError::failure("adapter closure mutex poisoned"))?;
            (f)(self.delegate.clone(), scope, ready)
        };
        fut.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Delegate {
        payload: &'static str,
    }

    #[tokio::test]
    async fn runs_against_the_delegate() {
        let adapter = Adapter::new(
            Delegate { payload: "hello" },
            |d: Arc<Delegate>, _scope: Scope, ready: ReadySignal| async move {
                assert_eq!(d.payload, "hello");
                ready.ready();
                Ok(())
            },
        );

        let probe = Scope::new();
        let res = adapter
            .run(Scope::new(), ReadySignal::new(probe.clone()))
            .await;
        assert!(res.is_ok());
        assert_eq!(probe.closed().await, None);
    }

    #[test]
    fn name_defaults_to_the_delegate_type() {
        let adapter = Adapter::new(Delegate { payload: "" }, |_d, _s: Scope, _r: ReadySignal| {
            async { Ok(()) }
        });
        assert!(adapter.name().contains("Delegate"));
        let named = adapter.named("custom");
        assert_eq!(named.name(), "custom");
    }

    #[tokio::test]
    async fn run_errors_propagate() {
        let adapter = Adapter::new((), |_d, _scope: Scope, ready: ReadySignal| async move {
            ready.ready();
            Err(LifecycleError::failure("test error"))
        });
        let err = adapter
            .run(Scope::new(), ReadySignal::new(Scope::new()))
            .await
            .unwrap_err();
        assert_eq!(err, LifecycleError::failure("test error"));
    }
}

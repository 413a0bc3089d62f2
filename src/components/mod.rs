//! Component contract, handles, and the ways to build components.
//!
//! - [`Component`] / [`ComponentRef`] / [`ComponentId`]: the trait, the
//!   shared handle, and its address-based identity.
//! - [`ReadySignal`]: the one-shot readiness probe passed to `run`.
//! - [`ComponentFn`]: closure-backed components for tests and small glue.
//! - [`Adapter`]: wraps third-party delegates into components.
//! - `Registry` (crate-internal): the insertion-ordered registration table.

mod adapter;
mod component;
mod function;
mod registry;

pub use adapter::Adapter;
pub use component::{Component, ComponentId, ComponentRef, ReadySignal};
pub use function::ComponentFn;
pub(crate) use registry::Registry;

//! Event subscribers: the observability extension point.
//!
//! Implement [`Subscribe`] to hook into lifecycle events; built-ins cover
//! logging ([`LogSubscriber`], behind the `logging` feature) and basic
//! metrics ([`MetricsSubscriber`]).

#[cfg(feature = "logging")]
mod log;
mod metrics;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogSubscriber;
pub use metrics::MetricsSubscriber;
pub use subscriber::Subscribe;

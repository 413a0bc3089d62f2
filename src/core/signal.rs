//! OS signal handling.
//!
//! A single async helper that completes when the process receives a
//! termination signal. On Unix both **SIGINT** (Ctrl-C) and **SIGTERM**
//! (systemd/Kubernetes default kill) are handled, with
//! [`tokio::signal::ctrl_c`] awaited as a fallback; elsewhere only `ctrl_c`
//! is available.

#[cfg(unix)]
pub(crate) async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = sigint.recv() => {},
        _ = sigterm.recv() => {},
    }
    Ok(())
}

#[cfg(not(unix))]
pub(crate) async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

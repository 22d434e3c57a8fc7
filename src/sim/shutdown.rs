//! Cross-platform termination-signal handling for the bundled binary.
//!
//! On Unix this waits for `SIGINT` or `SIGTERM`; elsewhere it falls back to
//! [`tokio::signal::ctrl_c`]. Each call creates independent listeners.

/// Completes when the process receives a termination signal.
///
/// Returns `Err` only if signal registration fails.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = sigint.recv() => {},
        _ = sigterm.recv() => {},
    }
    Ok(())
}

/// Completes when the process receives a termination signal.
///
/// Returns `Err` only if signal registration fails.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

//! OS signal handling.
//!
//! Translates SIGINT/SIGTERM into the process-level shutdown signal so the
//! serving loop has a graceful exit path instead of only dying abruptly.

use crate::lifecycle::Shutdown;

/// Install signal handlers that trigger `shutdown` on SIGINT or SIGTERM.
pub fn install(shutdown: Shutdown) {
    tokio::spawn(async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {}
            _ = terminate => {}
        }

        tracing::info!("shutdown signal received");
        shutdown.trigger();
    });
}

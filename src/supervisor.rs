//! Restart supervisor.
//!
//! Drives the connect-then-serve cycle: each attempt registers the
//! forwarding mux against the gRPC endpoint, then serves HTTP with it. The
//! listener is bound only after registration succeeds, so no request is
//! accepted before the upstream channel is up.
//!
//! On attempt failure the supervisor logs a warning and restarts the cycle
//! after a jittered exponential backoff, up to `retry.max_attempts`; a
//! persistent failure surfaces the last error to the caller, which is
//! expected to log it and exit non-zero. Graceful shutdown is the only
//! path that returns `Ok`.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::gateway::{ConnectOptions, GatewayError, GatewayRegistrar};
use crate::http::HttpServer;
use crate::lifecycle::{AttemptScope, Shutdown};
use crate::resilience::backoff_delay;

/// Error from a single connect-then-serve attempt.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("forwarding setup failed: {0}")]
    Register(#[from] GatewayError),

    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(std::io::Error),
}

/// Terminal supervisor error.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("gave up after {attempts} attempts: {source}")]
    AttemptsExhausted { attempts: u32, source: AttemptError },
}

/// Supervisor owning the configuration and the registration capability.
pub struct Supervisor {
    config: GatewayConfig,
    registrar: Arc<dyn GatewayRegistrar>,
}

impl Supervisor {
    pub fn new(config: GatewayConfig, registrar: Arc<dyn GatewayRegistrar>) -> Self {
        Self { config, registrar }
    }

    /// Run attempts until graceful shutdown or until the retry limit is
    /// reached.
    pub async fn run(&self, shutdown: &Shutdown) -> Result<(), SupervisorError> {
        let mut attempt = 0u32;
        loop {
            if shutdown.is_triggered() {
                return Ok(());
            }
            attempt += 1;

            match self.run_attempt(shutdown).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    if shutdown.is_triggered() {
                        tracing::debug!(error = %err, "attempt ended during shutdown");
                        return Ok(());
                    }
                    if attempt >= self.config.retry.max_attempts {
                        return Err(SupervisorError::AttemptsExhausted {
                            attempts: attempt,
                            source: err,
                        });
                    }

                    let delay = backoff_delay(attempt, &self.config.retry);
                    tracing::warn!(
                        attempt,
                        error = %err,
                        delay_ms = delay.as_millis() as u64,
                        "attempt failed; restarting after backoff"
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = shutdown.wait() => return Ok(()),
                    }
                }
            }
        }
    }

    /// One connect-then-serve cycle, bounded by its own cancellation scope.
    async fn run_attempt(&self, shutdown: &Shutdown) -> Result<(), AttemptError> {
        let scope = AttemptScope::new(shutdown);

        let authority = self.config.grpc_authority();
        let options = ConnectOptions {
            connect_timeout: std::time::Duration::from_secs(self.config.timeouts.connect_secs),
            ..ConnectOptions::default()
        };

        tracing::info!(upstream = %authority, "connecting to gRPC endpoint");
        let handler = self
            .registrar
            .register(scope.handle(), &authority, &options)
            .await?;

        let listen_addr = self.config.http_listen_addr();
        let listener = TcpListener::bind(listen_addr)
            .await
            .map_err(|source| AttemptError::Bind {
                addr: listen_addr,
                source,
            })?;

        let server = HttpServer::new(self.config.timeouts.clone());
        server
            .run(listener, handler, scope.handle().subscribe())
            .await
            .map_err(AttemptError::Serve)
    }
}

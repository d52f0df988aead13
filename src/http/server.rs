//! HTTP server setup.
//!
//! # Responsibilities
//! - Wire up middleware (request ID, tracing, request timeout)
//! - Serve the forwarding mux as the sole handler
//! - Block for the serving lifetime; return only on error or shutdown

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::TimeoutConfig;
use crate::http::request::UuidRequestId;

/// HTTP server for the gateway.
pub struct HttpServer {
    timeouts: TimeoutConfig,
}

impl HttpServer {
    /// Create a server with the given timeout configuration.
    pub fn new(timeouts: TimeoutConfig) -> Self {
        Self { timeouts }
    }

    /// Wrap the handler in the middleware stack.
    fn apply_middleware(&self, handler: Router) -> Router {
        handler
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.timeouts.request_secs,
            )))
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on the given listener until it errors or the shutdown
    /// signal fires. Never returns success while serving continues.
    pub async fn run(
        self,
        listener: TcpListener,
        handler: Router,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.apply_middleware(handler);
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

//! Forwarding-setup (registration) subsystem.
//!
//! # Data Flow
//! ```text
//! supervisor attempt
//!     → GatewayRegistrar::register(shutdown, "localhost:<grpc-port>", options)
//!     → registrar.rs (one eager dial over a plaintext channel)
//!     → mux.rs (axum Router forwarding every request over the channel)
//!     → supervisor hands the router to the HTTP server
//! ```
//!
//! # Design Decisions
//! - Registration is an injected capability so the supervisor can be
//!   exercised against stubs without a live gRPC endpoint
//! - The dial is eager: a dead endpoint fails the attempt before any
//!   listener is bound
//! - The upstream connection is plaintext; the service is expected on the
//!   same host

use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use thiserror::Error;

use crate::lifecycle::Shutdown;

pub mod mux;
pub mod registrar;

pub use mux::ForwardingMux;
pub use registrar::GrpcRegistrar;

/// Options applied to the upstream channel when dialing.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Connection establishment timeout.
    pub connect_timeout: Duration,

    /// Disable Nagle's algorithm on the upstream socket.
    pub tcp_nodelay: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            tcp_nodelay: true,
        }
    }
}

/// Errors from forwarding setup.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The target string is not a valid authority.
    #[error("invalid gRPC target '{target}': {source}")]
    InvalidTarget {
        target: String,
        source: axum::http::uri::InvalidUri,
    },

    /// The eager dial failed.
    #[error("failed to connect to gRPC endpoint {target}: {source}")]
    Connect {
        target: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Shutdown was requested while the dial was in flight.
    #[error("registration cancelled by shutdown")]
    Cancelled,
}

/// Capability that binds a forwarding multiplexer to a remote service
/// address, producing a ready-to-serve handler.
#[async_trait]
pub trait GatewayRegistrar: Send + Sync {
    /// Perform one registration attempt against `authority`.
    ///
    /// Returns a handler only after the upstream endpoint has been dialed
    /// successfully; the HTTP server must not start otherwise.
    async fn register(
        &self,
        shutdown: &Shutdown,
        authority: &str,
        options: &ConnectOptions,
    ) -> Result<Router, GatewayError>;
}

//! Production registrar backed by a tonic client channel.

use async_trait::async_trait;
use axum::http::uri::Authority;
use axum::Router;
use tonic::transport::Endpoint;

use crate::gateway::mux::ForwardingMux;
use crate::gateway::{ConnectOptions, GatewayError, GatewayRegistrar};
use crate::lifecycle::Shutdown;

/// Registrar that dials the gRPC endpoint over a plaintext HTTP/2 channel.
#[derive(Debug, Default)]
pub struct GrpcRegistrar;

impl GrpcRegistrar {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GatewayRegistrar for GrpcRegistrar {
    async fn register(
        &self,
        shutdown: &Shutdown,
        authority: &str,
        options: &ConnectOptions,
    ) -> Result<Router, GatewayError> {
        let parsed: Authority =
            authority
                .parse()
                .map_err(|source| GatewayError::InvalidTarget {
                    target: authority.to_string(),
                    source,
                })?;

        let endpoint = Endpoint::from_shared(format!("http://{authority}"))
            .map_err(|err| GatewayError::Connect {
                target: authority.to_string(),
                source: cause_chain(err),
            })?
            .connect_timeout(options.connect_timeout)
            .tcp_nodelay(options.tcp_nodelay);

        tracing::debug!(
            upstream = %authority,
            timeout = ?options.connect_timeout,
            "dialing gRPC endpoint"
        );

        let channel = tokio::select! {
            biased;
            _ = shutdown.wait() => return Err(GatewayError::Cancelled),
            result = endpoint.connect() => result.map_err(|err| GatewayError::Connect {
                target: authority.to_string(),
                source: cause_chain(err),
            })?,
        };

        tracing::info!(upstream = %authority, "gRPC channel established");
        Ok(ForwardingMux::new(channel, parsed).into_router())
    }
}

/// Flatten an error and its cause chain into one message. tonic's transport
/// error displays as just "transport error"; the interesting part (e.g.
/// "connection refused") lives further down the chain.
fn cause_chain(err: impl std::error::Error) -> Box<dyn std::error::Error + Send + Sync> {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    message.into()
}

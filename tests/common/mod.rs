//! Shared utilities for integration testing.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http2;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::{TokioExecutor, TokioIo};
use tokio::net::TcpListener;

use gateway_proxy::gateway::{ConnectOptions, GatewayError, GatewayRegistrar};
use gateway_proxy::lifecycle::Shutdown;

/// Start a stub gRPC upstream: an HTTP/2 (h2c) server that echoes the
/// request path in a header so tests can observe forwarding.
#[allow(dead_code)]
pub async fn spawn_grpc_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            tokio::spawn(async move {
                let service = service_fn(|req: Request<Incoming>| async move {
                    let path = req.uri().path().to_string();
                    Ok::<_, Infallible>(
                        Response::builder()
                            .header("content-type", "application/grpc")
                            .header("x-upstream-path", path)
                            .body(Full::new(Bytes::from_static(b"upstream-ok")))
                            .unwrap(),
                    )
                });
                let _ = http2::Builder::new(TokioExecutor::new())
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    addr
}

/// Registrar stub that succeeds with a fixed handler.
#[allow(dead_code)]
pub struct StaticRegistrar {
    pub body: &'static str,
    pub registered: Arc<AtomicU32>,
}

#[async_trait]
impl GatewayRegistrar for StaticRegistrar {
    async fn register(
        &self,
        _shutdown: &Shutdown,
        _authority: &str,
        _options: &ConnectOptions,
    ) -> Result<Router, GatewayError> {
        self.registered.fetch_add(1, Ordering::SeqCst);
        let body = self.body;
        Ok(Router::new().fallback(move || async move { body }))
    }
}

/// Registrar stub that always fails as if the endpoint refused the dial.
#[allow(dead_code)]
pub struct FailingRegistrar {
    pub calls: Arc<AtomicU32>,
}

#[async_trait]
impl GatewayRegistrar for FailingRegistrar {
    async fn register(
        &self,
        _shutdown: &Shutdown,
        authority: &str,
        _options: &ConnectOptions,
    ) -> Result<Router, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GatewayError::Connect {
            target: authority.to_string(),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        })
    }
}

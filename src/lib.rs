//! HTTP front end for a locally running gRPC service.
//!
//! The process reads two port numbers at startup, establishes a client
//! channel to `localhost:<grpc-port>`, and serves HTTP on `<http-port>`
//! with a forwarding multiplexer as the sole handler. A supervisor drives
//! the connect-then-serve cycle and restarts it with backoff when it fails.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod supervisor;

pub use config::{Cli, ConfigError, GatewayConfig};
pub use gateway::{ConnectOptions, GatewayError, GatewayRegistrar, GrpcRegistrar};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use supervisor::{Supervisor, SupervisorError};

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, HTTP/1.1 and h2c)
//!     → request.rs (request ID generation)
//!     → forwarding mux (sole handler, provided by the gateway subsystem)
//!     → response to client
//! ```

pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;

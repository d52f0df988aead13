//! Configuration validation.
//!
//! Semantic checks only; clap and serde already enforce syntax. Validation
//! is a pure function and returns all errors, not just the first.

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic configuration error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be a positive port number")]
    ZeroPort { field: &'static str },

    #[error("grpc-port and http-port must differ (both are {port})")]
    PortCollision { port: u16 },
}

/// Validate a fully assembled configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.grpc_port == 0 {
        errors.push(ValidationError::ZeroPort { field: "grpc-port" });
    }
    if config.http_port == 0 {
        errors.push(ValidationError::ZeroPort { field: "http-port" });
    }
    if config.grpc_port != 0 && config.grpc_port == config.http_port {
        errors.push(ValidationError::PortCollision {
            port: config.grpc_port,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

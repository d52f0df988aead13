//! Configuration schema definitions.
//!
//! All types derive Serde traits so a partial config can also be supplied
//! from a TOML file.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Local port the gRPC service is assumed to be listening on.
    pub grpc_port: u16,

    /// Port this process serves HTTP on.
    pub http_port: u16,

    /// Supervisor restart policy.
    pub retry: RetryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            grpc_port: 50051,
            http_port: 8081,
            retry: RetryConfig::default(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Authority of the upstream gRPC endpoint, always `localhost:<grpc_port>`.
    pub fn grpc_authority(&self) -> String {
        format!("localhost:{}", self.grpc_port)
    }

    /// Address the HTTP server binds to: all interfaces at `http_port`.
    pub fn http_listen_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.http_port)
    }

    /// Layer values from a config file over the current configuration.
    pub fn apply_file(&mut self, file: GatewayConfigFile) {
        if let Some(port) = file.grpc_port {
            self.grpc_port = port;
        }
        if let Some(port) = file.http_port {
            self.http_port = port;
        }
        if let Some(retry) = file.retry {
            self.retry = retry;
        }
        if let Some(timeouts) = file.timeouts {
            self.timeouts = timeouts;
        }
    }
}

/// Partial configuration as read from a TOML file. Every field is optional;
/// absent fields keep their previous value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfigFile {
    pub grpc_port: Option<u16>,
    pub http_port: Option<u16>,
    pub retry: Option<RetryConfig>,
    pub timeouts: Option<TimeoutConfig>,
}

/// Supervisor restart policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum connect-then-serve attempts before giving up.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// gRPC channel connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total request/response timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ports_and_addresses() {
        let config = GatewayConfig::default();
        assert_eq!(config.grpc_port, 50051);
        assert_eq!(config.http_port, 8081);
        assert_eq!(config.grpc_authority(), "localhost:50051");
        assert_eq!(config.http_listen_addr().port(), 8081);
    }

    #[test]
    fn grpc_authority_formats_exactly() {
        for port in [1u16, 80, 9000, 50051, u16::MAX] {
            let config = GatewayConfig {
                grpc_port: port,
                ..GatewayConfig::default()
            };
            assert_eq!(config.grpc_authority(), format!("localhost:{port}"));
        }
    }

    #[test]
    fn http_listen_addr_is_all_interfaces() {
        let config = GatewayConfig {
            http_port: 9090,
            ..GatewayConfig::default()
        };
        let addr = config.http_listen_addr();
        assert!(addr.ip().is_unspecified());
        assert_eq!(addr.port(), 9090);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut config = GatewayConfig::default();
        config.apply_file(GatewayConfigFile {
            grpc_port: Some(6000),
            http_port: None,
            retry: None,
            timeouts: None,
        });
        assert_eq!(config.grpc_port, 6000);
        assert_eq!(config.http_port, 8081);
    }
}

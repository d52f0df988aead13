//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{self, ConfigError};
use crate::config::schema::{GatewayConfig, GatewayConfigFile};
use crate::config::validation::validate_config;

/// HTTP front end for a locally running gRPC service.
#[derive(Debug, Parser)]
#[command(name = "gateway-proxy", version)]
pub struct Cli {
    /// Local port the gRPC service is listening on [default: 50051]
    #[arg(long, value_name = "PORT")]
    pub grpc_port: Option<u16>,

    /// Port to serve HTTP on [default: 8081]
    #[arg(long, value_name = "PORT")]
    pub http_port: Option<u16>,

    /// Optional TOML config file; explicit flags override file values
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset [default: info]
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Filter directive for the logging subsystem.
    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Assemble and validate the effective configuration.
    ///
    /// Precedence: built-in defaults, then the config file (if any), then
    /// explicit flags.
    pub fn into_config(self) -> Result<GatewayConfig, ConfigError> {
        let file = match &self.config {
            Some(path) => loader::load_file(path)?,
            None => GatewayConfigFile::default(),
        };

        let mut config = GatewayConfig::default();
        config.apply_file(file);

        if let Some(port) = self.grpc_port {
            config.grpc_port = port;
        }
        if let Some(port) = self.http_port {
            config.http_port = port;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

//! gateway-proxy
//!
//! A thin HTTP front end for a gRPC service running on the same host.
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                GATEWAY PROXY                  │
//!                  │                                               │
//!   HTTP request   │  ┌────────┐   ┌────────────┐   ┌──────────┐  │
//!   ───────────────┼─▶│  http  │──▶│ forwarding │──▶│  gRPC    │──┼──▶ localhost:<grpc-port>
//!                  │  │ server │   │    mux     │   │ channel  │  │
//!                  │  └────────┘   └────────────┘   └──────────┘  │
//!                  │                                               │
//!                  │  ┌─────────────────────────────────────────┐  │
//!                  │  │ supervisor: connect → serve, restart     │  │
//!                  │  │ with backoff, give up after N attempts   │  │
//!                  │  └─────────────────────────────────────────┘  │
//!                  └──────────────────────────────────────────────┘
//! ```

use std::process;
use std::sync::Arc;

use clap::Parser;

use gateway_proxy::config::Cli;
use gateway_proxy::gateway::GrpcRegistrar;
use gateway_proxy::lifecycle::{signals, Shutdown};
use gateway_proxy::observability::logging;
use gateway_proxy::supervisor::Supervisor;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init(cli.log_filter(), cli.log_json);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            process::exit(2);
        }
    };

    tracing::info!(
        grpc_target = %config.grpc_authority(),
        listen_address = %config.http_listen_addr(),
        max_attempts = config.retry.max_attempts,
        "configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::install(shutdown.clone());

    let supervisor = Supervisor::new(config, Arc::new(GrpcRegistrar::new()));
    if let Err(err) = supervisor.run(&shutdown).await {
        tracing::error!(error = %err, "gateway terminated");
        process::exit(1);
    }

    tracing::info!("shutdown complete");
}

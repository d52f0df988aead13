//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → loader.rs (optional TOML file, parsed via serde)
//!     → cli.rs (explicit flags override file values)
//!     → validation.rs (semantic checks, all errors collected)
//!     → GatewayConfig (validated, immutable)
//!     → passed by reference into the supervisor
//! ```
//!
//! # Design Decisions
//! - Config is an explicit struct constructed once at startup, never globals
//! - Precedence: defaults < config file < flags
//! - Validation separates syntactic (clap/serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::ConfigError;
pub use schema::{GatewayConfig, RetryConfig, TimeoutConfig};
pub use validation::ValidationError;

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! SIGINT/SIGTERM (signals.rs)
//!     → process Shutdown (shutdown.rs)
//!     → forwarded into each attempt's scope
//!     → HTTP server stops accepting, supervisor loop exits
//!
//! Attempt end (any outcome):
//!     AttemptScope dropped → attempt signal released, forwarder aborted
//! ```
//!
//! # Design Decisions
//! - One broadcast channel per scope; tasks subscribe, never poll
//! - The attempt scope is a drop guard so no background work outlives an
//!   attempt

pub mod shutdown;
pub mod signals;

pub use shutdown::{AttemptScope, Shutdown};

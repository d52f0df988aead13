//! Observability subsystem.
//!
//! Structured logging only; this process exposes no metrics or tracing
//! surfaces of its own.

pub mod logging;

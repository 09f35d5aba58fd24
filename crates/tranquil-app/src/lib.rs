//! tranquil-app library root.
//!
//! Host-side wiring: the on-disk config, tracing setup, and an [`state::AppState`]
//! that hands stores to flows. Exposed as a library so integration tests can
//! exercise it without going through the binary.

pub mod cli;
pub mod config;
pub mod state;
pub mod telemetry;

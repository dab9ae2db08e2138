//! Shared helpers for the Addis feed-cleaning workspace.
//!
//! Currently this is only the [`observability`] module, which centralises
//! `tracing` initialisation so the binary and the integration tests emit
//! into the same rolling file sink.

pub mod observability;

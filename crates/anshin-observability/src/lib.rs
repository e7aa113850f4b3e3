//! # anshin-observability
//!
//! Structured logging for the collection pipeline: one-time subscriber
//! setup, span macros for jobs, adapters and merges, and event helpers
//! that give every log line a stable `event` field.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing, init_tracing_with_filter, LOG_ENV};

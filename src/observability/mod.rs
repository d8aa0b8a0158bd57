//! Observability subsystem for flatquery
//!
//! This module provides:
//! - Typed event names for structured `tracing` output
//! - Per-table read counters
//! - Subscriber setup for the binary
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. No background threads
//!
//! # Usage
//!
//! ```ignore
//! use flatquery::observability::Event;
//!
//! tracing::info!(event = Event::IndexBuildStart.as_str(), column = "year", "building");
//! ```

mod events;
mod logging;
mod metrics;

pub use events::Event;
pub use logging::{init_logging, LogFormat};
pub use metrics::TableMetrics;

//! Metric logging.
//!
//! Provides:
//! - `MetricLogger` trait for pluggable backends
//! - `ConsoleLogger` for lightweight logging through `tracing`
//! - `NoOpLogger` when metrics are not wanted

mod console;
mod logger;

pub use console::ConsoleLogger;
pub use logger::{MetricLogger, NoOpLogger};

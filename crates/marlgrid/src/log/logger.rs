//! Metric logger trait.

use std::collections::BTreeMap;

/// Trait for logging metrics to various backends.
pub trait MetricLogger: Send + Sync {
    /// Log a scalar value (e.g. episode return).
    fn log_scalar(&self, name: &str, value: f64, step: u64);

    /// Log a set of named metrics.
    fn log_metrics(&self, metrics: &BTreeMap<String, f64>, step: u64);

    /// Close the logger and flush any pending writes.
    fn close(&self) {}
}

/// A logger that does nothing.
pub struct NoOpLogger;

impl MetricLogger for NoOpLogger {
    fn log_scalar(&self, _name: &str, _value: f64, _step: u64) {}
    fn log_metrics(&self, _metrics: &BTreeMap<String, f64>, _step: u64) {}
}

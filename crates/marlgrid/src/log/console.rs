//! Console logging backend.

use super::MetricLogger;
use std::collections::BTreeMap;

/// Logger that prints metrics via tracing.
#[derive(Default)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }

    /// One line for a set of metrics, keys in order
    pub fn format_metrics(metrics: &BTreeMap<String, f64>, step: u64) -> String {
        let body: Vec<String> = metrics
            .iter()
            .map(|(key, value)| format!("{}={:.4}", key, value))
            .collect();
        format!("Episode {}: {}", step, body.join(", "))
    }
}

impl MetricLogger for ConsoleLogger {
    fn log_scalar(&self, name: &str, value: f64, step: u64) {
        tracing::info!("Episode {}: {} = {:.4}", step, name, value);
    }

    fn log_metrics(&self, metrics: &BTreeMap<String, f64>, step: u64) {
        tracing::info!("{}", Self::format_metrics(metrics, step));
    }
}

// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for elastic-repository.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The host application is responsible for choosing the exporter (Prometheus, OTEL, etc.)
//!
//! # Metric Naming Convention
//! - `elastic_repository_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `operation`: compile, search
//! - `status`: success, error, rejected

use metrics::{counter, histogram};
use std::time::{Duration, Instant};

// ═══════════════════════════════════════════════════════════════════════════
// COMPILATION
// ═══════════════════════════════════════════════════════════════════════════

/// Record a finished compilation and its constraint count
pub fn record_compile(constraints: usize) {
    counter!("elastic_repository_compiles_total").increment(1);
    histogram!("elastic_repository_compile_constraints").record(constraints as f64);
}

/// Record a named condition dropped because its operator is not registered.
/// The operator name is caller input, so it goes to the debug log only.
pub fn record_condition_skipped() {
    counter!("elastic_repository_conditions_skipped_total").increment(1);
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH - requests handed to the transport
// ═══════════════════════════════════════════════════════════════════════════

/// Record a search request outcome
pub fn record_search_query(status: &str) {
    counter!(
        "elastic_repository_search_queries_total",
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record operation latency
pub fn record_latency(operation: &str, duration: Duration) {
    histogram!(
        "elastic_repository_operation_seconds",
        "operation" => operation.to_string()
    )
    .record(duration.as_secs_f64());
}

/// A timing guard that records latency on drop
pub struct LatencyTimer {
    operation: &'static str,
    start: Instant,
}

impl LatencyTimer {
    /// Start a new latency timer
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_latency(self.operation, self.start.elapsed());
    }
}

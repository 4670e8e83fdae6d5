// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Prometheus metrics for catalog connection pool monitoring.

use std::time::Instant;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry};

/// Metrics for monitoring connection pool health and catalog operations.
#[derive(Clone, Debug)]
pub struct PoolMetrics {
    /// Number of currently active (checked out) connections
    pub active_connections: IntGauge,
    /// Number of idle connections available in the pool
    pub idle_connections: IntGauge,
    /// Total connections opened, labeled by status ("success" or "error")
    pub total_connections_created: IntCounterVec,
    /// Time spent acquiring connections, labeled by outcome ("reused", "created", "timeout")
    pub connection_acquire_duration: HistogramVec,
    /// Connection errors, labeled by error type ("timeout", "broken", "creation_failed")
    pub connection_errors: IntCounterVec,
    /// Number of catalog operations executed, labeled by operation name and status
    pub operations_total: IntCounterVec,
    /// Operation duration in seconds, labeled by operation name
    pub operation_duration: HistogramVec,
}

impl PoolMetrics {
    /// Create new metrics and register them with the given Prometheus registry.
    ///
    /// # Arguments
    /// * `prefix` - Prefix for metric names (e.g., "eduportal")
    /// * `registry` - Prometheus registry to register metrics with
    pub fn new(prefix: &str, registry: &Registry) -> Result<Self, prometheus::Error> {
        let active_connections = IntGauge::with_opts(Opts::new(
            format!("{prefix}_catalog_active_connections"),
            "Number of checked out catalog database connections",
        ))?;

        let idle_connections = IntGauge::with_opts(Opts::new(
            format!("{prefix}_catalog_idle_connections"),
            "Number of idle catalog database connections",
        ))?;

        let total_connections_created = IntCounterVec::new(
            Opts::new(
                format!("{prefix}_catalog_connections_created_total"),
                "Total number of catalog database connections opened",
            ),
            &["status"],
        )?;

        let connection_acquire_duration = HistogramVec::new(
            HistogramOpts::new(
                format!("{prefix}_catalog_connection_acquire_duration_seconds"),
                "Time spent acquiring a catalog database connection",
            )
            .buckets(vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0,
            ]),
            &["outcome"],
        )?;

        let connection_errors = IntCounterVec::new(
            Opts::new(
                format!("{prefix}_catalog_connection_errors_total"),
                "Total number of catalog database connection errors",
            ),
            &["error_type"],
        )?;

        let operations_total = IntCounterVec::new(
            Opts::new(
                format!("{prefix}_catalog_operations_total"),
                "Total number of catalog operations executed",
            ),
            &["operation", "status"],
        )?;

        let operation_duration = HistogramVec::new(
            HistogramOpts::new(
                format!("{prefix}_catalog_operation_duration_seconds"),
                "Duration of catalog operations",
            )
            .buckets(vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
            ]),
            &["operation"],
        )?;

        registry.register(Box::new(active_connections.clone()))?;
        registry.register(Box::new(idle_connections.clone()))?;
        registry.register(Box::new(total_connections_created.clone()))?;
        registry.register(Box::new(connection_acquire_duration.clone()))?;
        registry.register(Box::new(connection_errors.clone()))?;
        registry.register(Box::new(operations_total.clone()))?;
        registry.register(Box::new(operation_duration.clone()))?;

        Ok(PoolMetrics {
            active_connections,
            idle_connections,
            total_connections_created,
            connection_acquire_duration,
            connection_errors,
            operations_total,
            operation_duration,
        })
    }

    /// Record the outcome of one catalog operation started at `start`.
    pub fn record_operation(&self, operation: &str, success: bool, start: Instant) {
        let status = if success { "success" } else { "error" };
        self.operations_total
            .with_label_values(&[operation, status])
            .inc();
        self.operation_duration
            .with_label_values(&[operation])
            .observe(start.elapsed().as_secs_f64());
    }
}

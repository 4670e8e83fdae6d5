// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Connection pool for catalog database connections.
//!
//! - **Invariant**: `active + idle ≤ capacity`
//! - **Resource safety**: Connections are always returned via RAII guards,
//!   on success, on error and on early return alike
//! - **Observability**: Optional Prometheus metrics integration
//!
//! # Example
//!
//! ```ignore
//! use eduportal_catalog::pool::{ConnectionPool, PoolConfig};
//!
//! let pool = ConnectionPool::new("education_portal.sqlite", PoolConfig::default());
//! let mut guard = pool.acquire().await?;
//! let course = guard.run_blocking(|db| db.query_course("btech-cse")).await?;
//! // Connection automatically returned when guard is dropped
//! ```

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use eduportal_catalog_db::{CatalogDb, OpenMode};
use tokio::sync::{Mutex, Notify};
use tracing::{debug, trace, warn};

use crate::error::{CatalogError, Result};
use crate::metrics::PoolMetrics;

/// Configuration for the connection pool.
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: usize,
    /// Maximum time a connection can be idle before being closed
    pub max_idle_time: Duration,
    /// Timeout for acquiring a connection from the pool
    pub acquire_timeout: Duration,
    /// Timeout for opening a new connection
    pub connection_timeout: Duration,
    /// Optional metrics for monitoring
    pub metrics: Option<Arc<PoolMetrics>>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            max_idle_time: Duration::from_secs(300),
            acquire_timeout: Duration::from_secs(30),
            connection_timeout: Duration::from_secs(10),
            metrics: None,
        }
    }
}

/// Number of CPU cores + 1 for some headroom
pub(crate) fn default_max_size() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() + 1)
        .unwrap_or(5)
}

/// Internal wrapper for pooled connections
struct PooledConnection {
    db: CatalogDb,
    last_used: Instant,
}

impl PooledConnection {
    fn is_expired(&self, max_idle_time: Duration) -> bool {
        self.last_used.elapsed() > max_idle_time
    }
}

struct PoolState {
    /// Idle connections available for reuse
    idle: VecDeque<PooledConnection>,
    /// Count of connections currently in use
    active_count: usize,
    /// Maximum pool capacity
    capacity: usize,
    /// Count of tasks waiting for a connection
    waiting_count: usize,
}

impl PoolState {
    fn invariant(&self) -> bool {
        self.active_count + self.idle.len() <= self.capacity && self.capacity > 0
    }

    fn update_metrics(&self, metrics: &PoolMetrics) {
        metrics.idle_connections.set(self.idle.len() as i64);
        metrics.active_connections.set(self.active_count as i64);
    }

    /// Take back a checked out connection, or just its slot if broken.
    ///
    /// Returns whether a waiter should be woken.
    fn release(&mut self, conn: Option<PooledConnection>, metrics: Option<&PoolMetrics>) -> bool {
        debug_assert!(self.invariant());

        if self.active_count > 0 {
            self.active_count -= 1;
            if let Some(mut conn) = conn {
                conn.last_used = Instant::now();
                self.idle.push_back(conn);
            }
        }

        if let Some(metrics) = metrics {
            self.update_metrics(metrics);
        }

        debug_assert!(self.invariant());
        self.waiting_count > 0
    }
}

enum AcquireResult {
    Success(PooledConnection),
    WaitRequired,
}

/// A pool of connections to one catalog database file.
///
/// The pool maintains the invariant `active + idle ≤ capacity` at all times,
/// ensuring bounded resource usage.
#[derive(Clone)]
pub struct ConnectionPool {
    state: Arc<Mutex<PoolState>>,
    db_path: PathBuf,
    config: PoolConfig,
    available_notify: Arc<Notify>,
}

impl ConnectionPool {
    /// Create a new connection pool.
    ///
    /// No connection is opened until the first [`acquire`](Self::acquire).
    ///
    /// # Panics
    /// Panics if `config.max_size` is 0.
    pub fn new<P: AsRef<Path>>(db_path: P, config: PoolConfig) -> Self {
        assert!(config.max_size > 0, "Pool capacity must be positive");

        let state = PoolState {
            idle: VecDeque::new(),
            active_count: 0,
            capacity: config.max_size,
            waiting_count: 0,
        };

        debug_assert!(state.invariant());

        Self {
            state: Arc::new(Mutex::new(state)),
            db_path: db_path.as_ref().to_path_buf(),
            config,
            available_notify: Arc::new(Notify::new()),
        }
    }

    /// Metrics attached to this pool, if any.
    pub fn metrics(&self) -> Option<&PoolMetrics> {
        self.config.metrics.as_deref()
    }

    /// Acquire a connection from the pool.
    ///
    /// Returns an RAII guard that automatically returns the connection
    /// when dropped.
    pub async fn acquire(&self) -> Result<PooledConnectionGuard> {
        let start = Instant::now();

        loop {
            match self.try_acquire(start).await? {
                AcquireResult::Success(conn) => {
                    return Ok(PooledConnectionGuard {
                        conn: Some(conn),
                        pool: Arc::clone(&self.state),
                        metrics: self.config.metrics.clone(),
                        notify: Arc::clone(&self.available_notify),
                    });
                }
                AcquireResult::WaitRequired => {
                    let waited = tokio::time::timeout(
                        self.config.acquire_timeout,
                        self.available_notify.notified(),
                    )
                    .await;

                    let mut state = self.state.lock().await;
                    state.waiting_count = state.waiting_count.saturating_sub(1);

                    if waited.is_err() {
                        if let Some(ref metrics) = self.config.metrics {
                            metrics
                                .connection_errors
                                .with_label_values(&["timeout"])
                                .inc();
                            metrics
                                .connection_acquire_duration
                                .with_label_values(&["timeout"])
                                .observe(start.elapsed().as_secs_f64());
                        }

                        return Err(CatalogError::timeout("acquiring connection from pool"));
                    }
                }
            }
        }
    }

    /// Try to acquire a connection without blocking.
    async fn try_acquire(&self, start_time: Instant) -> Result<AcquireResult> {
        let mut state = self.state.lock().await;
        debug_assert!(state.invariant());

        let max_idle = self.config.max_idle_time;
        state.idle.retain(|conn| !conn.is_expired(max_idle));

        if let Some(mut conn) = state.idle.pop_front() {
            state.active_count += 1;
            conn.last_used = Instant::now();
            debug_assert!(state.invariant());

            if let Some(ref metrics) = self.config.metrics {
                state.update_metrics(metrics);
                metrics
                    .connection_acquire_duration
                    .with_label_values(&["reused"])
                    .observe(start_time.elapsed().as_secs_f64());
            }

            trace!("Reusing idle connection");
            return Ok(AcquireResult::Success(conn));
        }

        if state.active_count < state.capacity {
            state.active_count += 1;
            debug_assert!(state.invariant());

            if let Some(ref metrics) = self.config.metrics {
                state.update_metrics(metrics);
            }

            // Release lock before opening the database
            drop(state);

            return match self.create_connection().await {
                Ok(conn) => {
                    if let Some(ref metrics) = self.config.metrics {
                        metrics
                            .total_connections_created
                            .with_label_values(&["success"])
                            .inc();
                        metrics
                            .connection_acquire_duration
                            .with_label_values(&["created"])
                            .observe(start_time.elapsed().as_secs_f64());
                    }
                    debug!("Opened new connection to {}", self.db_path.display());
                    Ok(AcquireResult::Success(conn))
                }
                Err(e) => {
                    let mut state = self.state.lock().await;
                    state.active_count = state.active_count.saturating_sub(1);
                    debug_assert!(state.invariant());

                    if let Some(ref metrics) = self.config.metrics {
                        state.update_metrics(metrics);
                        metrics
                            .total_connections_created
                            .with_label_values(&["error"])
                            .inc();
                        metrics
                            .connection_errors
                            .with_label_values(&["creation_failed"])
                            .inc();
                    }

                    warn!("Failed to open connection: {e}");
                    Err(e)
                }
            };
        }

        state.waiting_count += 1;
        trace!(
            "Pool at capacity ({}/{}), waiting",
            state.active_count, state.capacity
        );
        Ok(AcquireResult::WaitRequired)
    }

    /// Open a new connection to the database file.
    async fn create_connection(&self) -> Result<PooledConnection> {
        let path = self.db_path.clone();
        let open = tokio::task::spawn_blocking(move || CatalogDb::open(&path, OpenMode::Create));

        let db = tokio::time::timeout(self.config.connection_timeout, open)
            .await
            .map_err(|_| CatalogError::timeout("opening catalog database"))?
            .map_err(|e| CatalogError::Worker(e.to_string()))??;

        Ok(PooledConnection {
            db,
            last_used: Instant::now(),
        })
    }

    /// Get current pool statistics.
    ///
    /// Returns (idle_count, active_count, capacity).
    pub async fn stats(&self) -> (usize, usize, usize) {
        let state = self.state.lock().await;
        (state.idle.len(), state.active_count, state.capacity)
    }
}

/// RAII guard that ensures connections are returned to the pool.
pub struct PooledConnectionGuard {
    conn: Option<PooledConnection>,
    pool: Arc<Mutex<PoolState>>,
    metrics: Option<Arc<PoolMetrics>>,
    notify: Arc<Notify>,
}

impl PooledConnectionGuard {
    /// Run a blocking database closure on the blocking thread pool.
    ///
    /// The connection travels to the worker and back; the guard keeps its
    /// slot the whole time. If the worker panics the connection is dropped
    /// and the slot is released as broken when the guard goes away.
    pub async fn run_blocking<F, R>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut CatalogDb) -> eduportal_catalog_db::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let Some(mut conn) = self.conn.take() else {
            return Err(CatalogError::Worker("connection already taken".to_string()));
        };

        let joined = tokio::task::spawn_blocking(move || {
            let result = f(&mut conn.db);
            (conn, result)
        })
        .await;

        match joined {
            Ok((conn, result)) => {
                self.conn = Some(conn);
                Ok(result?)
            }
            Err(e) => {
                if let Some(ref metrics) = self.metrics {
                    metrics
                        .connection_errors
                        .with_label_values(&["broken"])
                        .inc();
                }
                warn!("Database worker failed, dropping its connection: {e}");
                Err(CatalogError::Worker(e.to_string()))
            }
        }
    }
}

impl Drop for PooledConnectionGuard {
    fn drop(&mut self) {
        let conn = self.conn.take();

        // Fast path: nobody else holds the state lock
        if let Ok(mut state) = self.pool.try_lock() {
            if state.release(conn, self.metrics.as_deref()) {
                drop(state);
                self.notify.notify_one();
            }
            return;
        }

        let pool = Arc::clone(&self.pool);
        let metrics = self.metrics.clone();
        let notify = Arc::clone(&self.notify);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let mut state = pool.lock().await;
                    if state.release(conn, metrics.as_deref()) {
                        drop(state);
                        notify.notify_one();
                    }
                });
            }
            Err(_) => {
                let mut state = pool.blocking_lock();
                if state.release(conn, metrics.as_deref()) {
                    drop(state);
                    notify.notify_one();
                }
            }
        }
    }
}

// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Catalog operations against the relational store.
//!
//! Every operation checks out one pooled connection, runs its synchronous
//! query on the blocking pool and hands the connection back when the guard
//! drops, whichever way the operation ends.

use std::time::Instant;

use eduportal_catalog_db::{CatalogDb, Course, SeedReport};
use tracing::{debug, error};

use crate::error::Result;
use crate::pool::ConnectionPool;

#[derive(Clone)]
pub struct DatabaseCatalog {
    pool: ConnectionPool,
}

impl DatabaseCatalog {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Create the schema if needed and seed `dataset` in one transaction.
    pub async fn initialize(&self, dataset: Vec<Course>) -> Result<SeedReport> {
        self.run("initialize", move |db| {
            db.create_schema()?;
            db.seed(&dataset)
        })
        .await
    }

    pub async fn get_all_courses(&self) -> Result<Vec<Course>> {
        self.run("get_all_courses", |db| db.query_all_courses())
            .await
    }

    /// `Ok(None)` when no course has this identifier.
    pub async fn get_course_by_id(&self, id: &str) -> Result<Option<Course>> {
        let id = id.to_string();
        self.run("get_course_by_id", move |db| db.query_course(&id))
            .await
    }

    /// Upsert a course; on error nothing of it is visible.
    pub async fn save_course(&self, course: &Course) -> Result<()> {
        let course = course.clone();
        self.run("save_course", move |db| db.save_course(&course))
            .await
    }

    async fn run<F, R>(&self, operation: &'static str, f: F) -> Result<R>
    where
        F: FnOnce(&mut CatalogDb) -> eduportal_catalog_db::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let start = Instant::now();
        let result: Result<R> = async {
            let mut guard = self.pool.acquire().await?;
            guard.run_blocking(f).await
        }
        .await;

        if let Some(metrics) = self.pool.metrics() {
            metrics.record_operation(operation, result.is_ok(), start);
        }
        match &result {
            Ok(_) => debug!("{operation} finished in {:?}", start.elapsed()),
            Err(e) => error!("{operation} failed: {e}"),
        }
        result
    }
}

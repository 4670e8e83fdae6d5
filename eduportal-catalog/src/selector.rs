// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Startup choice between the relational store and the static catalog.
//!
//! ```text
//! Uninitialized -> Initializing -> Connected
//!                               -> FallbackActive
//! ```
//!
//! Both outcomes are terminal until [`EnvironmentSelector::restart`].

use std::path::PathBuf;
use std::sync::Arc;

use eduportal_catalog_db::{Course, SeedReport};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::{BackendMode, CatalogConfig};
use crate::database::DatabaseCatalog;
use crate::dataset;
use crate::error::{CatalogError, Result};
use crate::fallback::StaticCatalog;
use crate::metrics::PoolMetrics;
use crate::pool::{ConnectionPool, PoolConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Uninitialized,
    Initializing,
    Connected,
    FallbackActive,
}

/// Outcome of initialization, shown to the user as a short notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitStatus {
    Connected {
        database: PathBuf,
        seeded: SeedReport,
    },
    Fallback {
        reason: String,
    },
}

impl InitStatus {
    pub fn is_fallback(&self) -> bool {
        matches!(self, InitStatus::Fallback { .. })
    }

    pub fn notice(&self) -> &'static str {
        match self {
            InitStatus::Connected { .. } => "Database connected",
            InitStatus::Fallback { .. } => "Using fallback static data",
        }
    }
}

pub struct EnvironmentSelector {
    config: CatalogConfig,
    pool_metrics: Option<Arc<PoolMetrics>>,
    dataset: Vec<Course>,
    state: SelectorState,
    outcome: Option<(Catalog, InitStatus)>,
}

impl EnvironmentSelector {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            pool_metrics: None,
            dataset: dataset::courses(),
            state: SelectorState::Uninitialized,
            outcome: None,
        }
    }

    /// Record pool metrics for the database catalog, if one gets built.
    pub fn with_metrics(mut self, metrics: Arc<PoolMetrics>) -> Self {
        self.pool_metrics = Some(metrics);
        self
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    /// Pick a provider and prepare it.
    ///
    /// Never fails: any problem with the relational store yields the static
    /// catalog and an [`InitStatus::Fallback`]. Once a terminal state is
    /// reached the same catalog is handed out again.
    pub async fn initialize(&mut self) -> (Catalog, InitStatus) {
        if let Some((catalog, status)) = &self.outcome {
            return (catalog.clone(), status.clone());
        }

        self.state = SelectorState::Initializing;

        let (catalog, status) = match self.sandbox_reason() {
            Some(reason) => {
                info!("Not using the relational store: {reason}");
                self.fallback(reason)
            }
            None => match self.connect().await {
                Ok((catalog, status)) => {
                    info!("{} ({})", status.notice(), self.config.database_path().display());
                    (catalog, status)
                }
                Err(e) => {
                    warn!("Database initialization failed, falling back to static data: {e}");
                    self.fallback(e.to_string())
                }
            },
        };

        self.state = if status.is_fallback() {
            SelectorState::FallbackActive
        } else {
            SelectorState::Connected
        };
        self.outcome = Some((catalog.clone(), status.clone()));
        (catalog, status)
    }

    /// Forget the previous outcome; the next `initialize` starts over.
    pub fn restart(&mut self) {
        debug!("Restarting environment selection");
        self.outcome = None;
        self.state = SelectorState::Uninitialized;
    }

    fn sandbox_reason(&self) -> Option<String> {
        match self.config.backend {
            BackendMode::Static => Some("static backend configured".to_string()),
            BackendMode::Auto if cfg!(target_family = "wasm") => {
                Some("running in a sandboxed environment".to_string())
            }
            BackendMode::Auto | BackendMode::Database => None,
        }
    }

    fn fallback(&self, reason: String) -> (Catalog, InitStatus) {
        (
            Catalog::Static(StaticCatalog::new(self.dataset.clone())),
            InitStatus::Fallback { reason },
        )
    }

    async fn connect(&self) -> Result<(Catalog, InitStatus)> {
        self.config.validate()?;
        if !self.config.is_local_host() {
            return Err(CatalogError::UnsupportedHost(self.config.host.clone()));
        }
        debug!(
            "Connecting as '{}'; credentials are not used by the local store",
            self.config.user
        );

        let database = self.config.database_path();
        let pool = ConnectionPool::new(
            &database,
            PoolConfig {
                max_size: self.config.pool_size,
                metrics: self.pool_metrics.clone(),
                ..Default::default()
            },
        );
        let catalog = DatabaseCatalog::new(pool);
        let seeded = catalog.initialize(self.dataset.clone()).await?;

        Ok((
            Catalog::Database(catalog),
            InitStatus::Connected { database, seeded },
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;
    use crate::catalog::Backend;
    use crate::config;

    fn config_in(dir: &std::path::Path, backend: BackendMode) -> CatalogConfig {
        CatalogConfig {
            data_dir: dir.to_path_buf(),
            backend,
            pool_size: 2,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_static_mode_never_touches_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut selector = EnvironmentSelector::new(config_in(dir.path(), BackendMode::Static));

        let (catalog, status) = selector.initialize().await;
        assert_eq!(catalog.backend(), Backend::Static);
        assert!(status.is_fallback());
        assert_eq!(selector.state(), SelectorState::FallbackActive);
        assert!(!dir.path().join("education_portal.sqlite").exists());
    }

    #[tokio::test]
    async fn test_unreachable_store_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does/not/exist");
        let mut selector = EnvironmentSelector::new(config_in(&missing, BackendMode::Database));

        let (catalog, status) = selector.initialize().await;
        assert_eq!(status.notice(), "Using fallback static data");
        assert_eq!(selector.state(), SelectorState::FallbackActive);
        assert_eq!(catalog.get_all_courses().await.unwrap(), dataset::courses());

        let mut course = dataset::courses().remove(0);
        course.name = "Changed".to_string();
        catalog.save_course(&course).await.unwrap();
        let stored = catalog.get_course_by_id(&course.id).await.unwrap().unwrap();
        assert_ne!(stored.name, "Changed");
    }

    #[tokio::test]
    async fn test_remote_host_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig {
            host: "db.example.com".to_string(),
            ..config_in(dir.path(), BackendMode::Database)
        };
        let mut selector = EnvironmentSelector::new(config);

        let (catalog, status) = selector.initialize().await;
        assert_eq!(catalog.backend(), Backend::Static);
        match status {
            InitStatus::Fallback { reason } => assert!(reason.contains("db.example.com")),
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[rstest]
    #[case("DB_NAME", "portal.v2")]
    #[case("EDUPORTAL_POOL_SIZE", "0")]
    #[tokio::test]
    async fn test_invalid_connection_settings_fall_back(
        #[case] key: &str,
        #[case] value: &str,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let vars = HashMap::from([
            ("EDUPORTAL_DATA_DIR", dir.path().display().to_string()),
            ("EDUPORTAL_BACKEND", "database".to_string()),
            (key, value.to_string()),
        ]);
        let config = config::load_with(|k| vars.get(k).cloned()).unwrap();
        let mut selector = EnvironmentSelector::new(config);

        let (catalog, status) = selector.initialize().await;
        assert!(status.is_fallback(), "{status:?}");
        assert_eq!(selector.state(), SelectorState::FallbackActive);
        assert_eq!(catalog.get_all_courses().await.unwrap(), dataset::courses());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_local_store_connects_and_seeds() {
        let dir = tempfile::tempdir().unwrap();
        let mut selector = EnvironmentSelector::new(config_in(dir.path(), BackendMode::Auto));

        let (catalog, status) = selector.initialize().await;
        assert_eq!(catalog.backend(), Backend::Database);
        assert_eq!(status.notice(), "Database connected");
        assert_eq!(selector.state(), SelectorState::Connected);
        match status {
            InitStatus::Connected { database, seeded } => {
                assert_eq!(database, dir.path().join("education_portal.sqlite"));
                assert_eq!(seeded.courses_inserted, dataset::courses().len());
            }
            other => panic!("expected connection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_terminal_state_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut selector = EnvironmentSelector::new(config_in(dir.path(), BackendMode::Database));

        let (_, first) = selector.initialize().await;
        let (_, second) = selector.initialize().await;
        assert_eq!(first, second);
        assert_eq!(selector.state(), SelectorState::Connected);
    }

    #[tokio::test]
    async fn test_restart_reinitializes() {
        let dir = tempfile::tempdir().unwrap();
        let mut selector = EnvironmentSelector::new(config_in(dir.path(), BackendMode::Database));
        assert_eq!(selector.state(), SelectorState::Uninitialized);

        selector.initialize().await;
        selector.restart();
        assert_eq!(selector.state(), SelectorState::Uninitialized);

        // Already seeded by the first run
        let (_, status) = selector.initialize().await;
        match status {
            InitStatus::Connected { seeded, .. } => assert_eq!(seeded, SeedReport::default()),
            other => panic!("expected connection, got {other:?}"),
        }
    }
}

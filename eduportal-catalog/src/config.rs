// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Catalog configuration.
//!
//! Values come from a TOML file (named by `EDUPORTAL_CONFIG`, else
//! `eduportal.toml` in the working directory, else built-in defaults) and are
//! then overridden by environment variables.

use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::pool::default_max_size;

pub const CONFIG_FILE_ENV: &str = "EDUPORTAL_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "eduportal.toml";

fn default_host() -> String {
    "localhost".into()
}

fn default_user() -> String {
    "root".into()
}

fn default_database() -> String {
    "education_portal".into()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Which provider the environment selector may choose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Static data when running sandboxed (wasm), relational store otherwise
    #[default]
    Auto,
    /// Always try the relational store
    Database,
    /// Never touch the relational store
    Static,
}

impl FromStr for BackendMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "database" => Ok(Self::Database),
            "static" => Ok(Self::Static),
            other => Err(ConfigError::Invalid {
                reason: format!("unknown backend '{other}', expected auto, database or static"),
            }),
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_database")]
    pub database: String,

    /// Directory holding `<database>.sqlite`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub backend: BackendMode,
    #[serde(default = "default_max_size")]
    pub pool_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            user: default_user(),
            password: String::new(),
            database: default_database(),
            data_dir: default_data_dir(),
            backend: BackendMode::default(),
            pool_size: default_max_size(),
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("data_dir", &self.data_dir)
            .field("backend", &self.backend)
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

impl CatalogConfig {
    pub fn load(settings_file: &Path) -> Result<CatalogConfig> {
        let contents = read_to_string(settings_file).map_err(|e| ConfigError::ReadFile {
            path: settings_file.display().to_string(),
            source: e,
        })?;
        Ok(toml::from_str(&contents).map_err(ConfigError::from)?)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// `DB_HOST`, `DB_USER`, `DB_PASSWORD` and `DB_NAME` override the
    /// connection parameters; `EDUPORTAL_DATA_DIR`, `EDUPORTAL_BACKEND` and
    /// `EDUPORTAL_POOL_SIZE` the rest.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DB_HOST") {
            self.host = host;
        }
        if let Some(user) = lookup("DB_USER") {
            self.user = user;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            self.password = password;
        }
        if let Some(database) = lookup("DB_NAME") {
            self.database = database;
        }
        if let Some(data_dir) = lookup("EDUPORTAL_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
        if let Some(backend) = lookup("EDUPORTAL_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(pool_size) = lookup("EDUPORTAL_POOL_SIZE") {
            self.pool_size = pool_size.parse().map_err(|_| ConfigError::Invalid {
                reason: format!("EDUPORTAL_POOL_SIZE must be a number, got '{pool_size}'"),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(ConfigError::Invalid {
                reason: "pool_size must be greater than 0".to_string(),
            }
            .into());
        }

        let valid_name = !self.database.is_empty()
            && self
                .database
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_name {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "database name '{}' may only contain letters, digits, '_' and '-'",
                    self.database
                ),
            }
            .into());
        }
        Ok(())
    }

    /// Whether `host` names this machine.
    pub fn is_local_host(&self) -> bool {
        matches!(
            self.host.as_str(),
            "" | "localhost" | "127.0.0.1" | "::1" | "[::1]"
        )
    }

    /// Location of the SQLite file backing the catalog.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.sqlite", self.database))
    }
}

/// Load configuration the way the binary does: file, then environment.
///
/// Values are not validated here; the environment selector checks them and
/// falls back to static data when they are unusable.
pub fn load() -> Result<CatalogConfig> {
    load_with(|key| std::env::var(key).ok())
}

/// [`load`] with variables read through `lookup`.
pub fn load_with<F>(lookup: F) -> Result<CatalogConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match lookup(CONFIG_FILE_ENV) {
        Some(settings_file) => CatalogConfig::load(Path::new(&settings_file))?,
        None => {
            if Path::new(DEFAULT_CONFIG_FILE).exists() {
                CatalogConfig::load(Path::new(DEFAULT_CONFIG_FILE))?
            } else {
                CatalogConfig::default()
            }
        }
    };

    settings.apply_overrides(lookup)?;
    Ok(settings)
}

// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Store error: {0}")]
    Store(#[from] eduportal_catalog_db::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("Database worker failed: {0}")]
    Worker(String),

    #[error("Database host '{0}' is not reachable from this process")]
    UnsupportedHost(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}

impl CatalogError {
    pub(crate) fn timeout(context: &str) -> Self {
        Self::Timeout(context.to_string())
    }
}

// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Course catalog for the education portal.
//!
//! Callers talk to a [`Catalog`], which answers the same three questions
//! (all courses, one course, save a course) whether it is backed by the
//! SQLite store or by the built-in dataset. The [`EnvironmentSelector`]
//! decides which one at startup and never fails: if the store cannot be
//! prepared, the static dataset is served instead.
//!
//! # Example
//!
//! ```ignore
//! use eduportal_catalog::{config, EnvironmentSelector};
//!
//! let mut selector = EnvironmentSelector::new(config::load()?);
//! let (catalog, status) = selector.initialize().await;
//! eprintln!("{}", status.notice());
//!
//! match catalog.get_course_by_id("mbbs").await? {
//!     Some(course) => println!("{} takes {}", course.name, course.duration),
//!     None => println!("not found"),
//! }
//! ```

pub mod assistant;
mod catalog;
pub mod config;
pub mod dataset;
mod database;
mod error;
mod fallback;
pub mod metrics;
pub mod pool;
mod selector;

pub use assistant::{Assistant, Picker, RandomPicker};
pub use catalog::{Backend, CareerSummary, Catalog, CollegeSummary, CourseFilter};
pub use config::{BackendMode, CatalogConfig};
pub use database::DatabaseCatalog;
pub use error::{CatalogError, ConfigError, Result};
pub use fallback::StaticCatalog;
pub use selector::{EnvironmentSelector, InitStatus, SelectorState};

pub use eduportal_catalog_db::{College, Course, CourseLevel, Field, SeedReport};

// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! SQLite storage for the education portal course catalog.
//!
//! This crate owns the relational side of the catalog: the row types, the
//! five-table schema, and the synchronous read and write operations that the
//! async catalog layer runs on pooled connections.
//!
//! **Architecture**: This is the Database Layer of the catalog. It knows
//! nothing about pooling, runtime selection or the static fallback.
//!
//! # Key Features
//!
//! - Full schema (courses, colleges, college_features, career_prospects,
//!   course_colleges) with cascading deletes
//! - Fully hydrated course reads (careers, colleges, college features)
//! - Transactional upsert with college de-duplication by name
//! - Idempotent seeding from a static dataset
//! - In-memory database for testing
//!
//! # Example
//!
//! ```ignore
//! use eduportal_catalog_db::{CatalogDb, OpenMode};
//!
//! let mut db = CatalogDb::open("education_portal.sqlite", OpenMode::Create)?;
//! db.create_schema()?;
//!
//! if let Some(course) = db.query_course("btech-cse")? {
//!     println!("{} ({})", course.name, course.level);
//! }
//! ```

mod connection;
mod error;
mod query;
mod schema;
mod types;
mod write;

pub use connection::{CatalogDb, OpenMode};
pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
pub use types::*;

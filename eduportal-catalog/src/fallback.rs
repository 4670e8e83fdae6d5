// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! In-memory catalog served when no relational store is available.

use std::sync::Arc;

use eduportal_catalog_db::Course;
use tracing::info;

use crate::dataset;
use crate::error::Result;

/// Read-only catalog over a fixed course list.
///
/// Saves are accepted and logged but never persisted.
#[derive(Clone, Debug)]
pub struct StaticCatalog {
    courses: Arc<[Course]>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(dataset::courses())
    }
}

impl StaticCatalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: courses.into(),
        }
    }

    pub async fn get_all_courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.to_vec())
    }

    /// First course with a matching identifier.
    pub async fn get_course_by_id(&self, id: &str) -> Result<Option<Course>> {
        Ok(self.courses.iter().find(|course| course.id == id).cloned())
    }

    pub async fn save_course(&self, course: &Course) -> Result<()> {
        info!(
            "Static catalog active, not persisting course {} ({})",
            course.id, course.name
        );
        Ok(())
    }
}

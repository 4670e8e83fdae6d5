// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Catalog entity types.

use std::collections::HashSet;
use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Academic level of a course.
///
/// `All` is a valid stored value and doubles as the wildcard in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    #[display("undergraduate")]
    Undergraduate,
    #[display("postgraduate")]
    Postgraduate,
    #[display("diploma")]
    Diploma,
    #[display("doctorate")]
    Doctorate,
    #[display("all")]
    All,
}

impl FromStr for CourseLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undergraduate" => Ok(Self::Undergraduate),
            "postgraduate" => Ok(Self::Postgraduate),
            "diploma" => Ok(Self::Diploma),
            "doctorate" => Ok(Self::Doctorate),
            "all" => Ok(Self::All),
            other => Err(Error::InvalidCourseLevel(other.to_string())),
        }
    }
}

/// Field of study of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[display("engineering")]
    Engineering,
    #[display("medicine")]
    Medicine,
    #[display("business")]
    Business,
    #[display("arts")]
    Arts,
    #[display("science")]
    Science,
    #[display("all")]
    All,
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "engineering" => Ok(Self::Engineering),
            "medicine" => Ok(Self::Medicine),
            "business" => Ok(Self::Business),
            "arts" => Ok(Self::Arts),
            "science" => Ok(Self::Science),
            "all" => Ok(Self::All),
            other => Err(Error::InvalidField(other.to_string())),
        }
    }
}

/// A college, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    /// Natural key; two colleges with the same name are the same record
    pub name: String,
    pub location: String,
    /// Free-text ranking, e.g. "#1 in India"
    pub ranking: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// A course with its career prospects and the colleges offering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course identifier
    pub id: String,
    pub name: String,
    pub level: CourseLevel,
    pub field: Field,
    /// Human readable duration, e.g. "4 years"
    pub duration: String,
    #[serde(default)]
    pub description: String,
    /// Career names in insertion order
    #[serde(default)]
    pub career_prospects: Vec<String>,
    #[serde(default)]
    pub top_colleges: Vec<College>,
}

impl Course {
    /// Career names with duplicates removed, first occurrence wins.
    pub fn unique_careers(&self) -> Vec<&str> {
        unique_strings(&self.career_prospects)
    }
}

impl College {
    /// Feature strings with duplicates removed, first occurrence wins.
    pub fn unique_features(&self) -> Vec<&str> {
        unique_strings(&self.features)
    }
}

fn unique_strings(values: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(String::as_str)
        .filter(|v| seen.insert(*v))
        .collect()
}

/// Outcome of seeding a dataset into the database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Courses that did not exist before
    pub courses_inserted: usize,
    /// Colleges that did not exist before
    pub colleges_inserted: usize,
}

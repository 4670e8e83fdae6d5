// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Uniform access to whichever catalog provider is active.

use std::fmt;

use eduportal_catalog_db::{College, Course, CourseLevel, Field};
use serde::Serialize;

use crate::database::DatabaseCatalog;
use crate::error::Result;
use crate::fallback::StaticCatalog;

/// Which provider backs a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Database,
    Static,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Database => write!(f, "database"),
            Backend::Static => write!(f, "static"),
        }
    }
}

/// Level and field restriction; `All` matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseFilter {
    pub level: CourseLevel,
    pub field: Field,
}

impl Default for CourseFilter {
    fn default() -> Self {
        Self {
            level: CourseLevel::All,
            field: Field::All,
        }
    }
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        (self.level == CourseLevel::All || course.level == self.level)
            && (self.field == Field::All || course.field == self.field)
    }
}

/// A college and the courses that list it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeSummary {
    #[serde(flatten)]
    pub college: College,
    pub course_ids: Vec<String>,
}

/// A career and the courses leading to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSummary {
    pub name: String,
    pub course_ids: Vec<String>,
}

/// The course catalog, backed by the relational store or the static dataset.
///
/// Callers see the same operations either way. Cloning is cheap.
#[derive(Clone)]
pub enum Catalog {
    Database(DatabaseCatalog),
    Static(StaticCatalog),
}

impl Catalog {
    pub fn backend(&self) -> Backend {
        match self {
            Catalog::Database(_) => Backend::Database,
            Catalog::Static(_) => Backend::Static,
        }
    }

    /// Every course, fully hydrated, in storage order.
    pub async fn get_all_courses(&self) -> Result<Vec<Course>> {
        match self {
            Catalog::Database(db) => db.get_all_courses().await,
            Catalog::Static(s) => s.get_all_courses().await,
        }
    }

    /// `Ok(None)` is "not found"; errors mean the store failed.
    pub async fn get_course_by_id(&self, id: &str) -> Result<Option<Course>> {
        match self {
            Catalog::Database(db) => db.get_course_by_id(id).await,
            Catalog::Static(s) => s.get_course_by_id(id).await,
        }
    }

    /// Upsert a course. Not durable when the static provider is active.
    pub async fn save_course(&self, course: &Course) -> Result<()> {
        match self {
            Catalog::Database(db) => db.save_course(course).await,
            Catalog::Static(s) => s.save_course(course).await,
        }
    }

    pub async fn find_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>> {
        let mut courses = self.get_all_courses().await?;
        courses.retain(|course| filter.matches(course));
        Ok(courses)
    }

    /// Distinct colleges by name, in order of first appearance.
    pub async fn list_colleges(&self) -> Result<Vec<CollegeSummary>> {
        let mut summaries: Vec<CollegeSummary> = Vec::new();
        for course in self.get_all_courses().await? {
            for college in course.top_colleges {
                match summaries
                    .iter_mut()
                    .find(|s| s.college.name == college.name)
                {
                    Some(summary) => push_course_id(&mut summary.course_ids, &course.id),
                    None => summaries.push(CollegeSummary {
                        college,
                        course_ids: vec![course.id.clone()],
                    }),
                }
            }
        }
        Ok(summaries)
    }

    /// Distinct careers, in order of first appearance.
    pub async fn list_careers(&self) -> Result<Vec<CareerSummary>> {
        let mut summaries: Vec<CareerSummary> = Vec::new();
        for course in self.get_all_courses().await? {
            for career in course.career_prospects {
                match summaries.iter_mut().find(|s| s.name == career) {
                    Some(summary) => push_course_id(&mut summary.course_ids, &course.id),
                    None => summaries.push(CareerSummary {
                        name: career,
                        course_ids: vec![course.id.clone()],
                    }),
                }
            }
        }
        Ok(summaries)
    }
}

// Courses are visited one at a time, so a repeat can only be the last entry.
fn push_course_id(course_ids: &mut Vec<String>, id: &str) {
    if course_ids.last().map(String::as_str) != Some(id) {
        course_ids.push(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;
    use crate::dataset;

    fn static_catalog() -> Catalog {
        Catalog::Static(StaticCatalog::default())
    }

    #[rstest]
    #[case(CourseLevel::All, Field::All, 11)]
    #[case(CourseLevel::Undergraduate, Field::All, 6)]
    #[case(CourseLevel::All, Field::Medicine, 2)]
    #[case(CourseLevel::Postgraduate, Field::Engineering, 1)]
    #[case(CourseLevel::Doctorate, Field::Business, 0)]
    #[tokio::test]
    async fn test_find_courses(
        #[case] level: CourseLevel,
        #[case] field: Field,
        #[case] expected: usize,
    ) {
        let found = static_catalog()
            .find_courses(&CourseFilter { level, field })
            .await
            .unwrap();
        assert_eq!(found.len(), expected);
        assert!(found.iter().all(|c| CourseFilter { level, field }.matches(c)));
    }

    #[tokio::test]
    async fn test_list_colleges_dedupes_by_name() {
        let colleges = static_catalog().list_colleges().await.unwrap();

        let iisc = colleges
            .iter()
            .find(|s| s.college.name == "Indian Institute of Science")
            .unwrap();
        assert_eq!(iisc.course_ids, vec!["mtech-ai", "bsc-physics", "phd-biology"]);

        let names: HashSet<_> = colleges.iter().map(|s| s.college.name.as_str()).collect();
        assert_eq!(names.len(), colleges.len());
        assert_eq!(colleges[0].college.name, "IIT Bombay");
    }

    #[tokio::test]
    async fn test_list_careers() {
        let careers = static_catalog().list_careers().await.unwrap();
        let scientist = careers
            .iter()
            .find(|c| c.name == "Research Scientist")
            .unwrap();
        assert_eq!(
            scientist.course_ids,
            vec!["mtech-ai", "bsc-physics", "phd-biology"]
        );
        let total: usize = careers.iter().map(|c| c.course_ids.len()).sum();
        let expected: usize = dataset::courses()
            .iter()
            .map(|c| c.career_prospects.len())
            .sum();
        assert_eq!(total, expected);
    }

    #[tokio::test]
    async fn test_repeated_entries_list_course_once() {
        let mut course = dataset::courses().remove(0);
        let college = course.top_colleges[0].clone();
        course.top_colleges.push(college.clone());
        course.career_prospects.push(course.career_prospects[0].clone());
        let career = course.career_prospects[0].clone();
        let catalog = Catalog::Static(StaticCatalog::new(vec![course]));

        let colleges = catalog.list_colleges().await.unwrap();
        let summary = colleges
            .iter()
            .find(|s| s.college.name == college.name)
            .unwrap();
        assert_eq!(summary.course_ids, vec!["btech-cse"]);

        let careers = catalog.list_careers().await.unwrap();
        let summary = careers.iter().find(|c| c.name == career).unwrap();
        assert_eq!(summary.course_ids, vec!["btech-cse"]);
    }

    #[test]
    fn test_backend_display() {
        assert_eq!(static_catalog().backend().to_string(), "static");
    }
}

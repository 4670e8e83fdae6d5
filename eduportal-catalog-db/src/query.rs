// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Read query operations for the catalog database.

use rusqlite::{Connection, OptionalExtension, params};

use crate::connection::CatalogDb;
use crate::error::Result;
use crate::types::{College, Course};

/// Course columns as stored, before the level and field are parsed.
struct CourseRow {
    id: String,
    name: String,
    level: String,
    field: String,
    duration: String,
    description: Option<String>,
}

impl CatalogDb {
    /// Query every course, fully hydrated, in identifier order.
    pub fn query_all_courses(&self) -> Result<Vec<Course>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT id, name, level, field, duration, description
            FROM courses
            ORDER BY id
            "#,
        )?;

        let rows = stmt
            .query_map([], read_course_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|row| hydrate_course(&self.conn, row))
            .collect()
    }

    /// Query a course by identifier.
    ///
    /// Returns `None` if the course is not in the database.
    pub fn query_course(&self, id: &str) -> Result<Option<Course>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT id, name, level, field, duration, description
            FROM courses
            WHERE id = ?1
            "#,
        )?;

        match stmt.query_row(params![id], read_course_row).optional()? {
            Some(row) => Ok(Some(hydrate_course(&self.conn, row)?)),
            None => Ok(None),
        }
    }

    /// Query a college by its exact name.
    pub fn query_college(&self, name: &str) -> Result<Option<College>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT id, name, location, ranking
            FROM colleges
            WHERE name = ?1
            "#,
        )?;

        let row = stmt
            .query_row(params![name], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })
            .optional()?;

        let Some((id, name, location, ranking)) = row else {
            return Ok(None);
        };

        Ok(Some(College {
            name,
            location,
            ranking: ranking.unwrap_or_default(),
            features: query_features(&self.conn, id)?,
        }))
    }

    /// Check if a course exists.
    pub fn has_course(&self, id: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT 1 FROM courses WHERE id = ?1 LIMIT 1")?;
        Ok(stmt.query_row(params![id], |_| Ok(())).optional()?.is_some())
    }

    /// Count the number of courses.
    pub fn count_courses(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM courses", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Count the number of distinct colleges.
    pub fn count_colleges(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM colleges", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn read_course_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CourseRow> {
    Ok(CourseRow {
        id: row.get(0)?,
        name: row.get(1)?,
        level: row.get(2)?,
        field: row.get(3)?,
        duration: row.get(4)?,
        description: row.get(5)?,
    })
}

/// Attach careers and colleges to a course row.
fn hydrate_course(conn: &Connection, row: CourseRow) -> Result<Course> {
    let career_prospects = query_careers(conn, &row.id)?;
    let top_colleges = query_course_colleges(conn, &row.id)?;

    Ok(Course {
        level: row.level.parse()?,
        field: row.field.parse()?,
        id: row.id,
        name: row.name,
        duration: row.duration,
        description: row.description.unwrap_or_default(),
        career_prospects,
        top_colleges,
    })
}

fn query_careers(conn: &Connection, course_id: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        r#"
        SELECT careerName
        FROM career_prospects
        WHERE courseId = ?1
        ORDER BY id
        "#,
    )?;

    let mut careers = Vec::new();
    let mut rows = stmt.query(params![course_id])?;
    while let Some(row) = rows.next()? {
        careers.push(row.get(0)?);
    }
    Ok(careers)
}

fn query_course_colleges(conn: &Connection, course_id: &str) -> Result<Vec<College>> {
    let mut stmt = conn.prepare_cached(
        r#"
        SELECT c.id, c.name, c.location, c.ranking
        FROM colleges c
        JOIN course_colleges cc ON c.id = cc.collegeId
        WHERE cc.courseId = ?1
        ORDER BY cc.rowid
        "#,
    )?;

    let refs = stmt
        .query_map(params![course_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut colleges = Vec::with_capacity(refs.len());
    for (id, name, location, ranking) in refs {
        colleges.push(College {
            name,
            location,
            ranking: ranking.unwrap_or_default(),
            features: query_features(conn, id)?,
        });
    }
    Ok(colleges)
}

fn query_features(conn: &Connection, college_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        r#"
        SELECT feature
        FROM college_features
        WHERE collegeId = ?1
        ORDER BY id
        "#,
    )?;

    let mut features = Vec::new();
    let mut rows = stmt.query(params![college_id])?;
    while let Some(row) = rows.next()? {
        features.push(row.get(0)?);
    }
    Ok(features)
}

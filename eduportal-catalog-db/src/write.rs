// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Write operations for the catalog database.
//!
//! Both entry points run in a single transaction. Any failure drops the
//! transaction, which rolls back every row written so far.

use rusqlite::{OptionalExtension, Transaction, params};
use tracing::debug;

use crate::connection::CatalogDb;
use crate::error::Result;
use crate::types::{College, Course, SeedReport};

impl CatalogDb {
    /// Insert or update a course.
    ///
    /// The course row is replaced, its career list is replaced wholesale,
    /// and every referenced college is found by name or created. Existing
    /// colleges get their location and ranking updated and their features
    /// replaced. Links to colleges not listed are left untouched.
    pub fn save_course(&mut self, course: &Course) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            r#"
            INSERT INTO courses (id, name, level, field, duration, description)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                level = excluded.level,
                field = excluded.field,
                duration = excluded.duration,
                description = excluded.description,
                updatedAt = strftime('%s', 'now')
            "#,
            params![
                course.id,
                course.name,
                course.level.to_string(),
                course.field.to_string(),
                course.duration,
                course.description,
            ],
        )?;

        tx.execute(
            "DELETE FROM career_prospects WHERE courseId = ?1",
            params![course.id],
        )?;
        insert_careers(&tx, course)?;

        for college in &course.top_colleges {
            let college_id = match find_college_id(&tx, &college.name)? {
                Some(id) => {
                    tx.execute(
                        r#"
                        UPDATE colleges
                        SET location = ?2, ranking = ?3, updatedAt = strftime('%s', 'now')
                        WHERE id = ?1
                        "#,
                        params![id, college.location, college.ranking],
                    )?;
                    tx.execute(
                        "DELETE FROM college_features WHERE collegeId = ?1",
                        params![id],
                    )?;
                    insert_features(&tx, id, college)?;
                    id
                }
                None => insert_college(&tx, college)?,
            };

            link_college(&tx, &course.id, college_id)?;
        }

        tx.commit()?;
        debug!("Saved course {}", course.id);
        Ok(())
    }

    /// Seed the database from a static dataset.
    ///
    /// Courses already present are skipped together with their careers and
    /// links, so edits made through [`save_course`](Self::save_course)
    /// survive. Colleges are found by name or created. Running the same
    /// dataset twice inserts nothing the second time.
    pub fn seed(&mut self, courses: &[Course]) -> Result<SeedReport> {
        let tx = self.conn.transaction()?;
        let mut report = SeedReport::default();

        for course in courses {
            let inserted = tx.execute(
                r#"
                INSERT OR IGNORE INTO courses (id, name, level, field, duration, description)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    course.id,
                    course.name,
                    course.level.to_string(),
                    course.field.to_string(),
                    course.duration,
                    course.description,
                ],
            )?;
            if inserted == 0 {
                continue;
            }
            report.courses_inserted += inserted;

            insert_careers(&tx, course)?;

            for college in &course.top_colleges {
                let college_id = match find_college_id(&tx, &college.name)? {
                    Some(id) => id,
                    None => {
                        report.colleges_inserted += 1;
                        insert_college(&tx, college)?
                    }
                };
                link_college(&tx, &course.id, college_id)?;
            }
        }

        tx.commit()?;
        debug!(
            "Seeded {} new courses and {} new colleges",
            report.courses_inserted, report.colleges_inserted
        );
        Ok(report)
    }

    /// Delete a course.
    ///
    /// Cascades to its careers and college links; colleges themselves stay.
    pub fn delete_course(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM courses WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }
}

fn find_college_id(tx: &Transaction<'_>, name: &str) -> Result<Option<i64>> {
    let id = tx
        .query_row(
            "SELECT id FROM colleges WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Insert a new college and its features, returning the new row id.
fn insert_college(tx: &Transaction<'_>, college: &College) -> Result<i64> {
    tx.execute(
        "INSERT INTO colleges (name, location, ranking) VALUES (?1, ?2, ?3)",
        params![college.name, college.location, college.ranking],
    )?;
    let id = tx.last_insert_rowid();
    insert_features(tx, id, college)?;
    Ok(id)
}

fn insert_features(tx: &Transaction<'_>, college_id: i64, college: &College) -> Result<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT OR IGNORE INTO college_features (collegeId, feature) VALUES (?1, ?2)",
    )?;
    for feature in college.unique_features() {
        stmt.execute(params![college_id, feature])?;
    }
    Ok(())
}

fn insert_careers(tx: &Transaction<'_>, course: &Course) -> Result<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT OR IGNORE INTO career_prospects (courseId, careerName) VALUES (?1, ?2)",
    )?;
    for career in course.unique_careers() {
        stmt.execute(params![course.id, career])?;
    }
    Ok(())
}

fn link_college(tx: &Transaction<'_>, course_id: &str, college_id: i64) -> Result<()> {
    tx.execute(
        "INSERT OR IGNORE INTO course_colleges (courseId, collegeId) VALUES (?1, ?2)",
        params![course_id, college_id],
    )?;
    Ok(())
}
